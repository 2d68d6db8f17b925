use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use punchlist_domain::Principal;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

/// Principal resolved from the request's bearer token, if one was presented.
///
/// `None` means no `Authorization` header was sent: the request proceeds
/// anonymously and each handler decides whether that is acceptable. A token
/// that is present but fails verification never reaches a handler.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPrincipal(pub Option<Principal>);

pub async fn resolve_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = match bearer_token(request.headers()) {
        Some(token) => {
            let principal = state
                .session_service
                .resolve_principal(token)
                .await
                .inspect_err(|error| warn!(error = %error, "bearer token rejected"))?;
            Some(principal)
        }
        None => None,
    };

    request.extensions_mut().insert(CurrentPrincipal(principal));
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
