use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use punchlist_application::{RegisterParams, require_authenticated};
use tracing::{info, warn};

use crate::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::error::ApiResult;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// POST /auth/register - Create an account and open a session for it.
pub async fn register(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session = state
        .session_service
        .register(
            principal.as_ref(),
            RegisterParams {
                username: payload.username,
                email: payload.email,
                password: payload.password,
                global_role: payload.global_role,
            },
        )
        .await?;

    info!(
        user_id = %session.user.id,
        username = %session.user.username,
        "account registered"
    );

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// POST /auth/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = match state
        .session_service
        .login(&payload.username, &payload.password)
        .await
    {
        Ok(session) => session,
        Err(error) => {
            warn!(username = %payload.username, error = %error, "login rejected");
            return Err(error.into());
        }
    };

    info!(user_id = %session.user.id, "login succeeded");

    Ok(Json(SessionResponse::from(session)))
}

/// GET /auth/me - Return the authenticated caller's own account.
pub async fn me(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
) -> ApiResult<Json<UserResponse>> {
    let principal = require_authenticated(principal)?;
    let user = state.session_service.current_user(&principal).await?;

    Ok(Json(UserResponse::from(user)))
}
