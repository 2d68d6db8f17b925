use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use punchlist_application::{UpdateUserInput, require_authenticated};
use punchlist_domain::UserId;
use uuid::Uuid;

use crate::dto::{
    ChangePasswordRequest, SetActiveRequest, SetGlobalRoleRequest, UpdateUserRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// GET /api/users - List all accounts. Admin and manager only.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let principal = require_authenticated(principal)?;
    let users = state.user_service.list_users(&principal).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{user_id} - Fetch a single account.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let principal = require_authenticated(principal)?;
    let user = state
        .user_service
        .get_user(&principal, UserId::from_uuid(user_id))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/users/{user_id} - Update profile fields.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let principal = require_authenticated(principal)?;
    let user = state
        .user_service
        .update_user(
            &principal,
            UserId::from_uuid(user_id),
            UpdateUserInput {
                email: payload.email,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{user_id}/password - Change the account password.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let principal = require_authenticated(principal)?;
    state
        .user_service
        .change_password(
            &principal,
            UserId::from_uuid(user_id),
            &payload.current_password,
            &payload.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/{user_id}/role - Change the account's global role.
pub async fn set_global_role(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetGlobalRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let principal = require_authenticated(principal)?;
    let user = state
        .user_service
        .set_global_role(&principal, UserId::from_uuid(user_id), payload.role)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{user_id}/active - Activate or deactivate the account.
pub async fn set_active(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Json<UserResponse>> {
    let principal = require_authenticated(principal)?;
    let user = state
        .user_service
        .set_active(&principal, UserId::from_uuid(user_id), payload.is_active)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
