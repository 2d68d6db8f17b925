use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use punchlist_application::require_authenticated;
use punchlist_domain::{CommentId, IssueId};
use uuid::Uuid;

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::error::ApiResult;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// GET /api/issues/{issue_id}/comments - List an issue's discussion.
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let principal = require_authenticated(principal)?;
    let comments = state
        .comment_service
        .list_comments(&principal, IssueId::from_uuid(issue_id))
        .await?;

    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// POST /api/issues/{issue_id}/comments - Add a comment to an issue.
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let principal = require_authenticated(principal)?;
    let comment = state
        .comment_service
        .add_comment(&principal, IssueId::from_uuid(issue_id), &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// PATCH /api/comments/{comment_id} - Edit a comment's body.
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(comment_id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let principal = require_authenticated(principal)?;
    let comment = state
        .comment_service
        .update_comment(&principal, CommentId::from_uuid(comment_id), &payload.body)
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// DELETE /api/comments/{comment_id} - Delete a comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(comment_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_authenticated(principal)?;
    state
        .comment_service
        .delete_comment(&principal, CommentId::from_uuid(comment_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
