use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use punchlist_application::{
    CreateIssueInput, IssueFilter, UpdateIssueInput, require_authenticated,
};
use punchlist_domain::IssueId;
use uuid::Uuid;

use crate::dto::{
    CreateIssueRequest, IssueListQuery, IssueResponse, SetAssigneeRequest, UpdateIssueRequest,
};
use crate::error::ApiResult;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// GET /api/issues - List issues within the caller's visibility scope.
///
/// Accepts `project_id`, `status`, and `assignee_id` query filters.
pub async fn list_issues(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Query(query): Query<IssueListQuery>,
) -> ApiResult<Json<Vec<IssueResponse>>> {
    let principal = require_authenticated(principal)?;
    let issues = state
        .issue_service
        .list_issues(
            &principal,
            IssueFilter {
                project_id: query.project_id,
                status: query.status,
                assignee_id: query.assignee_id,
            },
        )
        .await?;

    Ok(Json(issues.into_iter().map(IssueResponse::from).collect()))
}

/// POST /api/issues - File an issue. The caller becomes its reporter.
pub async fn create_issue(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Json(payload): Json<CreateIssueRequest>,
) -> ApiResult<(StatusCode, Json<IssueResponse>)> {
    let principal = require_authenticated(principal)?;
    let issue = state
        .issue_service
        .create_issue(
            &principal,
            CreateIssueInput {
                project_id: payload.project_id,
                title: payload.title,
                description: payload.description,
                priority: payload.priority,
                assignee_id: payload.assignee_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(IssueResponse::from(issue))))
}

/// GET /api/issues/{issue_id} - Fetch a single issue.
pub async fn get_issue(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
) -> ApiResult<Json<IssueResponse>> {
    let principal = require_authenticated(principal)?;
    let issue = state
        .issue_service
        .get_issue(&principal, IssueId::from_uuid(issue_id))
        .await?;

    Ok(Json(IssueResponse::from(issue)))
}

/// PATCH /api/issues/{issue_id} - Update issue fields.
pub async fn update_issue(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
    Json(payload): Json<UpdateIssueRequest>,
) -> ApiResult<Json<IssueResponse>> {
    let principal = require_authenticated(principal)?;
    let issue = state
        .issue_service
        .update_issue(
            &principal,
            IssueId::from_uuid(issue_id),
            UpdateIssueInput {
                title: payload.title,
                description: payload.description,
                status: payload.status,
                priority: payload.priority,
            },
        )
        .await?;

    Ok(Json(IssueResponse::from(issue)))
}

/// PUT /api/issues/{issue_id}/assignee - Assign or clear the assignee.
pub async fn set_assignee(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
    Json(payload): Json<SetAssigneeRequest>,
) -> ApiResult<Json<IssueResponse>> {
    let principal = require_authenticated(principal)?;
    let issue = state
        .issue_service
        .set_assignee(&principal, IssueId::from_uuid(issue_id), payload.assignee_id)
        .await?;

    Ok(Json(IssueResponse::from(issue)))
}

/// DELETE /api/issues/{issue_id} - Delete an issue and its comments.
pub async fn delete_issue(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(issue_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_authenticated(principal)?;
    state
        .issue_service
        .delete_issue(&principal, IssueId::from_uuid(issue_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
