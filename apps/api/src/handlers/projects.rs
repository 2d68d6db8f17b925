use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use punchlist_application::{UpdateProjectInput, require_authenticated};
use punchlist_domain::{ProjectId, UserId};
use uuid::Uuid;

use crate::dto::{
    AddMemberRequest, CreateProjectRequest, MembershipResponse, ProjectResponse,
    UpdateMemberRoleRequest, UpdateProjectRequest,
};
use crate::error::ApiResult;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// GET /api/projects - List projects within the caller's visibility scope.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let principal = require_authenticated(principal)?;
    let projects = state.project_service.list_projects(&principal).await?;

    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// POST /api/projects - Create a project. Admin only.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let principal = require_authenticated(principal)?;
    let project = state
        .project_service
        .create_project(&principal, &payload.name, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// GET /api/projects/{project_id} - Fetch a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<ProjectResponse>> {
    let principal = require_authenticated(principal)?;
    let project = state
        .project_service
        .get_project(&principal, ProjectId::from_uuid(project_id))
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

/// PATCH /api/projects/{project_id} - Update name or description.
pub async fn update_project(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let principal = require_authenticated(principal)?;
    let project = state
        .project_service
        .update_project(
            &principal,
            ProjectId::from_uuid(project_id),
            UpdateProjectInput {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

/// DELETE /api/projects/{project_id} - Delete a project and everything in it.
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let principal = require_authenticated(principal)?;
    state
        .project_service
        .delete_project(&principal, ProjectId::from_uuid(project_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/{project_id}/members - List the project roster.
pub async fn list_members(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let principal = require_authenticated(principal)?;
    let members = state
        .project_service
        .list_members(&principal, ProjectId::from_uuid(project_id))
        .await?;

    Ok(Json(
        members.into_iter().map(MembershipResponse::from).collect(),
    ))
}

/// POST /api/projects/{project_id}/members - Add a user to the roster.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<MembershipResponse>)> {
    let principal = require_authenticated(principal)?;
    let membership = state
        .project_service
        .add_member(
            &principal,
            ProjectId::from_uuid(project_id),
            payload.user_id,
            payload.role,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse::from(membership)),
    ))
}

/// PUT /api/projects/{project_id}/members/{user_id} - Change a member's role.
pub async fn update_member_role(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MembershipResponse>> {
    let principal = require_authenticated(principal)?;
    let membership = state
        .project_service
        .update_member_role(
            &principal,
            ProjectId::from_uuid(project_id),
            UserId::from_uuid(user_id),
            payload.role,
        )
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// DELETE /api/projects/{project_id}/members/{user_id} - Remove a member.
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
    Path((project_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let principal = require_authenticated(principal)?;
    state
        .project_service
        .remove_member(
            &principal,
            ProjectId::from_uuid(project_id),
            UserId::from_uuid(user_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
