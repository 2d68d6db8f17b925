//! Transport payloads for the HTTP API.

mod auth;
mod comments;
mod health;
mod issues;
mod projects;
mod users;

pub use auth::{LoginRequest, RegisterRequest, SessionResponse};
pub use comments::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
pub use health::{HealthDependencyStatus, HealthResponse};
pub use issues::{
    CreateIssueRequest, IssueListQuery, IssueResponse, SetAssigneeRequest, UpdateIssueRequest,
};
pub use projects::{
    AddMemberRequest, CreateProjectRequest, MembershipResponse, ProjectResponse,
    UpdateMemberRoleRequest, UpdateProjectRequest,
};
pub use users::{
    ChangePasswordRequest, SetActiveRequest, SetGlobalRoleRequest, UpdateUserRequest, UserResponse,
};
