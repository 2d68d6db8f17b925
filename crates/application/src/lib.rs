//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod comment_service;
mod guard;
mod identity_ports;
mod issue_service;
mod project_service;
mod session_service;
mod tracker_ports;
mod user_service;

#[cfg(test)]
mod test_support;

pub use authorization_service::{
    AuthorizationService, ELEVATED_GLOBAL_ROLES, IssueListScope, ProjectListScope, has_global_role,
};
pub use comment_service::CommentService;
pub use guard::require_authenticated;
pub use identity_ports::{
    NewUserRecord, PasswordHasher, SESSION_TOKEN_TTL_DAYS, SessionClaims, SessionTokenCodec,
    UserRecord, UserRepository,
};
pub use issue_service::{CreateIssueInput, IssueService};
pub use project_service::ProjectService;
pub use session_service::{AuthenticatedSession, RegisterParams, SessionService};
pub use tracker_ports::{
    CommentRecord, CommentRepository, IssueFilter, IssueRecord, IssueRepository, MembershipRecord,
    MembershipRepository, NewIssueRecord, ProjectRecord, ProjectRepository, UpdateIssueInput,
    UpdateProjectInput,
};
pub use user_service::{UpdateUserInput, UserService};
