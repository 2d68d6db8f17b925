use punchlist_application::{
    CommentService, IssueService, ProjectService, SessionService, UserService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub user_service: UserService,
    pub project_service: ProjectService,
    pub issue_service: IssueService,
    pub comment_service: CommentService,
    /// Pool the health endpoint pings. Absent when handlers run against
    /// in-memory fakes.
    pub postgres_pool: Option<PgPool>,
}
