//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use punchlist_application::{
    AuthorizationService, CommentService, IssueService, NewUserRecord, PasswordHasher,
    ProjectService, SessionService, UserRepository, UserService,
};
use punchlist_domain::{GlobalRole, Principal};
use punchlist_infrastructure::{
    Argon2PasswordHasher, InMemoryCommentRepository, InMemoryIssueRepository,
    InMemoryProjectRepository, InMemoryUserRepository, JwtSessionTokenCodec,
};

use crate::error::ApiResult;
use crate::state::AppState;

/// Password every seeded account authenticates with.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// In-memory application state plus a direct user repository handle for
/// seeding accounts. Everything else is driven through the services.
pub struct TestHarness {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn test_state() -> AppState {
    test_harness().state
}

pub fn test_harness() -> TestHarness {
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let issues = Arc::new(InMemoryIssueRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let password_hasher = Arc::new(test_hasher());
    let token_codec = Arc::new(JwtSessionTokenCodec::new(
        "handler-test-signing-secret-0123456789",
    ));
    let authorization = AuthorizationService::new(projects.clone());

    let state = AppState {
        session_service: SessionService::new(users.clone(), password_hasher.clone(), token_codec),
        user_service: UserService::new(users.clone(), password_hasher, authorization.clone()),
        project_service: ProjectService::new(
            projects.clone(),
            projects.clone(),
            users.clone(),
            authorization.clone(),
        ),
        issue_service: IssueService::new(
            issues.clone(),
            projects.clone(),
            users.clone(),
            authorization.clone(),
        ),
        comment_service: CommentService::new(comments, issues, authorization),
        postgres_pool: None,
    };

    TestHarness { state, users }
}

fn test_hasher() -> Argon2PasswordHasher {
    // Minimal cost parameters keep the tests fast.
    Argon2PasswordHasher::with_params(1024, 1, 1)
}

/// Creates an active account with [`TEST_PASSWORD`] and returns its
/// principal.
pub async fn seed_principal(harness: &TestHarness, username: &str, role: GlobalRole) -> Principal {
    let password_hash = test_hasher()
        .hash_password(TEST_PASSWORD)
        .unwrap_or_else(|_| unreachable!());
    let record = harness
        .users
        .create(NewUserRecord {
            username: username.to_owned(),
            email: format!("{username}@punchlist.dev"),
            password_hash,
            global_role: role,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    Principal::new(record.id, record.global_role, true)
}

/// Asserts the handler result is an error and returns its mapped HTTP
/// status.
pub fn error_status<T>(result: ApiResult<T>) -> StatusCode {
    match result {
        Ok(_) => panic!("expected an error response"),
        Err(error) => error.into_response().status(),
    }
}
