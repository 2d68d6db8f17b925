//! Punchlist API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod bootstrap;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use punchlist_application::{
    AuthorizationService, CommentService, IssueService, PasswordHasher, ProjectService,
    SessionService, SessionTokenCodec, UserService,
};
use punchlist_core::AppError;
use punchlist_infrastructure::{
    Argon2PasswordHasher, JwtSessionTokenCodec, PostgresCommentRepository, PostgresIssueRepository,
    PostgresProjectRepository, PostgresUserRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let project_repository = Arc::new(PostgresProjectRepository::new(pool.clone()));
    let issue_repository = Arc::new(PostgresIssueRepository::new(pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pool.clone()));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::with_params(
        config.argon2_m_cost_kib,
        config.argon2_t_cost,
        config.argon2_p_cost,
    ));
    let token_codec: Arc<dyn SessionTokenCodec> =
        Arc::new(JwtSessionTokenCodec::new(&config.session_signing_secret));

    if let Some(bootstrap_admin) = config.bootstrap_admin.as_ref() {
        bootstrap::seed_bootstrap_admin(
            bootstrap_admin,
            user_repository.as_ref(),
            password_hasher.as_ref(),
        )
        .await?;
    }

    let authorization = AuthorizationService::new(project_repository.clone());

    let app_state = AppState {
        session_service: SessionService::new(
            user_repository.clone(),
            password_hasher.clone(),
            token_codec,
        ),
        user_service: UserService::new(
            user_repository.clone(),
            password_hasher,
            authorization.clone(),
        ),
        project_service: ProjectService::new(
            project_repository.clone(),
            project_repository.clone(),
            user_repository.clone(),
            authorization.clone(),
        ),
        issue_service: IssueService::new(
            issue_repository.clone(),
            project_repository.clone(),
            user_repository.clone(),
            authorization.clone(),
        ),
        comment_service: CommentService::new(comment_repository, issue_repository, authorization),
        postgres_pool: Some(pool),
    };

    // Everything except the health probe sits behind bearer-token
    // resolution.
    let protected_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/api/users", get(handlers::users::list_users))
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        )
        .route(
            "/api/users/{user_id}/password",
            put(handlers::users::change_password),
        )
        .route(
            "/api/users/{user_id}/role",
            put(handlers::users::set_global_role),
        )
        .route(
            "/api/users/{user_id}/active",
            put(handlers::users::set_active),
        )
        .route(
            "/api/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/api/projects/{project_id}",
            get(handlers::projects::get_project)
                .patch(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/api/projects/{project_id}/members",
            get(handlers::projects::list_members).post(handlers::projects::add_member),
        )
        .route(
            "/api/projects/{project_id}/members/{user_id}",
            put(handlers::projects::update_member_role).delete(handlers::projects::remove_member),
        )
        .route(
            "/api/issues",
            get(handlers::issues::list_issues).post(handlers::issues::create_issue),
        )
        .route(
            "/api/issues/{issue_id}",
            get(handlers::issues::get_issue)
                .patch(handlers::issues::update_issue)
                .delete(handlers::issues::delete_issue),
        )
        .route(
            "/api/issues/{issue_id}/assignee",
            put(handlers::issues::set_assignee),
        )
        .route(
            "/api/issues/{issue_id}/comments",
            get(handlers::comments::list_comments).post(handlers::comments::add_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            patch(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_principal,
        ));

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "punchlist-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
