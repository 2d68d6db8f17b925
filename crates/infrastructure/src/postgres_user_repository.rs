//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use punchlist_application::{NewUserRecord, UserRecord, UserRepository};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{GlobalRole, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    username: String,
    email: String,
    password_hash: String,
    global_role: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            global_role: row.global_role.parse::<GlobalRole>()?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

mod account;
mod lookup;


#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_username_impl(username).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_email_impl(email).await
    }

    async fn create(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        self.create_impl(user).await
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        self.list_impl().await
    }

    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<UserRecord> {
        self.update_email_impl(user_id, email).await
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        self.update_password_impl(user_id, password_hash).await
    }

    async fn set_global_role(&self, user_id: UserId, role: GlobalRole) -> AppResult<UserRecord> {
        self.set_global_role_impl(user_id, role).await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord> {
        self.set_active_impl(user_id, is_active).await
    }
}

fn unique_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        let message = match database_error.constraint() {
            Some("users_email_key") => "an account with this email already exists",
            _ => "this username is already taken",
        };
        return AppError::Conflict(message.to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
