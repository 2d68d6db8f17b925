use async_trait::async_trait;
use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{GlobalRole, UserId};

/// User record returned by repository queries.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Canonical lowercase username.
    pub username: String,
    /// Canonical email address.
    pub email: String,
    /// Argon2id password digest.
    pub password_hash: String,
    /// System-wide role.
    pub global_role: GlobalRole,
    /// Whether the account may authenticate and act.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user record.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    /// Canonical lowercase username.
    pub username: String,
    /// Canonical email address.
    pub email: String,
    /// Argon2id password digest.
    pub password_hash: String,
    /// System-wide role assigned at creation.
    pub global_role: GlobalRole,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Finds a user by canonical username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Creates a new user record.
    async fn create(&self, user: NewUserRecord) -> AppResult<UserRecord>;

    /// Lists all user records ordered by creation time.
    async fn list(&self) -> AppResult<Vec<UserRecord>>;

    /// Updates the user's email address.
    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<UserRecord>;

    /// Updates the password digest for a user.
    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()>;

    /// Replaces the user's global role.
    async fn set_global_role(&self, user_id: UserId, role: GlobalRole) -> AppResult<UserRecord>;

    /// Activates or deactivates the account.
    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord>;
}
