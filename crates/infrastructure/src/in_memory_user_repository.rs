//! In-memory user repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use punchlist_application::{NewUserRecord, UserRecord, UserRepository};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{GlobalRole, UserId};

/// In-memory user repository for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|record| record.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|record| record.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;

        if users.values().any(|record| record.username == user.username) {
            return Err(AppError::Conflict(
                "this username is already taken".to_owned(),
            ));
        }
        if users
            .values()
            .any(|record| record.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let record = UserRecord {
            id: UserId::new(),
            username: user.username,
            email: user.email.to_lowercase(),
            password_hash: user.password_hash,
            global_role: user.global_role,
            is_active: true,
            created_at: Utc::now(),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let mut records: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;

        if users.values().any(|record| {
            record.id != user_id && record.email.eq_ignore_ascii_case(email)
        }) {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let record = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.email = email.to_lowercase();
        Ok(record.clone())
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let record = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.password_hash = password_hash.to_owned();
        Ok(())
    }

    async fn set_global_role(&self, user_id: UserId, role: GlobalRole) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;
        let record = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.global_role = role;
        Ok(record.clone())
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;
        let record = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.is_active = is_active;
        Ok(record.clone())
    }
}
