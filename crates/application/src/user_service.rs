//! User directory and account administration service.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{EmailAddress, GlobalRole, Principal, UserId, validate_password};

use crate::authorization_service::AuthorizationService;
use crate::identity_ports::{PasswordHasher, UserRecord, UserRepository};

mod administration;
mod password;
mod retrieval;

/// Partial update applied to a user profile. `None` fields are left
/// unchanged. Usernames are immutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// Replacement email address.
    pub email: Option<String>,
}

/// Application service for profile access and account administration.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    authorization: AuthorizationService,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            users,
            password_hasher,
            authorization,
        }
    }
}
