//! Session and identity facade.
//!
//! Orchestrates the password hasher, the session token codec, and the user
//! repository to implement registration, login, and principal resolution.
//! Sessions are stateless signed tokens; revocation happens implicitly by
//! expiry or by deactivating the account, which is rechecked on every
//! resolution.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{
    EmailAddress, GlobalRole, Principal, Username, validate_password,
};

use crate::authorization_service::has_global_role;
use crate::identity_ports::{
    NewUserRecord, PasswordHasher, SessionTokenCodec, UserRecord, UserRepository,
};

mod login;
mod registration;
mod resolution;

/// Parameters for account registration.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Requested username.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested global role. Any value other than the default `user`
    /// requires the calling principal to be a global `admin`.
    pub global_role: Option<GlobalRole>,
}

/// Successful authentication result: a signed session token plus the
/// subject's user record.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserRecord,
}

/// Application service for registration, login, and principal resolution.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_codec: Arc<dyn SessionTokenCodec>,
}

impl SessionService {
    /// Creates a new session service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn SessionTokenCodec>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            token_codec,
        }
    }
}
