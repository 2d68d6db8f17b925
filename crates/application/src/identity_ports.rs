//! Ports for user persistence, credential hashing, and session tokens.

mod credentials;
mod sessions;
mod users;

pub use credentials::PasswordHasher;
pub use sessions::{SESSION_TOKEN_TTL_DAYS, SessionClaims, SessionTokenCodec};
pub use users::{NewUserRecord, UserRecord, UserRepository};
