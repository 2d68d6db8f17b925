//! Shared primitives for all Rust crates in Punchlist.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Punchlist crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// The identity and authorization variants are the stable condition surface
/// the transport maps to user-facing errors; they are never merged or
/// downgraded on their way out of the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No credential was presented for an operation that needs one.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Presented token is malformed, forged, or expired.
    #[error("invalid or expired session token")]
    InvalidToken,

    /// Login failed. Unknown username and wrong password share this
    /// condition so the response never reveals whether an account exists.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Subject is deactivated or no longer exists. Deactivation is the
    /// revocation mechanism for outstanding session tokens.
    #[error("account is inactive")]
    AccountInactive,

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
