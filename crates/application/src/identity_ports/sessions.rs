use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{GlobalRole, UserId};

/// Fixed session token lifetime in days.
pub const SESSION_TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried inside a signed session token.
///
/// The embedded role reflects the subject's role at issuance. Principal
/// resolution reads the current role from storage instead of trusting this
/// value, so it is informational once the token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject user identifier.
    pub subject_id: UserId,
    /// Global role at issuance time.
    pub global_role: GlobalRole,
    /// Issuance timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Port for signing and verifying self-contained session tokens.
pub trait SessionTokenCodec: Send + Sync {
    /// Issues a signed token for the subject, valid for
    /// [`SESSION_TOKEN_TTL_DAYS`] from now.
    fn issue(&self, subject_id: UserId, global_role: GlobalRole) -> AppResult<String>;

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// Fails with `AppError::InvalidToken` for a malformed token, a bad
    /// signature, or an expiry in the past.
    fn verify(&self, token: &str) -> AppResult<SessionClaims>;
}
