//! Request guards that turn missing or unusable identities into typed denials.

use punchlist_core::{AppError, AppResult};
use punchlist_domain::Principal;

/// Ensures a principal is present and its account is active.
///
/// Fails with `AuthenticationRequired` when no principal was resolved for
/// the request and with `AccountInactive` when the resolved principal is
/// deactivated. The inactive case is rechecked here even though resolution
/// already rejects inactive subjects, so a stale principal cannot slip
/// through a handler.
pub fn require_authenticated(principal: Option<Principal>) -> AppResult<Principal> {
    let Some(principal) = principal else {
        return Err(AppError::AuthenticationRequired);
    };

    if !principal.is_active() {
        return Err(AppError::AccountInactive);
    }

    Ok(principal)
}
