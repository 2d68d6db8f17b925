//! Authenticated caller identity.

use crate::user::{GlobalRole, UserId};

/// Snapshot of the caller's identity and authority for one request.
///
/// Built from the live user record after the session token is verified, so
/// role and activation state always reflect current storage rather than the
/// values captured at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    global_role: GlobalRole,
    is_active: bool,
}

impl Principal {
    /// Creates a principal from the caller's current user record.
    #[must_use]
    pub fn new(user_id: UserId, global_role: GlobalRole, is_active: bool) -> Self {
        Self {
            user_id,
            global_role,
            is_active,
        }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's current global role.
    #[must_use]
    pub fn global_role(&self) -> GlobalRole {
        self.global_role
    }

    /// Reports whether the caller's account is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_exposes_construction_values() {
        let user_id = UserId::new();
        let principal = Principal::new(user_id, GlobalRole::Manager, true);

        assert_eq!(principal.user_id(), user_id);
        assert_eq!(principal.global_role(), GlobalRole::Manager);
        assert!(principal.is_active());
    }
}
