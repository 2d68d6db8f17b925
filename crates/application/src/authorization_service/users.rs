use super::*;

impl AuthorizationService {
    /// Whether the principal may view the user profile.
    ///
    /// Grant paths: is self, or global `admin`. Managers may list the user
    /// directory but hold no blanket right to individual profiles.
    #[must_use]
    pub fn can_view_user(&self, principal: &Principal, target_id: UserId) -> bool {
        principal.is_active()
            && (principal.user_id() == target_id
                || has_global_role(principal, &[GlobalRole::Admin]))
    }

    /// Whether the principal may edit the user profile.
    ///
    /// Grant paths: is self, or global `admin`.
    #[must_use]
    pub fn can_edit_user(&self, principal: &Principal, target_id: UserId) -> bool {
        self.can_view_user(principal, target_id)
    }

    /// Whether the principal may list the full user directory.
    ///
    /// Grant paths: global `admin` or `manager`.
    #[must_use]
    pub fn can_list_users(&self, principal: &Principal) -> bool {
        has_global_role(principal, ELEVATED_GLOBAL_ROLES)
    }
}
