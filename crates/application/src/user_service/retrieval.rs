use super::*;

impl UserService {
    /// Returns a user profile.
    ///
    /// Visible to the profile owner and to global `admin` callers.
    pub async fn get_user(&self, principal: &Principal, user_id: UserId) -> AppResult<UserRecord> {
        if !self.authorization.can_view_user(principal, user_id) {
            return Err(AppError::Forbidden(
                "you may only view your own profile".to_owned(),
            ));
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }

    /// Lists every user account.
    ///
    /// Restricted to global `admin` and `manager` callers.
    pub async fn list_users(&self, principal: &Principal) -> AppResult<Vec<UserRecord>> {
        if !self.authorization.can_list_users(principal) {
            return Err(AppError::Forbidden(
                "only administrators and managers can list users".to_owned(),
            ));
        }

        self.users.list().await
    }
}
