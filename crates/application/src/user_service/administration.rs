use super::*;

impl UserService {
    /// Applies a partial profile update.
    ///
    /// Allowed for the profile owner and for global `admin` callers.
    pub async fn update_user(
        &self,
        principal: &Principal,
        user_id: UserId,
        update: UpdateUserInput,
    ) -> AppResult<UserRecord> {
        if !self.authorization.can_edit_user(principal, user_id) {
            return Err(AppError::Forbidden(
                "you may only edit your own profile".to_owned(),
            ));
        }

        let Some(email) = update.email else {
            return self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("user not found".to_owned()));
        };

        let email = EmailAddress::new(email)?;

        if let Some(existing) = self.users.find_by_email(email.as_str()).await?
            && existing.id != user_id
        {
            return Err(AppError::Conflict(
                "email address is already registered".to_owned(),
            ));
        }

        self.users.update_email(user_id, email.as_str()).await
    }

    /// Replaces a user's global role.
    ///
    /// Restricted to global `admin` callers.
    pub async fn set_global_role(
        &self,
        principal: &Principal,
        user_id: UserId,
        role: GlobalRole,
    ) -> AppResult<UserRecord> {
        self.authorization.require_global_role(
            principal,
            &[GlobalRole::Admin],
            Some("only administrators can change global roles"),
        )?;

        self.users.set_global_role(user_id, role).await
    }

    /// Activates or deactivates an account.
    ///
    /// Restricted to global `admin` callers. Deactivation takes effect on
    /// the subject's very next request: principal resolution rereads the
    /// account and refuses inactive subjects, which revokes all their
    /// outstanding tokens at once.
    pub async fn set_active(
        &self,
        principal: &Principal,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        self.authorization.require_global_role(
            principal,
            &[GlobalRole::Admin],
            Some("only administrators can change account status"),
        )?;

        self.users.set_active(user_id, is_active).await
    }
}
