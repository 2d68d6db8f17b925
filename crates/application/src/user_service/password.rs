use super::*;

impl UserService {
    /// Changes the password for an account.
    ///
    /// Strictly self-service: even administrators cannot set another user's
    /// password. Requires the current password.
    pub async fn change_password(
        &self,
        principal: &Principal,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if principal.user_id() != user_id {
            return Err(AppError::Forbidden(
                "you may only change your own password".to_owned(),
            ));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

        if !self
            .password_hasher
            .verify_password(current_password, &user.password_hash)
        {
            return Err(AppError::InvalidCredentials);
        }

        validate_password(new_password)?;

        let new_hash = self.password_hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &new_hash).await
    }
}
