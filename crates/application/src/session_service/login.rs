use super::*;

impl SessionService {
    /// Authenticates a user by username and password and opens a session.
    ///
    /// Unknown username and wrong password fail with the same
    /// `InvalidCredentials` error so account existence cannot be probed.
    /// A correct password against a deactivated account fails with the
    /// distinct `AccountInactive` error: activation state is observable
    /// post-authentication, not a secret.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthenticatedSession> {
        let normalized = username.trim().to_lowercase();
        let user = self.users.find_by_username(&normalized).await?;

        let Some(user) = user else {
            // Hash anyway so the unknown-username path costs the same as a
            // failed verification.
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)
        {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountInactive);
        }

        let token = self.token_codec.issue(user.id, user.global_role)?;

        Ok(AuthenticatedSession { token, user })
    }
}
