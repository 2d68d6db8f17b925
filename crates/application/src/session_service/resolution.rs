use super::*;

impl SessionService {
    /// Resolves a bearer token into a live principal.
    ///
    /// Verifies the token, then re-reads the subject from storage. A subject
    /// that has been deleted or deactivated since issuance fails with
    /// `AccountInactive` even though the token itself is still
    /// cryptographically valid; this is the sole revocation mechanism. The
    /// returned principal carries the freshly read role, not the role
    /// embedded in the token, so role changes apply on the next request.
    pub async fn resolve_principal(&self, token: &str) -> AppResult<Principal> {
        let claims = self.token_codec.verify(token)?;

        let user = self.users.find_by_id(claims.subject_id).await?;

        let Some(user) = user else {
            return Err(AppError::AccountInactive);
        };

        if !user.is_active {
            return Err(AppError::AccountInactive);
        }

        Ok(Principal::new(user.id, user.global_role, user.is_active))
    }

    /// Returns the full user record behind a principal.
    pub async fn current_user(&self, principal: &Principal) -> AppResult<UserRecord> {
        self.users
            .find_by_id(principal.user_id())
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }
}
