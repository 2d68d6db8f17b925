use super::*;

impl SessionService {
    /// Registers a new account and opens a session for it.
    ///
    /// Unauthenticated callers always receive the default `user` role.
    /// Requesting any other role requires an authenticated global `admin`.
    pub async fn register(
        &self,
        principal: Option<&Principal>,
        params: RegisterParams,
    ) -> AppResult<AuthenticatedSession> {
        let username = Username::new(params.username)?;
        let email = EmailAddress::new(params.email)?;
        validate_password(&params.password)?;

        let global_role = params.global_role.unwrap_or(GlobalRole::User);
        if global_role != GlobalRole::User {
            let Some(principal) = principal else {
                return Err(AppError::AuthenticationRequired);
            };
            if !has_global_role(principal, &[GlobalRole::Admin]) {
                return Err(AppError::Forbidden(
                    "only administrators can assign global roles".to_owned(),
                ));
            }
        }

        if self
            .users
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("username is already taken".to_owned()));
        }

        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AppError::Conflict(
                "email address is already registered".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;
        let user = self
            .users
            .create(NewUserRecord {
                username: username.into(),
                email: email.into(),
                password_hash,
                global_role,
            })
            .await?;

        let token = self.token_codec.issue(user.id, user.global_role)?;

        Ok(AuthenticatedSession { token, user })
    }
}
