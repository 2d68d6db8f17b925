//! First-start administrator seeding.

use punchlist_application::{NewUserRecord, PasswordHasher, UserRepository};
use punchlist_core::AppResult;
use punchlist_domain::{EmailAddress, GlobalRole, Username, validate_password};
use tracing::info;

use crate::api_config::BootstrapAdminConfig;

/// Creates the initial administrator account if the configured username is
/// still free. An existing account under that username is left untouched,
/// which keeps the seeding idempotent across restarts.
pub async fn seed_bootstrap_admin(
    config: &BootstrapAdminConfig,
    users: &dyn UserRepository,
    password_hasher: &dyn PasswordHasher,
) -> AppResult<()> {
    let username = Username::new(config.username.as_str())?;
    let email = EmailAddress::new(config.email.as_str())?;
    validate_password(&config.password)?;

    if users.find_by_username(username.as_str()).await?.is_some() {
        info!(username = %username, "bootstrap admin already exists, skipping seed");
        return Ok(());
    }

    let password_hash = password_hasher.hash_password(&config.password)?;
    let user = users
        .create(NewUserRecord {
            username: username.into(),
            email: email.into(),
            password_hash,
            global_role: GlobalRole::Admin,
        })
        .await?;

    info!(
        user_id = %user.id,
        username = %user.username,
        "bootstrap admin account created"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use punchlist_application::UserRepository;
    use punchlist_domain::GlobalRole;
    use punchlist_infrastructure::{Argon2PasswordHasher, InMemoryUserRepository};

    use super::seed_bootstrap_admin;
    use crate::api_config::BootstrapAdminConfig;

    fn admin_config() -> BootstrapAdminConfig {
        BootstrapAdminConfig {
            username: "root-admin".to_owned(),
            email: "root@punchlist.dev".to_owned(),
            password: "a-long-enough-passphrase".to_owned(),
        }
    }

    #[tokio::test]
    async fn seeding_creates_an_admin_once() {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2PasswordHasher::with_params(1024, 1, 1);
        let config = admin_config();

        seed_bootstrap_admin(&config, users.as_ref(), &hasher)
            .await
            .unwrap_or_else(|_| unreachable!());

        let seeded = users
            .find_by_username("root-admin")
            .await
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|| unreachable!());
        assert_eq!(seeded.global_role, GlobalRole::Admin);
        assert!(seeded.is_active);

        // A second run finds the account and leaves it alone.
        seed_bootstrap_admin(&config, users.as_ref(), &hasher)
            .await
            .unwrap_or_else(|_| unreachable!());
        let all = users.list().await.unwrap_or_else(|_| unreachable!());
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn an_existing_account_is_never_escalated() {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2PasswordHasher::with_params(1024, 1, 1);

        users
            .create(punchlist_application::NewUserRecord {
                username: "root-admin".to_owned(),
                email: "squatter@punchlist.dev".to_owned(),
                password_hash: "digest".to_owned(),
                global_role: GlobalRole::User,
            })
            .await
            .unwrap_or_else(|_| unreachable!());

        seed_bootstrap_admin(&admin_config(), users.as_ref(), &hasher)
            .await
            .unwrap_or_else(|_| unreachable!());

        let existing = users
            .find_by_username("root-admin")
            .await
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|| unreachable!());
        assert_eq!(existing.global_role, GlobalRole::User);
    }

    #[tokio::test]
    async fn invalid_credentials_fail_the_seed() {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2PasswordHasher::with_params(1024, 1, 1);

        let mut config = admin_config();
        config.email = "not-an-email".to_owned();

        let result = seed_bootstrap_admin(&config, users.as_ref(), &hasher).await;
        assert!(result.is_err());

        let mut config = admin_config();
        config.password = "short".to_owned();

        let result = seed_bootstrap_admin(&config, users.as_ref(), &hasher).await;
        assert!(result.is_err());
    }
}
