use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use punchlist_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub session_signing_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub argon2_m_cost_kib: u32,
    pub argon2_t_cost: u32,
    pub argon2_p_cost: u32,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// Credentials for the administrator account seeded on first start.
#[derive(Debug, Clone)]
pub struct BootstrapAdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let session_signing_secret = required_env("SESSION_SIGNING_SECRET")?;
        if session_signing_secret.len() < 32 {
            return Err(AppError::Validation(
                "SESSION_SIGNING_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        // OWASP Password Storage defaults for Argon2id.
        let argon2_m_cost_kib = env_u32("ARGON2_M_COST_KIB", 19_456)?;
        let argon2_t_cost = env_u32("ARGON2_T_COST", 2)?;
        let argon2_p_cost = env_u32("ARGON2_P_COST", 1)?;

        Ok(Self {
            migrate_only,
            database_url,
            session_signing_secret,
            api_host,
            api_port,
            argon2_m_cost_kib,
            argon2_t_cost,
            argon2_p_cost,
            bootstrap_admin: bootstrap_admin_from_env()?,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn env_u32(name: &str, default: u32) -> Result<u32, AppError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u32>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        Err(_) => Ok(default),
    }
}

/// Reads the `BOOTSTRAP_ADMIN_*` variable trio. The three must be set
/// together or not at all.
fn bootstrap_admin_from_env() -> Result<Option<BootstrapAdminConfig>, AppError> {
    let username = env::var("BOOTSTRAP_ADMIN_USERNAME").ok();
    let email = env::var("BOOTSTRAP_ADMIN_EMAIL").ok();
    let password = env::var("BOOTSTRAP_ADMIN_PASSWORD").ok();

    match (username, email, password) {
        (Some(username), Some(email), Some(password)) => Ok(Some(BootstrapAdminConfig {
            username,
            email,
            password,
        })),
        (None, None, None) => Ok(None),
        _ => Err(AppError::Validation(
            "BOOTSTRAP_ADMIN_USERNAME, BOOTSTRAP_ADMIN_EMAIL, and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                .to_owned(),
        )),
    }
}
