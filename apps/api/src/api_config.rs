use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use vault_core::AppError;
use vault_infrastructure::VaultTables;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub app_base_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub tables: VaultTables,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(10);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let app_base_url = validate_base_url(env::var("APP_BASE_URL").unwrap_or_default())?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let tables = VaultTables::from_names(
            &env_or("VAULT_ROLES_TABLE", "roles"),
            &env_or("VAULT_ASSIGNED_ROLES_TABLE", "assigned_roles"),
            &env_or("VAULT_PERMISSIONS_TABLE", "permissions"),
            &env_or("VAULT_PERMISSION_ROLE_TABLE", "permission_role"),
            &env_or("VAULT_USERS_TABLE", "users"),
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            app_base_url,
            api_host,
            api_port,
            tables,
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

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Rendered route URLs are embedded in HTML attributes, so the prefix must not
/// contain quoting or markup characters.
fn validate_base_url(value: String) -> Result<String, AppError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed
        .chars()
        .any(|character| character.is_whitespace() || "\"'<>`".contains(character))
    {
        return Err(AppError::Validation(format!(
            "APP_BASE_URL contains characters that are not allowed in a URL: '{value}'"
        )));
    }

    Ok(trimmed.to_owned())
}
