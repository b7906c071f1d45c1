use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use pandatur_core::{AppError, UserId};
use pandatur_domain::Locale;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub app_language: Locale,
    pub bootstrap_admin_user_id: Option<UserId>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = optional_env("DATABASE_URL");
        if migrate_only && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let app_language = optional_env("APP_LANGUAGE")
            .map(|value| {
                value.parse::<Locale>().map_err(|error| {
                    AppError::Validation(format!("invalid APP_LANGUAGE: {error}"))
                })
            })
            .transpose()?
            .unwrap_or_default();

        let bootstrap_admin_user_id = optional_env("BOOTSTRAP_ADMIN_USER_ID")
            .map(|value| {
                value.parse::<UserId>().map_err(|error| {
                    AppError::Validation(format!("invalid BOOTSTRAP_ADMIN_USER_ID: {error}"))
                })
            })
            .transpose()?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            app_language,
            bootstrap_admin_user_id,
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

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use pandatur_domain::Locale;

    use super::ApiConfig;

    fn config(api_host: &str) -> ApiConfig {
        ApiConfig {
            migrate_only: false,
            database_url: None,
            frontend_url: "http://localhost:5173".to_owned(),
            api_host: api_host.to_owned(),
            api_port: 3001,
            app_language: Locale::default(),
            bootstrap_admin_user_id: None,
        }
    }

    #[test]
    fn socket_address_combines_host_and_port() {
        let address = config("0.0.0.0").socket_address();
        assert!(matches!(address, Ok(address) if address.to_string() == "0.0.0.0:3001"));
    }

    #[test]
    fn socket_address_rejects_hostnames() {
        assert!(config("localhost").socket_address().is_err());
    }
}
