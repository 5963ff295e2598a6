//! Application configuration loaded from environment variables.

use std::env;

use posts_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
}

/// Bearer-token gate settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// When false every request runs as the anonymous principal.
    pub enabled: bool,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            auth: AuthConfig {
                enabled: env::var("AUTH_ENABLED")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(true),
                jwt: JwtConfig::from_env(),
            },
        }
    }
}

/// Anything but an explicit "off" value counts as enabled.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
