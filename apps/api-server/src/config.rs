//! Application configuration loaded from environment variables.

use std::env;

use rongdhonu_infra::DatabaseConfig;

/// Credentials of the single account allowed to obtain tokens.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub admin: Option<AdminCredentials>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        });

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD_HASH")) {
            (Ok(username), Ok(password_hash)) => Some(AdminCredentials {
                username,
                password_hash,
            }),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database,
            admin,
        }
    }
}
