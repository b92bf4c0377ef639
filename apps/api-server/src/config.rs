//! Application configuration loaded from environment variables.

use std::env;

use remindme_core::validation::PasswordPolicy;
use remindme_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub password_policy: PasswordPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
                ..defaults
            }
        });

        let mut password_policy = PasswordPolicy::default();
        if let Some(min_length) = parse_var("PASSWORD_MIN_LENGTH") {
            password_policy = password_policy.with_min_length(min_length);
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            password_policy,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}
