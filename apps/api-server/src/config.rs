//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first by `main`.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockroom_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// SQLite connection string (`sqlite::memory:` allowed)
    pub database_url: String,

    /// Bind address
    pub http_host: String,

    /// Bind port
    pub http_port: u16,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ApiConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://stockroom.db".to_string()),

            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            http_port: parse_var("HTTP_PORT", 8000)?,

            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,

            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Database settings derived from this configuration.
    ///
    /// Any in-memory URL gets the single-connection pool; a second
    /// connection would open a separate, empty database.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_url);
        let config = if config.is_in_memory() {
            DbConfig {
                database_url: self.database_url.clone(),
                ..DbConfig::in_memory()
            }
        } else {
            config.max_connections(self.db_max_connections)
        };
        config.run_migrations(self.run_migrations)
    }
}

/// Reads `name`, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
