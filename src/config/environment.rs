// ABOUTME: Environment variable based server configuration
// ABOUTME: All runtime settings come from the process environment, no config files

//! Server configuration loaded from environment variables.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. `sqlite:./data/macrolog.db`)
    pub url: String,
}

/// JWT authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret. When absent a random secret is
    /// generated at startup (tokens do not survive restarts).
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|e| AppError::config(format!("Invalid HTTP_PORT '{port}': {e}")))?,
            Err(_) => 8081,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/macrolog.db".into());

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(hours) => hours
                .parse()
                .map_err(|e| AppError::config(format!("Invalid JWT_EXPIRY_HOURS '{hours}': {e}")))?,
            Err(_) => 24,
        };

        Ok(Self {
            http_port,
            database: DatabaseConfig { url: database_url },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").ok(),
                jwt_expiry_hours,
            },
        })
    }

    /// One-line summary for startup logging (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} jwt_expiry_hours={} jwt_secret={}",
            self.http_port,
            self.database.url,
            self.auth.jwt_expiry_hours,
            if self.auth.jwt_secret.is_some() {
                "from-env"
            } else {
                "generated"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        std::env::remove_var("HTTP_PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("JWT_EXPIRY_HOURS");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.database.url, "sqlite:./data/macrolog.db");
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.auth.jwt_expiry_hours, 24);
    }

    #[test]
    #[serial]
    fn test_invalid_port_rejected() {
        std::env::set_var("HTTP_PORT", "not-a-port");
        let result = ServerConfig::from_env();
        std::env::remove_var("HTTP_PORT");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_summary_hides_secret() {
        std::env::set_var("JWT_SECRET", "super-secret-value");
        let config = ServerConfig::from_env().unwrap();
        std::env::remove_var("JWT_SECRET");
        assert!(!config.summary().contains("super-secret-value"));
    }
}
