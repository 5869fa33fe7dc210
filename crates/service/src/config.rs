//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PROXIMITY_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `PROXIMITY_HOST` - Bind address (default: 127.0.0.1)
//! - `PROXIMITY_PORT` - Listen port (default: 3000)
//! - `PROXIMITY_CACHE_CAPACITY` - Max cached identities (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Resolution service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Maximum number of identities held in the in-process cache
    pub cache_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PROXIMITY_DATABASE_URL")?;
        let host = parse_host(&get_env_or_default("PROXIMITY_HOST", "127.0.0.1"))?;
        let port = parse_port(&get_env_or_default("PROXIMITY_PORT", "3000"))?;
        let cache_capacity =
            parse_cache_capacity(&get_env_or_default("PROXIMITY_CACHE_CAPACITY", "10000"))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            cache_capacity,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    value
        .parse()
        .map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidEnvVar("PROXIMITY_HOST".to_owned(), e.to_string())
        })
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::InvalidEnvVar("PROXIMITY_PORT".to_owned(), e.to_string())
    })
}

fn parse_cache_capacity(value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::InvalidEnvVar("PROXIMITY_CACHE_CAPACITY".to_owned(), e.to_string())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host() {
        assert!(parse_host("127.0.0.1").is_ok());
        assert!(parse_host("::1").is_ok());
        assert!(matches!(
            parse_host("not-an-ip"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("3000").unwrap(), 3000);
        assert!(parse_port("notaport").is_err());
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn test_parse_cache_capacity() {
        assert_eq!(parse_cache_capacity("10000").unwrap(), 10000);
        assert!(parse_cache_capacity("-1").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            cache_capacity: 10_000,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
