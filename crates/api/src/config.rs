//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ADDRESSES_DATABASE_PATH` - `SQLite` file path (default: `addresses.db`,
//!   falls back to `DATABASE_PATH`)
//! - `ADDRESSES_HOST` - Bind address (default: 127.0.0.1)
//! - `ADDRESSES_PORT` - Listen port (default: 8000)
//! - `ADDRESSES_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "addresses.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for the tracing fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Path of the `SQLite` database file (created if absent)
    pub database_path: PathBuf,
    /// Maximum number of pooled `SQLite` connections
    pub max_connections: u32,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = lookup("ADDRESSES_DATABASE_PATH")
            .or_else(|| lookup("DATABASE_PATH"))
            .map_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from);

        let max_connections: u32 = parse_or_default(&lookup, "ADDRESSES_DB_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ADDRESSES_DB_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_path,
            max_connections,
            host: parse_or_default(&lookup, "ADDRESSES_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or_default(&lookup, "ADDRESSES_PORT", 8000)?,
            log_format: parse_or_default(&lookup, "LOG_FORMAT", LogFormat::Text)?,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_or_default(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
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

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
