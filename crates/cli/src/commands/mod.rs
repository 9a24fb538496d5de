//! CLI subcommands.
//!
//! Every command reads the same environment variables as the API server
//! (see `geo_addresses_api::config`), so `geo-cli` and the server always
//! agree on which database file they use.

pub mod init;
pub mod nearby;
pub mod seed;

use sqlx::SqlitePool;
use thiserror::Error;

use geo_addresses_api::config::{ApiConfig, ConfigError};
use geo_addresses_api::db::{self, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a valid address list.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load configuration and open the database, creating the table if needed.
async fn connect() -> Result<(ApiConfig, SqlitePool), CliError> {
    let config = ApiConfig::from_env()?;
    tracing::info!(path = %config.database_path.display(), "Opening address database");
    let pool = db::open(&config.database_path, 1).await?;
    Ok((config, pool))
}
