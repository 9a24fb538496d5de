//! Database initialization.
//!
//! # Usage
//!
//! ```bash
//! geo-cli init
//! ```
//!
//! Creates the database file and the `addresses` table. Safe to run against
//! an existing database.

use super::{CliError, connect};

/// Create the database file and schema.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// opened.
pub async fn run() -> Result<(), CliError> {
    let (config, pool) = connect().await?;
    pool.close().await;

    tracing::info!(
        path = %config.database_path.display(),
        "Address database initialized"
    );
    Ok(())
}
