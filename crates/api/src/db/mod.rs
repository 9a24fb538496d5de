//! Database operations for the address store.
//!
//! # Database: `SQLite` file
//!
//! A single local file, created on first start if absent.
//!
//! ## Tables
//!
//! - `addresses` - Postal addresses with geocoordinates
//!
//! There are no migrations. [`initialize`] issues `CREATE TABLE IF NOT EXISTS`
//! and is safe to run on every start.

pub mod addresses;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub use addresses::AddressRepository;

/// DDL for the address table.
pub const CREATE_ADDRESSES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS addresses (
    id integer PRIMARY KEY,
    street text NOT NULL,
    city text NOT NULL,
    state text NOT NULL,
    country text NOT NULL,
    latitude real NOT NULL,
    longitude real NOT NULL
)
";

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., duplicate address id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Open a `SQLite` connection pool, creating the database file if missing.
///
/// # Arguments
///
/// * `path` - Location of the database file
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the parent directory cannot be created or the
/// file cannot be opened.
pub async fn create_pool(path: &Path, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(sqlx::Error::Io)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Concurrent writers wait instead of failing with "database is locked".
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Ensure the `addresses` table exists.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn initialize(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(CREATE_ADDRESSES_TABLE).execute(pool).await?;
    Ok(())
}

/// Open the database at `path` and create the schema.
///
/// Convenience for binaries and tests that need a ready-to-use store.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the file cannot be opened or the
/// schema cannot be created.
pub async fn open(path: &Path, max_connections: u32) -> Result<SqlitePool, RepositoryError> {
    let pool = create_pool(path, max_connections).await?;
    initialize(&pool).await?;
    Ok(pool)
}
