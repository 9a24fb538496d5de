//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ApiConfig;
use crate::db::AddressRepository;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The pool is opened once in
/// `main` (or by a test) and injected here; handlers never open their own
/// connections.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `SQLite` connection pool with the schema already initialized
    #[must_use]
    pub fn new(config: ApiConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Address repository bound to the shared pool.
    #[must_use]
    pub fn addresses(&self) -> AddressRepository<'_> {
        AddressRepository::new(&self.inner.pool)
    }
}
