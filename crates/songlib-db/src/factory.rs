//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use songlib_core::ports::SongDetailPort;
use songlib_core::services::AppCore;

use crate::repositories::SqliteSongStore;

/// Factory for creating store instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Open a pool at `database_url` with the schema applied.
    pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
        crate::setup::setup_database(database_url).await
    }

    /// Create a song store from a pool.
    pub fn song_store(pool: SqlitePool) -> Arc<SqliteSongStore> {
        Arc::new(SqliteSongStore::new(pool))
    }

    /// Build a complete `AppCore` from a pool and a detail lookup.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use songlib_db::{CoreFactory, setup_database};
    ///
    /// let pool = setup_database("sqlite://songlib.db").await?;
    /// let detail = Arc::new(DefaultDetailClient::new(config)?);
    /// let core = CoreFactory::build_app_core(pool, detail);
    /// ```
    pub fn build_app_core(pool: SqlitePool, detail: Arc<dyn SongDetailPort>) -> AppCore {
        AppCore::new(Self::song_store(pool), detail)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a song store using this test database.
    pub fn song_store(&self) -> SqliteSongStore {
        SqliteSongStore::new(self.pool.clone())
    }
}
