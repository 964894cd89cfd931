//! SQLite-based cache implementation.

use async_trait::async_trait;
use bsheet_core::{ArtifactCache, ArtifactKey, CachedArtifact, ExtractError, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};

/// SQLite-based artifact cache.
///
/// Stores artifacts in a SQLite database file so the code registry and filing
/// packages survive application restarts.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(cache_err)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS artifact_cache (
                key TEXT PRIMARY KEY NOT NULL,
                bytes BLOB NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(cache_err)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_artifact_cached_at
             ON artifact_cache(cached_at)",
            [],
        )
        .map_err(cache_err)?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }

    fn put_at(&self, key: &ArtifactKey, bytes: &[u8], cached_at: DateTime<Utc>) -> Result<()> {
        let conn = self.conn.lock().map_err(cache_err)?;
        conn.execute(
            "INSERT OR REPLACE INTO artifact_cache (key, bytes, cached_at)
             VALUES (?1, ?2, ?3)",
            params![key.to_string(), bytes, cached_at.to_rfc3339()],
        )
        .map_err(cache_err)?;
        Ok(())
    }
}

fn cache_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Cache(e.to_string())
}

#[async_trait]
impl ArtifactCache for SqliteCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &ArtifactKey) -> Result<Option<CachedArtifact>> {
        let conn = self.conn.lock().map_err(cache_err)?;

        let row = conn
            .query_row(
                "SELECT bytes, cached_at FROM artifact_cache WHERE key = ?1",
                params![key.to_string()],
                |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(cache_err)?;

        match row {
            Some((bytes, cached_at)) => {
                let cached_at = DateTime::parse_from_rfc3339(&cached_at)
                    .map_err(|e| ExtractError::Cache(format!("Invalid cache timestamp: {e}")))?
                    .with_timezone(&Utc);
                debug!(bytes = bytes.len(), "Cache hit");
                Ok(Some(CachedArtifact { bytes, cached_at }))
            }
            None => {
                debug!("Cache miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, bytes), fields(key = %key, bytes = bytes.len()))]
    async fn put(&self, key: &ArtifactKey, bytes: &[u8]) -> Result<()> {
        self.put_at(key, bytes, Utc::now())?;
        debug!("Cached artifact");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl)
                .map_err(|e| ExtractError::Cache(format!("Invalid TTL duration: {e}")))?;

        let conn = self.conn.lock().map_err(cache_err)?;
        let deleted = conn
            .execute(
                "DELETE FROM artifact_cache WHERE cached_at < ?1",
                params![cutoff.to_rfc3339()],
            )
            .map_err(cache_err)?;

        if deleted > 0 {
            debug!("Invalidated {} stale cache entries", deleted);
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(cache_err)?;
        conn.execute("DELETE FROM artifact_cache", [])
            .map_err(cache_err)?;
        debug!("Cleared all cache entries");
        Ok(())
    }
}
