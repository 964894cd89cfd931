//! In-memory cache implementation.

use async_trait::async_trait;
use bsheet_core::{ArtifactCache, ArtifactKey, CachedArtifact, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// In-memory artifact cache.
///
/// Artifacts live in a `RwLock`-protected `HashMap` and are lost when the
/// cache is dropped. Bytes are cloned on get and put.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<ArtifactKey, CachedArtifact>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached artifacts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ArtifactCache for InMemoryCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &ArtifactKey) -> Result<Option<CachedArtifact>> {
        let cache = self.entries.read().await;
        match cache.get(key) {
            Some(entry) => {
                debug!(bytes = entry.bytes.len(), "Cache hit");
                Ok(Some(entry.clone()))
            }
            None => {
                debug!("Cache miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, bytes), fields(key = %key, bytes = bytes.len()))]
    async fn put(&self, key: &ArtifactKey, bytes: &[u8]) -> Result<()> {
        let entry = CachedArtifact {
            bytes: bytes.to_vec(),
            cached_at: Utc::now(),
        };
        self.entries.write().await.insert(key.clone(), entry);
        debug!("Cached artifact");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.entries.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
