//! No-op cache implementation.

use async_trait::async_trait;
use bsheet_core::{ArtifactCache, ArtifactKey, CachedArtifact, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` always returns `Ok(())`.
/// Useful for disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactCache for NoopCache {
    async fn get(&self, key: &ArtifactKey) -> Result<Option<CachedArtifact>> {
        trace!(%key, "NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, key: &ArtifactKey, _bytes: &[u8]) -> Result<()> {
        trace!(%key, "NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsheet_core::FilingId;

    #[tokio::test]
    async fn test_noop_cache_never_hits() {
        let cache = NoopCache::new();
        let key = ArtifactKey::FilingPackage(FilingId::new("S100TEST"));

        cache.put(&key, b"package").await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
        assert!(cache.get(&ArtifactKey::CodeList).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_noop_cache_management() {
        let cache = NoopCache::new();
        let removed = cache
            .invalidate_stale(Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(removed, 0);
        assert!(cache.clear().await.is_ok());
    }
}
