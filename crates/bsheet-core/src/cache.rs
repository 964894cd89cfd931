//! Cache trait for downloaded artifacts.
//!
//! This module defines the [`ArtifactCache`] trait collaborators use to avoid
//! re-downloading the code registry and filing packages. Extracted results are
//! never cached.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{error::Result, types::FilingId};

/// Key of a cached artifact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKey {
    /// The filer code registry archive.
    CodeList,
    /// A filing package archive.
    FilingPackage(FilingId),
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeList => f.write_str("code-list"),
            Self::FilingPackage(id) => write!(f, "package/{id}"),
        }
    }
}

/// A cached artifact with the time it was stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedArtifact {
    /// Raw artifact bytes.
    pub bytes: Vec<u8>,
    /// When the artifact was stored.
    pub cached_at: DateTime<Utc>,
}

impl CachedArtifact {
    /// Returns true if the artifact is older than `ttl`.
    #[must_use]
    pub fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Trait for caching downloaded artifacts.
///
/// Implementations can store data in various backends (SQLite, in-memory, etc.).
#[async_trait]
pub trait ArtifactCache: Send + Sync {
    /// Retrieves a cached artifact.
    ///
    /// Returns `Ok(Some(artifact))` if cached, `Ok(None)` if not cached.
    async fn get(&self, key: &ArtifactKey) -> Result<Option<CachedArtifact>>;

    /// Stores an artifact, replacing any previous entry for the key.
    async fn put(&self, key: &ArtifactKey, bytes: &[u8]) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(ArtifactKey::CodeList.to_string(), "code-list");
        assert_eq!(
            ArtifactKey::FilingPackage(FilingId::new("S100ABCD")).to_string(),
            "package/S100ABCD"
        );
    }

    #[test]
    fn test_staleness() {
        let artifact = CachedArtifact {
            bytes: vec![1, 2, 3],
            cached_at: Utc::now() - chrono::TimeDelta::hours(2),
        };
        assert!(artifact.is_stale(Duration::from_secs(3600)));
        assert!(!artifact.is_stale(Duration::from_secs(3 * 3600)));
    }
}
