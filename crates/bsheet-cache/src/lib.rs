#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Artifact cache implementations.
//!
//! This crate provides implementations of the [`ArtifactCache`] trait from `bsheet-core`:
//!
//! - [`SqliteCache`] - Persistent SQLite-based cache (default, requires `sqlite` feature)
//! - [`InMemoryCache`] - Process-lifetime cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

/// SQLite-based cache implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use bsheet_core::{ArtifactCache, ArtifactKey, CachedArtifact};

pub use memory::InMemoryCache;
pub use noop::NoopCache;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCache;
