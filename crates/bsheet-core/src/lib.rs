#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for filing-based balance sheets.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`BalanceSheet`](record::BalanceSheet) - The extracted summary record
//! - [`reconcile`](reconcile::reconcile) - Balance reconciliation
//! - [`CodeResolver`](provider::CodeResolver) - Ticker to filer identity
//! - [`FilingLocator`](provider::FilingLocator) - Latest qualifying filing
//! - [`PackageRetriever`](provider::PackageRetriever) - Primary structured document
//! - [`ProgressSink`](progress::ProgressSink) - Progress checkpoints
//! - [`ArtifactCache`](cache::ArtifactCache) - Caching abstraction

/// Cache trait and types for downloaded artifacts.
pub mod cache;
/// Filing document categories.
pub mod document;
/// Error types for extraction requests.
pub mod error;
/// Progress checkpoints and sinks.
pub mod progress;
/// Collaborator traits for registry, search and retrieval.
pub mod provider;
/// Balance reconciliation.
pub mod reconcile;
/// The summary balance sheet record.
pub mod record;
/// Identifier and collaborator-facing types.
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{ArtifactCache, ArtifactKey, CachedArtifact};
pub use document::DocumentType;
pub use error::{ExtractError, Result};
pub use progress::{NoopProgress, Phase, ProgressSink};
pub use provider::{Collaborator, CodeResolver, FilingLocator, PackageRetriever};
pub use reconcile::reconcile;
pub use record::{Adjustment, Amount, BalanceSheet, DetailFigures, SafetyAssessment};
pub use types::{ExtractedDocument, FilerId, FilerIdentity, Filing, FilingId, Ticker};
