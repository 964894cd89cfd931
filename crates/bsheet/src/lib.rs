#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Summary balance sheets from structured regulatory filings.
//!
//! This crate re-exports the core types, the XBRL extraction layer and the
//! cache implementations, and provides a [`BalanceSheetService`] that runs
//! one extraction request end to end.
//!
//! # Features
//!
//! - `edinet` - EDINET code list, document search and package retrieval
//! - `cache-sqlite` - SQLite-based artifact caching

// Core types and traits
pub use bsheet_core::*;

// Extraction
pub use bsheet_xbrl::{Concept, Fact, FactIndex, ScopeQualifier, extract_balance_sheet};

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use bsheet_cache::SqliteCache;
pub use bsheet_cache::{InMemoryCache, NoopCache};

// Collaborators
#[cfg(feature = "edinet")]
pub use bsheet_edinet::{EdinetClient, EdinetConfig};

mod progress;
pub use progress::{ChannelProgress, ProgressEvent};

mod service;
pub use service::{BalanceSheetService, DEFAULT_LOOKBACK_DAYS};
