//! Collaborator traits for the I/O side of an extraction.
//!
//! This module defines the narrow contracts the orchestrator calls through:
//!
//! - [`Collaborator`] - Base trait for all collaborators
//! - [`CodeResolver`] - Ticker to filer identity
//! - [`FilingLocator`] - Filer to latest qualifying filing
//! - [`PackageRetriever`] - Filing to primary structured document

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    document::DocumentType,
    error::Result,
    types::{ExtractedDocument, FilerId, FilerIdentity, Filing, FilingId, Ticker},
};

/// Base trait for all collaborators.
pub trait Collaborator: Send + Sync + Debug {
    /// Returns the name of this collaborator (e.g., "EDINET").
    fn name(&self) -> &str;
}

/// Resolves tickers against a filer code registry.
#[async_trait]
pub trait CodeResolver: Collaborator {
    /// Looks up the filer registered under a security code.
    ///
    /// The registry is keyed by a numeric security code that is prefix-matched
    /// against the ticker, so `7203` matches the registered `72030`.
    ///
    /// # Errors
    /// [`ExtractError::CodeListUnavailable`](crate::ExtractError::CodeListUnavailable)
    /// when the registry cannot be loaded,
    /// [`ExtractError::TickerNotFound`](crate::ExtractError::TickerNotFound)
    /// when nothing matches.
    async fn lookup(&self, ticker: &Ticker) -> Result<FilerIdentity>;
}

/// Finds filings submitted by a filer.
#[async_trait]
pub trait FilingLocator: Collaborator {
    /// Finds the most recent filing of one of `document_types`.
    ///
    /// The search walks back from today over `lookback_days` days and returns
    /// on the first match.
    ///
    /// # Errors
    /// [`ExtractError::FilingNotFound`](crate::ExtractError::FilingNotFound)
    /// when the window holds no qualifying filing.
    async fn find_latest(
        &self,
        filer: &FilerId,
        document_types: &[DocumentType],
        lookback_days: u32,
    ) -> Result<Filing>;
}

/// Downloads filing packages and locates their primary document.
#[async_trait]
pub trait PackageRetriever: Collaborator {
    /// Fetches and unpacks a filing, returning its primary structured document.
    ///
    /// A full-detail document is preferred over an abbreviated summary
    /// variant when the package holds both.
    ///
    /// # Errors
    /// [`ExtractError::DocumentUnavailable`](crate::ExtractError::DocumentUnavailable)
    /// when download or unpacking fails,
    /// [`ExtractError::StructuredDocumentMissing`](crate::ExtractError::StructuredDocumentMissing)
    /// when the package holds no primary document.
    async fn fetch_and_extract(&self, filing: &FilingId) -> Result<ExtractedDocument>;
}
