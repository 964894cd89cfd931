//! Error types for extraction requests.
//!
//! This module defines [`ExtractError`], covering every way a request can
//! fail before a fact index exists. Once facts are indexed, extraction is
//! total and degrades to zero values instead of failing.

use thiserror::Error;

/// Errors that can occur while extracting a balance sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The filer code registry could not be downloaded or read.
    #[error("Code list unavailable: {0}")]
    CodeListUnavailable(String),

    /// No registry entry matched the ticker.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// No qualifying filing was submitted inside the lookback window.
    #[error("No qualifying filing for {filer_id} in the last {lookback_days} days")]
    FilingNotFound {
        /// The filer that was searched.
        filer_id: String,
        /// Size of the searched window in days.
        lookback_days: u32,
    },

    /// The filing package could not be downloaded or unpacked.
    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),

    /// The package was valid but holds no primary structured document.
    #[error("Structured document missing: {0}")]
    StructuredDocumentMissing(String),

    /// The structured document is not well-formed markup.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error interacting with the artifact cache.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl ExtractError {
    /// Returns a stable tag naming the failure class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CodeListUnavailable(_) => "CodeListUnavailable",
            Self::TickerNotFound(_) => "TickerNotFound",
            Self::FilingNotFound { .. } => "FilingNotFound",
            Self::DocumentUnavailable(_) => "DocumentUnavailable",
            Self::StructuredDocumentMissing(_) => "StructuredDocumentMissing",
            Self::Parse(_) => "ParseError",
            Self::InvalidParameter(_) => "InvalidParameter",
            Self::Cache(_) => "Cache",
        }
    }
}

/// Result type alias using [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
