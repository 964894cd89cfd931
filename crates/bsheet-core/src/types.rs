//! Core identifier and collaborator-facing types.
//!
//! - [`Ticker`] - Security code entered by the caller
//! - [`FilerId`] - Registry identifier of a filing entity
//! - [`FilingId`] - Identifier of one submitted filing
//! - [`FilerIdentity`] - Result of a registry lookup
//! - [`Filing`] - Result of a filing search
//! - [`ExtractedDocument`] - Primary structured document on disk

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

use crate::document::DocumentType;
use crate::error::{ExtractError, Result};

/// A security code such as `7203` or `130A`.
///
/// Tickers are trimmed and uppercased on creation and must be non-empty ASCII
/// alphanumerics, because they are prefix-matched against the code registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a ticker, rejecting empty or non-alphanumeric input.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidParameter`] for an unusable code.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let code = s.as_ref().trim().to_uppercase();
        if code.is_empty() {
            return Err(ExtractError::InvalidParameter("Empty ticker".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ExtractError::InvalidParameter(format!(
                "Ticker must be alphanumeric: {code}"
            )));
        }
        Ok(Self(code))
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Registry identifier of a filer (an EDINET code such as `E02144`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilerId(String);

impl FilerId {
    /// Creates a filer id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one submitted filing (an EDINET `docID`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilingId(String);

impl FilingId {
    /// Creates a filing id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filer identity returned by a code registry lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilerIdentity {
    /// Registry identifier.
    pub filer_id: FilerId,
    /// Entity name as registered.
    pub entity_name: String,
    /// Industry classification as registered.
    pub industry: String,
}

impl FilerIdentity {
    /// Creates a filer identity.
    #[must_use]
    pub fn new(
        filer_id: FilerId,
        entity_name: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            filer_id,
            entity_name: entity_name.into(),
            industry: industry.into(),
        }
    }
}

/// A filing located by a document search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// Filing identifier.
    pub id: FilingId,
    /// Category of the filing.
    pub document_type: DocumentType,
    /// Date the filing was listed on.
    pub filed_on: NaiveDate,
}

/// The primary structured document of a filing package.
///
/// When the package was unpacked into a scratch directory, that directory is
/// owned here and removed when the document is dropped.
#[derive(Debug)]
pub struct ExtractedDocument {
    path: PathBuf,
    workspace: Option<TempDir>,
}

impl ExtractedDocument {
    /// Wraps a document that lives outside any scratch directory.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workspace: None,
        }
    }

    /// Wraps a document inside a scratch directory owned by this value.
    #[must_use]
    pub fn in_workspace(path: impl Into<PathBuf>, workspace: TempDir) -> Self {
        Self {
            path: path.into(),
            workspace: Some(workspace),
        }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the document is removed when this value drops.
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        self.workspace.is_some()
    }

    /// Reads the document into memory.
    ///
    /// # Errors
    /// Returns [`ExtractError::DocumentUnavailable`] if the file cannot be read.
    pub fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            ExtractError::DocumentUnavailable(format!("{}: {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalization() {
        let ticker = Ticker::new(" 130a ").unwrap();
        assert_eq!(ticker.as_str(), "130A");
        assert_eq!("7203".parse::<Ticker>().unwrap().to_string(), "7203");
    }

    #[test]
    fn test_ticker_rejects_bad_input() {
        assert!(matches!(
            Ticker::new("   "),
            Err(ExtractError::InvalidParameter(_))
        ));
        assert!(Ticker::new("72-03").is_err());
    }

    #[test]
    fn test_scoped_document_is_removed_on_drop() {
        let workspace = tempfile::tempdir().unwrap();
        let path = workspace.path().join("doc.xbrl");
        std::fs::write(&path, b"<xbrl/>").unwrap();

        let doc = ExtractedDocument::in_workspace(&path, workspace);
        assert!(doc.is_scoped());
        assert_eq!(doc.read().unwrap(), b"<xbrl/>");

        drop(doc);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_document_is_unavailable() {
        let doc = ExtractedDocument::new("/nonexistent/bsheet/doc.xbrl");
        assert!(matches!(
            doc.read(),
            Err(ExtractError::DocumentUnavailable(_))
        ));
    }
}
