//! Filing document categories.
//!
//! This module defines [`DocumentType`], the report categories a filing search
//! accepts as carrying a balance sheet.

use serde::{Deserialize, Serialize};

/// Category of a disclosure document, keyed by its EDINET type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Annual securities report (code 120).
    AnnualReport,
    /// Quarterly report (code 140).
    QuarterlyReport,
    /// Semi-annual report (code 160).
    SemiAnnualReport,
}

impl DocumentType {
    /// Document types searched when none are configured.
    pub const DEFAULT: &'static [Self] = &[
        Self::AnnualReport,
        Self::QuarterlyReport,
        Self::SemiAnnualReport,
    ];

    /// Returns the registry type code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AnnualReport => "120",
            Self::QuarterlyReport => "140",
            Self::SemiAnnualReport => "160",
        }
    }

    /// Looks up a document type by its registry code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "120" => Some(Self::AnnualReport),
            "140" => Some(Self::QuarterlyReport),
            "160" => Some(Self::SemiAnnualReport),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for doc_type in DocumentType::DEFAULT {
            assert_eq!(DocumentType::from_code(doc_type.code()), Some(*doc_type));
        }
        assert_eq!(DocumentType::from_code("350"), None);
    }
}
