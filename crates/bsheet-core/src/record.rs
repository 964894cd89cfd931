//! The summary balance sheet produced by one extraction.
//!
//! - [`BalanceSheet`] - Five summary lines, totals, details and provenance
//! - [`DetailFigures`] - Bottom-up detail lines
//! - [`Adjustment`] - A figure changed by reconciliation
//! - [`SafetyAssessment`] - Coarse grading of the equity ratio

use serde::{Deserialize, Serialize};

use crate::types::{FilerId, FilingId, Ticker};

/// Monetary amount in the filing's reporting currency unit.
pub type Amount = i64;

/// Detail figures resolved alongside the summary lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailFigures {
    /// Cash and deposits.
    pub cash: Amount,
    /// Trade notes and accounts receivable.
    pub receivables: Amount,
    /// Inventories.
    pub inventories: Amount,
    /// Property, plant and equipment.
    pub property_plant_and_equipment: Amount,
    /// Intangible assets.
    pub intangible_assets: Amount,
    /// Investments and other non-current assets.
    pub investments_and_other_assets: Amount,
    /// Trade notes and accounts payable.
    pub accounts_payable: Amount,
    /// Borrowings, bonds and commercial paper.
    pub interest_bearing_debt: Amount,
    /// Retained earnings.
    pub retained_earnings: Amount,
    /// Shareholders' equity (owners of the parent).
    pub shareholders_equity: Amount,
}

/// A change the reconciler made to a draft record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Total assets set from the sum of the asset lines.
    TotalAssetsFromLines {
        /// The value assigned.
        value: Amount,
    },
    /// Total assets set from the liabilities and net assets side.
    TotalAssetsFromClaims {
        /// The value assigned.
        value: Amount,
    },
    /// Reported total assets replaced by larger asset lines.
    TotalAssetsRaised {
        /// The value assigned.
        value: Amount,
    },
    /// Non-current assets raised to absorb unclassified assets.
    NonCurrentAssetsRaised {
        /// Amount added.
        by: Amount,
    },
    /// Total liabilities inferred as total assets less net assets.
    TotalLiabilitiesInferred {
        /// The value assigned.
        value: Amount,
    },
    /// Net assets inferred as total assets less total liabilities.
    NetAssetsInferred {
        /// The value assigned.
        value: Amount,
    },
    /// Non-current liabilities raised to absorb unclassified liabilities.
    NonCurrentLiabilitiesRaised {
        /// Amount added.
        by: Amount,
    },
    /// Reported total liabilities replaced by larger liability lines.
    TotalLiabilitiesRaised {
        /// The value assigned.
        value: Amount,
    },
    /// Residual imbalance added to net assets.
    NetAssetsPlugged {
        /// Amount added, possibly negative.
        residual: Amount,
    },
}

/// Financial safety grade derived from the equity ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyAssessment {
    /// Equity ratio above 50%.
    Strong,
    /// Equity ratio above 20%.
    Standard,
    /// Equity ratio of 20% or less.
    Weak,
}

/// Summary balance sheet of one filing.
///
/// Built incrementally during extraction, then reconciled so that
/// `current_assets + non_current_assets` equals
/// `current_liabilities + non_current_liabilities + net_assets`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Ticker the request was made for.
    pub ticker: Option<Ticker>,
    /// Filer the figures belong to.
    pub filer_id: Option<FilerId>,
    /// Filing the figures were read from.
    pub filing_id: Option<FilingId>,
    /// Entity name.
    pub entity_name: String,
    /// Industry classification.
    pub industry: String,

    // Summary lines
    /// Current assets.
    pub current_assets: Amount,
    /// Non-current assets.
    pub non_current_assets: Amount,
    /// Current liabilities.
    pub current_liabilities: Amount,
    /// Non-current liabilities.
    pub non_current_liabilities: Amount,
    /// Net assets.
    pub net_assets: Amount,

    // Totals
    /// Total assets.
    pub total_assets: Amount,
    /// Total liabilities.
    pub total_liabilities: Amount,

    /// Detail figures.
    pub details: DetailFigures,

    /// Reconciliation steps applied, in order.
    pub adjustments: Vec<Adjustment>,
}

impl BalanceSheet {
    /// Creates an empty record for an entity.
    #[must_use]
    pub fn new(entity_name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            industry: industry.into(),
            ..Default::default()
        }
    }

    /// Sum of the asset lines.
    #[must_use]
    pub const fn assets_side(&self) -> Amount {
        self.current_assets.saturating_add(self.non_current_assets)
    }

    /// Sum of the liability lines and net assets.
    #[must_use]
    pub const fn claims_side(&self) -> Amount {
        self.current_liabilities
            .saturating_add(self.non_current_liabilities)
            .saturating_add(self.net_assets)
    }

    /// Returns true if both sides of the balance sheet agree.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.assets_side() == self.claims_side()
    }

    /// Returns false when nothing was found to report.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.total_assets != 0
    }

    /// Returns true if reconciliation had to plug a residual into net assets.
    #[must_use]
    pub fn is_approximate(&self) -> bool {
        self.adjustments
            .iter()
            .any(|a| matches!(a, Adjustment::NetAssetsPlugged { .. }))
    }

    /// Net assets over total assets.
    #[must_use]
    pub fn equity_ratio(&self) -> Option<f64> {
        (self.total_assets > 0).then(|| self.net_assets as f64 / self.total_assets as f64)
    }

    /// Current assets over current liabilities.
    #[must_use]
    pub fn current_ratio(&self) -> Option<f64> {
        (self.current_liabilities > 0)
            .then(|| self.current_assets as f64 / self.current_liabilities as f64)
    }

    /// Interest-bearing debt over net assets.
    #[must_use]
    pub fn debt_to_equity(&self) -> Option<f64> {
        (self.net_assets > 0)
            .then(|| self.details.interest_bearing_debt as f64 / self.net_assets as f64)
    }

    /// Grades the equity ratio.
    #[must_use]
    pub fn assessment(&self) -> Option<SafetyAssessment> {
        let ratio = self.equity_ratio()?;
        Some(if ratio > 0.5 {
            SafetyAssessment::Strong
        } else if ratio > 0.2 {
            SafetyAssessment::Standard
        } else {
            SafetyAssessment::Weak
        })
    }
}
