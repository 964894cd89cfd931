//! Scope qualifier scoring.
//!
//! A fact's scope qualifier (its context reference) says which period, which
//! measurement nature and which consolidation level the value belongs to.
//! Resolution prefers the current period as an instant on a consolidated
//! basis and never uses prior-period facts.

use serde::{Deserialize, Serialize};

/// Period a qualifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Current fiscal year, quarter or interim period.
    Current,
    /// Any prior period.
    Prior,
    /// No period marker.
    Unspecified,
}

/// Measurement nature of a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    /// Point-in-time value.
    Instant,
    /// Value over a period.
    Duration,
    /// No nature marker.
    Unspecified,
}

/// Consolidation level of a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consolidation {
    /// Group figures.
    Consolidated,
    /// Parent-only figures.
    NonConsolidated,
    /// No consolidation marker.
    Unspecified,
}

/// Preference tier of a qualifier, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScopeTier {
    /// Prior period, never used.
    Excluded,
    /// Anything not covered by a higher tier.
    Other,
    /// An instant outside the current period markers.
    Instant,
    /// Current period duration.
    CurrentDuration,
    /// Current period instant.
    CurrentInstant,
}

impl ScopeTier {
    const fn base(self) -> u32 {
        match self {
            Self::Excluded => 0,
            Self::Other => 10,
            Self::Instant => 20,
            Self::CurrentDuration => 30,
            Self::CurrentInstant => 40,
        }
    }
}

/// Decomposed scope qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeQualifier {
    /// Period marker.
    pub period: Period,
    /// Nature marker.
    pub nature: Nature,
    /// Consolidation marker.
    pub consolidation: Consolidation,
    /// Whether the qualifier carries a dimension member other than consolidation.
    pub dimensioned: bool,
}

const CURRENT_MARKERS: &[&str] = &["current", "interim"];

impl ScopeQualifier {
    /// Decomposes a context reference, ignoring case.
    ///
    /// `CurrentYearInstant_NonConsolidatedMember` parses as a current,
    /// instant, non-consolidated qualifier without other dimensions.
    #[must_use]
    pub fn parse(context: &str) -> Self {
        let lower = context.to_ascii_lowercase();

        let period = if lower.contains("prior") {
            Period::Prior
        } else if CURRENT_MARKERS.iter().any(|m| lower.contains(m)) {
            Period::Current
        } else {
            Period::Unspecified
        };

        let nature = if lower.contains("instant") {
            Nature::Instant
        } else if lower.contains("duration") || lower.contains("ytd") {
            Nature::Duration
        } else {
            Nature::Unspecified
        };

        let consolidation = if lower.contains("nonconsolidated") {
            Consolidation::NonConsolidated
        } else if lower.contains("consolidated") {
            Consolidation::Consolidated
        } else {
            Consolidation::Unspecified
        };

        let dimensioned = lower
            .replace("nonconsolidatedmember", "")
            .replace("consolidatedmember", "")
            .contains("member");

        Self {
            period,
            nature,
            consolidation,
            dimensioned,
        }
    }

    /// Returns the preference tier.
    #[must_use]
    pub const fn tier(&self) -> ScopeTier {
        match (self.period, self.nature) {
            (Period::Prior, _) => ScopeTier::Excluded,
            (Period::Current, Nature::Instant) => ScopeTier::CurrentInstant,
            (Period::Current, Nature::Duration) => ScopeTier::CurrentDuration,
            (_, Nature::Instant) => ScopeTier::Instant,
            _ => ScopeTier::Other,
        }
    }

    /// Preference score. Zero means the fact must not be used.
    #[must_use]
    pub const fn score(&self) -> u32 {
        let tier = self.tier();
        if matches!(tier, ScopeTier::Excluded) {
            return 0;
        }
        let mut score = tier.base();
        match self.consolidation {
            Consolidation::Consolidated => score += 2,
            Consolidation::NonConsolidated => score -= 2,
            Consolidation::Unspecified => {}
        }
        if self.dimensioned {
            score -= 1;
        }
        score
    }
}

/// Scores a context reference directly.
#[must_use]
pub fn score(context: &str) -> u32 {
    ScopeQualifier::parse(context).score()
}
