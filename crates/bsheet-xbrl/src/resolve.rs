//! Tag resolution.
//!
//! Picks one value for a figure among the facts of every alias. Domestic
//! aliases are tried before IFRS ones; within a group the highest-scoring
//! qualifier wins and ties keep the first fact encountered.

use bsheet_core::Amount;
use tracing::trace;

use crate::{
    concept::{AliasSet, Concept},
    index::{Fact, FactIndex},
    scope::ScopeQualifier,
};

/// Largest magnitude a fact may have and still be used as an amount.
///
/// Larger values are treated as noise. The bound keeps every sum over
/// resolved figures well inside [`Amount`].
pub const MAX_FACT_MAGNITUDE: f64 = 1e16;

/// A fact selected for a figure.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The fact.
    pub fact: &'a Fact,
    /// Score of its qualifier.
    pub score: u32,
}

/// Returns the best usable fact across an ordered list of aliases.
///
/// Facts with a prior-period qualifier, or whose magnitude exceeds
/// [`MAX_FACT_MAGNITUDE`], are never returned.
#[must_use]
pub fn best_candidate<'a>(aliases: &[&str], index: &'a FactIndex) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for alias in aliases {
        for fact in index.facts_for(alias) {
            let score = ScopeQualifier::parse(&fact.context).score();
            if score == 0 || fact.value.abs() > MAX_FACT_MAGNITUDE {
                continue;
            }
            if best.is_none_or(|b| score > b.score) {
                best = Some(Candidate { fact, score });
            }
        }
    }
    best
}

/// Resolves one alias group, zero when nothing usable is present.
#[must_use]
pub fn resolve_aliases(aliases: &[&str], index: &FactIndex) -> Amount {
    best_candidate(aliases, index).map_or(0, |c| to_amount(c.fact.value))
}

/// Resolves an alias set: domestic names first, IFRS names if that gives zero.
#[must_use]
pub fn resolve_set(set: &AliasSet, index: &FactIndex) -> Amount {
    let domestic = resolve_aliases(set.domestic, index);
    if domestic != 0 {
        return domestic;
    }
    resolve_aliases(set.ifrs, index)
}

/// Resolves a concept from its direct aliases.
#[must_use]
pub fn resolve(concept: Concept, index: &FactIndex) -> Amount {
    let value = resolve_set(&concept.aliases(), index);
    trace!(%concept, value, "Resolved concept");
    value
}

/// Truncates toward zero.
#[allow(clippy::cast_possible_truncation)]
fn to_amount(value: f64) -> Amount {
    value.trunc() as Amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(facts: &[(&str, &str, f64)]) -> FactIndex {
        FactIndex::from_facts(
            facts
                .iter()
                .map(|(tag, ctx, v)| Fact::new(tag, *ctx, *v))
                .collect(),
        )
    }

    #[test]
    fn test_prior_period_never_used() {
        let idx = index(&[
            ("NetAssets", "Prior1YearInstant", 450.0),
            ("NetAssets", "CurrentYearInstant", 500.0),
        ]);
        assert_eq!(resolve(Concept::NetAssets, &idx), 500);

        let idx = index(&[("NetAssets", "Prior1YearInstant", 450.0)]);
        assert_eq!(resolve(Concept::NetAssets, &idx), 0);
    }

    #[test]
    fn test_domestic_wins_over_ifrs() {
        let idx = index(&[
            ("jppfs_cor:CurrentAssets", "CurrentYearInstant", 800.0),
            ("ifrs-full:AssetsCurrent", "CurrentYearInstant", 820.0),
        ]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 800);
    }

    #[test]
    fn test_ifrs_used_when_domestic_absent() {
        let idx = index(&[("AssetsCurrent", "CurrentYearInstant", 820.0)]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 820);
    }

    #[test]
    fn test_ifrs_used_when_domestic_is_zero() {
        let idx = index(&[
            ("CurrentAssets", "CurrentYearInstant", 0.0),
            ("CurrentAssetsIFRS", "CurrentYearInstant", 820.0),
        ]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 820);
    }

    #[test]
    fn test_highest_score_wins() {
        let idx = index(&[
            ("CurrentAssets", "CurrentYearDuration", 1.0),
            ("CurrentAssets", "CurrentYearInstant_NonConsolidatedMember", 2.0),
            ("CurrentAssets", "CurrentYearInstant", 3.0),
            ("CurrentAssets", "CurrentYearInstant_ReportableSegmentsMember", 4.0),
        ]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 3);
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let idx = index(&[
            ("CurrentAssets", "CurrentYearInstant", 10.0),
            ("CurrentAssets", "CurrentYearInstant", 20.0),
        ]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 10);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let idx = index(&[
            ("Cash", "CurrentYearInstant", 0.0),
            ("CashAndDeposits", "CurrentYearInstant", 99.9),
            ("NetAssets", "CurrentYearInstant", -99.9),
        ]);
        assert_eq!(resolve(Concept::Cash, &idx), 99);
        assert_eq!(resolve(Concept::NetAssets, &idx), -99);
    }

    #[test]
    fn test_out_of_range_values_are_ignored() {
        let idx = index(&[
            ("CurrentAssets", "CurrentYearInstant", 1e19),
            ("CurrentAssetsIFRS", "CurrentYearInstant", 820.0),
            ("NetAssets", "CurrentYearInstant", -1e17),
        ]);
        assert_eq!(resolve(Concept::CurrentAssets, &idx), 820);
        assert_eq!(resolve(Concept::NetAssets, &idx), 0);
    }

    #[test]
    fn test_best_candidate_reports_score() {
        let idx = index(&[("Assets", "CurrentYearInstant", 1000.0)]);
        let candidate = best_candidate(&["Assets"], &idx).unwrap();
        assert_eq!(candidate.score, 40);
        assert_eq!(candidate.fact.value, 1000.0);
    }
}
