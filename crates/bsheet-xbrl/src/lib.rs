#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! XBRL fact extraction for balance sheets.
//!
//! - [`FactIndex`] - Numeric facts of one instance document, indexed by tag
//! - [`ScopeQualifier`] - Context reference scoring
//! - [`Concept`] - Figures and their domestic and IFRS tag aliases
//! - [`resolve`](resolve::resolve) - Best fact for a figure
//! - [`compose_or_fallback`] - Bottom-up composition
//! - [`extract_balance_sheet`] - Draft and reconcile a record

/// Bottom-up composition of figures from component groups.
pub mod compose;
/// Balance sheet concepts and tag aliases.
pub mod concept;
/// Draft record assembly.
pub mod extract;
/// Fact index over an instance document.
pub mod index;
/// Tag resolution.
pub mod resolve;
/// Scope qualifier scoring.
pub mod scope;

pub use compose::{compose, compose_or_fallback, resolve_component};
pub use concept::{AliasSet, Component, Concept};
pub use extract::{draft, extract_balance_sheet, fill_figures};
pub use index::{Fact, FactIndex};
pub use resolve::{
    Candidate, MAX_FACT_MAGNITUDE, best_candidate, resolve, resolve_aliases, resolve_set,
};
pub use scope::{Consolidation, Nature, Period, ScopeQualifier, ScopeTier};
