//! Progress notifications.
//!
//! The orchestrator reports a [`Phase`] checkpoint to a [`ProgressSink`] after
//! each phase. Notifications are one-way: a sink cannot block or answer.

use serde::{Deserialize, Serialize};

/// Receives progress checkpoints.
pub trait ProgressSink: Send + Sync {
    /// Called with the completed fraction (0.0 to 1.0) and a phase label.
    fn report(&self, fraction: f32, label: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(f32, &str) + Send + Sync,
{
    fn report(&self, fraction: f32, label: &str) {
        self(fraction, label);
    }
}

/// A sink that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _fraction: f32, _label: &str) {}
}

/// Checkpoints of one extraction, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Filer identity resolved.
    FilerResolved,
    /// Latest filing located.
    FilingLocated,
    /// Primary document retrieved.
    DocumentRetrieved,
    /// Fact index built.
    FactsIndexed,
    /// Concepts resolved.
    ConceptsResolved,
    /// Summary reconciled.
    Reconciled,
    /// Record assembled.
    Complete,
}

impl Phase {
    /// Fraction of the request completed at this checkpoint.
    #[must_use]
    pub const fn fraction(&self) -> f32 {
        match self {
            Self::FilerResolved => 0.1,
            Self::FilingLocated => 0.3,
            Self::DocumentRetrieved => 0.6,
            Self::FactsIndexed => 0.75,
            Self::ConceptsResolved => 0.9,
            Self::Reconciled => 0.95,
            Self::Complete => 1.0,
        }
    }

    /// Human-readable label for this checkpoint.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FilerResolved => "Resolved filer identity",
            Self::FilingLocated => "Located latest filing",
            Self::DocumentRetrieved => "Retrieved filing document",
            Self::FactsIndexed => "Indexed financial facts",
            Self::ConceptsResolved => "Resolved balance sheet lines",
            Self::Reconciled => "Reconciled balance sheet",
            Self::Complete => "Complete",
        }
    }

    /// Reports this checkpoint to a sink.
    pub fn notify(self, sink: &dyn ProgressSink) {
        sink.report(self.fraction(), self.label());
    }
}
