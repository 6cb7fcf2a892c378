//! Per-constraint impact context.

use scorekeep_core::{ConstraintRef, ScoreDomain, ScoreValue};

/// Immutable per-constraint bundle, built once per constraint per solving
/// run and shared read-only by the impacter and the match index.
#[derive(Debug)]
pub struct ImpactContext<D: ScoreDomain> {
    constraint: ConstraintRef,
    weight: ScoreValue<D>,
    match_tracking: bool,
}

impl<D: ScoreDomain> ImpactContext<D> {
    pub(crate) fn new(
        constraint: ConstraintRef,
        weight: ScoreValue<D>,
        match_tracking: bool,
    ) -> Self {
        Self {
            constraint,
            weight,
            match_tracking,
        }
    }

    /// Returns the constraint this context belongs to.
    pub fn constraint(&self) -> &ConstraintRef {
        &self.constraint
    }

    /// Returns the constraint weight.
    pub fn weight(&self) -> &ScoreValue<D> {
        &self.weight
    }

    /// Returns true if constraint matches are recorded for explanation.
    pub fn match_tracking(&self) -> bool {
        self.match_tracking
    }
}
