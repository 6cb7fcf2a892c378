//! Weighted score impacters and their undo tokens.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use scorekeep_core::{MatchWeight, Result, ScoreDomain, ScoreError, ScoreValue};

use crate::context::ImpactContext;
use crate::inliner::InlinerState;
use crate::justification::JustificationRef;
use crate::match_index::MatchRemoval;

/// How a constraint weight maps match weights to level deltas.
///
/// Chosen once at build time by scanning the weight's non-zero levels, so
/// per-match cost tracks the constraint's weighted levels, never the shape's
/// arity.
pub(crate) enum ImpactKind<D: ScoreDomain> {
    /// Exactly one level is weighted.
    SingleLevel { level: usize, weight: D::Value },
    /// Several levels are weighted; all levels get a delta.
    MultiLevel {
        weights: SmallVec<[D::Value; 4]>,
    },
}

enum AppliedDelta<D: ScoreDomain> {
    SingleLevel { level: usize, value: D::Value },
    MultiLevel { values: SmallVec<[D::Value; 4]> },
}

/// Per-constraint converter of match events into applied score deltas.
///
/// Built once per constraint per run by
/// [`ScoreInliner::build_weighted_score_impacter`](crate::ScoreInliner::build_weighted_score_impacter);
/// never recreated mid-run.
pub struct WeightedScoreImpacter<D: ScoreDomain> {
    state: Rc<RefCell<InlinerState<D>>>,
    context: Rc<ImpactContext<D>>,
    kind: ImpactKind<D>,
}

impl<D: ScoreDomain> WeightedScoreImpacter<D> {
    pub(crate) fn new(
        state: Rc<RefCell<InlinerState<D>>>,
        context: Rc<ImpactContext<D>>,
        kind: ImpactKind<D>,
    ) -> Self {
        Self {
            state,
            context,
            kind,
        }
    }

    /// Returns this impacter's context.
    pub fn context(&self) -> &ImpactContext<D> {
        &self.context
    }

    /// Applies one match event: adds `weight[level] * match_weight` to the
    /// owning inliner's totals for every weighted level.
    ///
    /// `justifications` is evaluated only when match tracking is enabled;
    /// justification construction is assumed expensive and must never run on
    /// the untracked hot path. A zero `match_weight` is legal: it applies a
    /// zero delta, and with tracking on it still records a zero-score match,
    /// because a match occurred even if its contribution is nil.
    ///
    /// The returned [`Undo`] retracts exactly this delta and its
    /// bookkeeping.
    pub fn impact<J>(&self, match_weight: D::Value, justifications: J) -> Undo<D>
    where
        J: FnOnce() -> Vec<JustificationRef>,
    {
        let delta = {
            let mut state = self.state.borrow_mut();
            match &self.kind {
                ImpactKind::SingleLevel { level, weight } => {
                    let value = *weight * match_weight;
                    state.totals[*level] = state.totals[*level] + value;
                    AppliedDelta::SingleLevel {
                        level: *level,
                        value,
                    }
                }
                ImpactKind::MultiLevel { weights } => {
                    let mut values = SmallVec::with_capacity(weights.len());
                    for (total, weight) in state.totals.iter_mut().zip(weights.iter()) {
                        let value = *weight * match_weight;
                        *total = *total + value;
                        values.push(value);
                    }
                    AppliedDelta::MultiLevel { values }
                }
            }
        };

        let removal = if self.context.match_tracking() {
            let shape = self.context.weight().shape();
            let match_score = match &delta {
                AppliedDelta::SingleLevel { level, value } => {
                    ScoreValue::of_level(shape, *level, *value)
                }
                AppliedDelta::MultiLevel { values } => ScoreValue::of_levels(shape, values),
            };
            let justification_list = justifications();
            Some(self.state.borrow_mut().match_index.add_constraint_match(
                &self.context,
                justification_list,
                match_score,
            ))
        } else {
            None
        };

        Undo {
            state: Rc::clone(&self.state),
            delta,
            removal,
        }
    }

    /// The dynamically-typed impact entry point.
    ///
    /// Fails loudly with [`ScoreError::DomainMismatch`] when the weight's
    /// domain differs from the one this impacter was built for; the weight
    /// is never coerced.
    pub fn impact_dynamic<J>(&self, match_weight: MatchWeight, justifications: J) -> Result<Undo<D>>
    where
        J: FnOnce() -> Vec<JustificationRef>,
    {
        match D::value_of(match_weight) {
            Some(value) => Ok(self.impact(value, justifications)),
            None => Err(ScoreError::DomainMismatch {
                constraint: self.context.constraint().constraint_id(),
                expected: D::KIND,
                actual: match_weight.kind(),
            }),
        }
    }
}

/// Single-use reversal token returned by every impact call.
///
/// Consuming the token subtracts exactly the applied delta and, when match
/// tracking is enabled, removes the registered constraint match from its
/// total and from every indictment it touched, pruning aggregates that
/// drain. `undo` takes the token by value: invoking it twice, or after the
/// fact, does not compile.
#[must_use = "the returned Undo is the only way to retract this impact"]
pub struct Undo<D: ScoreDomain> {
    state: Rc<RefCell<InlinerState<D>>>,
    delta: AppliedDelta<D>,
    removal: Option<MatchRemoval>,
}

impl<D: ScoreDomain> Undo<D> {
    /// Retracts the impact this token was returned for.
    pub fn undo(self) {
        let mut state = self.state.borrow_mut();
        match self.delta {
            AppliedDelta::SingleLevel { level, value } => {
                state.totals[level] = state.totals[level] - value;
            }
            AppliedDelta::MultiLevel { values } => {
                for (total, value) in state.totals.iter_mut().zip(values) {
                    *total = *total - value;
                }
            }
        }
        if let Some(removal) = self.removal {
            state.match_index.remove(removal);
        }
    }
}
