//! The score inliner: running totals, impacter factory, score snapshots.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use num_traits::Zero;
use scorekeep_core::{ConstraintRef, Result, ScoreDomain, ScoreError, ScoreShape, ScoreValue};

use crate::context::ImpactContext;
use crate::impacter::{ImpactKind, WeightedScoreImpacter};
use crate::justification::JustificationRef;
use crate::match_index::{ConstraintMatchTotal, Indictment, MatchIndex};

pub(crate) type LevelTotals<D> = SmallVec<[<D as ScoreDomain>::Value; 4]>;

/// Mutable per-run state shared by the inliner and its impacters.
pub(crate) struct InlinerState<D: ScoreDomain> {
    pub(crate) totals: LevelTotals<D>,
    pub(crate) match_index: MatchIndex<D>,
}

/// Owns the running multi-level totals for one solving run.
///
/// One inliner is exclusively owned by one score-evaluation worker (or one
/// partition under partitioned search). The shared state sits behind
/// `Rc<RefCell<..>>`, so the inliner and its impacters are not `Send`:
/// single-writer ownership is a compile-time property, not a convention.
///
/// # Examples
///
/// ```
/// use scorekeep_core::{ConstraintRef, Int32, ScoreShape, ScoreValue};
/// use scorekeep_inliner::ScoreInliner;
///
/// let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, false);
/// let impacter = inliner
///     .build_weighted_score_impacter(
///         ConstraintRef::new("demo", "NoOverlap"),
///         ScoreValue::hard_soft(-1, 0),
///     )
///     .unwrap();
///
/// let undo = impacter.impact(3, Vec::new);
/// assert_eq!(inliner.extract_score(0), ScoreValue::hard_soft(-3, 0));
/// undo.undo();
/// assert_eq!(inliner.extract_score(0), ScoreValue::hard_soft(0, 0));
/// ```
pub struct ScoreInliner<D: ScoreDomain> {
    shape: ScoreShape,
    match_tracking: bool,
    state: Rc<RefCell<InlinerState<D>>>,
}

impl<D: ScoreDomain> ScoreInliner<D> {
    /// Creates an inliner for the given shape.
    ///
    /// With `match_tracking` enabled, every impact also registers a
    /// constraint match for explanation; justification suppliers are only
    /// ever evaluated in that mode.
    pub fn new(shape: ScoreShape, match_tracking: bool) -> Self {
        Self {
            shape,
            match_tracking,
            state: Rc::new(RefCell::new(InlinerState {
                totals: smallvec![D::Value::zero(); shape.level_count()],
                match_index: MatchIndex::new(),
            })),
        }
    }

    /// Returns the level arrangement this inliner accumulates.
    pub fn shape(&self) -> ScoreShape {
        self.shape
    }

    /// Returns true if constraint matches are recorded for explanation.
    pub fn match_tracking(&self) -> bool {
        self.match_tracking
    }

    /// Builds the impacter for one constraint.
    ///
    /// Fails with a configuration error if the weight is zero or of a
    /// different shape: zero-weighted constraints must have been culled
    /// upstream, so reaching this point with one is a broken setup, not a
    /// runtime condition.
    ///
    /// The weight's levels are scanned once; a weight with exactly one
    /// non-zero level gets the single-level fast path, so the per-match cost
    /// of, say, a `bendable[5/5]` constraint weighing one soft level equals
    /// that of a single-level score.
    pub fn build_weighted_score_impacter(
        &self,
        constraint: ConstraintRef,
        weight: ScoreValue<D>,
    ) -> Result<WeightedScoreImpacter<D>> {
        if weight.shape() != self.shape {
            return Err(ScoreError::Config(format!(
                "The constraint weight shape ({}) of constraint ({}) does not match \
                 the accumulator shape ({}).",
                weight.shape(),
                constraint,
                self.shape
            )));
        }
        if weight.is_zero() {
            return Err(ScoreError::Config(format!(
                "The constraint weight ({}) of constraint ({}) cannot be zero: \
                 zero-weighted constraints should have been culled before the \
                 accumulator was built.",
                weight, constraint
            )));
        }

        let mut non_zero = weight
            .levels()
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_zero());
        let first = non_zero.next();
        let kind = match (first, non_zero.next()) {
            (Some((level, value)), None) => ImpactKind::SingleLevel {
                level,
                weight: *value,
            },
            _ => ImpactKind::MultiLevel {
                weights: SmallVec::from_slice(weight.levels()),
            },
        };
        debug!(
            constraint = %constraint,
            single_level = matches!(kind, ImpactKind::SingleLevel { .. }),
            "built weighted score impacter"
        );

        let context = Rc::new(ImpactContext::new(constraint, weight, self.match_tracking));
        Ok(WeightedScoreImpacter::new(
            Rc::clone(&self.state),
            context,
            kind,
        ))
    }

    /// Snapshots the current score, combined with the supplied init score.
    ///
    /// The returned value is a defensive copy; the live totals are never
    /// exposed.
    pub fn extract_score(&self, init_score: i32) -> ScoreValue<D> {
        let state = self.state.borrow();
        ScoreValue::of_levels(self.shape, &state.totals).with_init_score(init_score)
    }

    /// Read-only view of constraint id -> match total, in activation order.
    ///
    /// Empty unless match tracking is enabled.
    pub fn constraint_match_totals(&self) -> Ref<'_, IndexMap<String, ConstraintMatchTotal<D>>> {
        Ref::map(self.state.borrow(), |state| {
            state.match_index.constraint_match_totals()
        })
    }

    /// Read-only view of justification -> indictment, in activation order.
    ///
    /// Empty unless match tracking is enabled.
    pub fn indictments(&self) -> Ref<'_, IndexMap<JustificationRef, Indictment<D>>> {
        Ref::map(self.state.borrow(), |state| state.match_index.indictments())
    }
}
