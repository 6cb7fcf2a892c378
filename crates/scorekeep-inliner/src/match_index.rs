//! Live bookkeeping of constraint matches, totals, and indictments.
//!
//! The index exists only when match tracking is enabled. It maintains, per
//! constraint and per justification object, the set of currently active
//! matches. Aggregates are created lazily on a first match and removed the
//! instant their match set drains; no stale empty entries survive an undo.

use std::rc::Rc;

use indexmap::IndexMap;

use scorekeep_core::{ConstraintRef, ScoreDomain, ScoreValue};

use crate::context::ImpactContext;
use crate::justification::JustificationRef;

/// Identity of one active constraint match, unique within one inliner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(u64);

/// One currently-active occurrence of a constraint being matched.
///
/// The justification list preserves the caller's list verbatim (duplicates
/// included) for display; the indictment fan-out deduplicates.
#[derive(Debug)]
pub struct ConstraintMatch<D: ScoreDomain> {
    id: MatchId,
    constraint: ConstraintRef,
    justifications: Vec<JustificationRef>,
    score: ScoreValue<D>,
}

impl<D: ScoreDomain> ConstraintMatch<D> {
    /// Returns the match identity.
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Returns the matched constraint.
    pub fn constraint(&self) -> &ConstraintRef {
        &self.constraint
    }

    /// Returns the justification objects, in the order supplied.
    pub fn justifications(&self) -> &[JustificationRef] {
        &self.justifications
    }

    /// Returns this match's score contribution.
    pub fn score(&self) -> &ScoreValue<D> {
        &self.score
    }
}

/// Per-constraint aggregate of all currently-active matches.
#[derive(Debug)]
pub struct ConstraintMatchTotal<D: ScoreDomain> {
    constraint: ConstraintRef,
    weight: ScoreValue<D>,
    matches: IndexMap<MatchId, Rc<ConstraintMatch<D>>>,
    score: ScoreValue<D>,
}

impl<D: ScoreDomain> ConstraintMatchTotal<D> {
    fn new(constraint: ConstraintRef, weight: ScoreValue<D>) -> Self {
        let score = ScoreValue::zero(weight.shape());
        Self {
            constraint,
            weight,
            matches: IndexMap::new(),
            score,
        }
    }

    fn add(&mut self, constraint_match: Rc<ConstraintMatch<D>>) {
        self.score = self.score.clone() + constraint_match.score.clone();
        self.matches.insert(constraint_match.id, constraint_match);
    }

    fn remove(&mut self, id: MatchId) {
        if let Some(constraint_match) = self.matches.shift_remove(&id) {
            self.score = self.score.clone() - constraint_match.score.clone();
        }
    }

    /// Returns the constraint this total aggregates.
    pub fn constraint(&self) -> &ConstraintRef {
        &self.constraint
    }

    /// Returns the constraint weight.
    pub fn weight(&self) -> &ScoreValue<D> {
        &self.weight
    }

    /// Returns the sum of all active match scores.
    pub fn score(&self) -> &ScoreValue<D> {
        &self.score
    }

    /// Returns the number of active matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns the active matches in activation order.
    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<D>> {
        self.matches.values().map(Rc::as_ref)
    }

    fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Per-justification-object aggregate of all active matches referencing it.
#[derive(Debug)]
pub struct Indictment<D: ScoreDomain> {
    justification: JustificationRef,
    matches: IndexMap<MatchId, Rc<ConstraintMatch<D>>>,
    score: ScoreValue<D>,
}

impl<D: ScoreDomain> Indictment<D> {
    fn new(justification: JustificationRef, zero: ScoreValue<D>) -> Self {
        Self {
            justification,
            matches: IndexMap::new(),
            score: zero,
        }
    }

    fn add(&mut self, constraint_match: Rc<ConstraintMatch<D>>) {
        self.score = self.score.clone() + constraint_match.score.clone();
        self.matches.insert(constraint_match.id, constraint_match);
    }

    fn remove(&mut self, id: MatchId) {
        if let Some(constraint_match) = self.matches.shift_remove(&id) {
            self.score = self.score.clone() - constraint_match.score.clone();
        }
    }

    /// Returns the indicted justification object.
    pub fn justification(&self) -> &JustificationRef {
        &self.justification
    }

    /// Returns the summed score of all matches referencing this object.
    pub fn score(&self) -> &ScoreValue<D> {
        &self.score
    }

    /// Returns the number of active matches referencing this object.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns the active matches in activation order.
    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<D>> {
        self.matches.values().map(Rc::as_ref)
    }

    fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Handle needed to reverse one registered match exactly.
///
/// Holds the constraint id, the match id, and the deduplicated justification
/// keys the match was fanned out to.
#[derive(Debug)]
pub(crate) struct MatchRemoval {
    constraint_id: String,
    match_id: MatchId,
    justifications: Vec<JustificationRef>,
}

/// The live match/indictment index for one inliner.
///
/// Both maps iterate in first-activation order.
#[derive(Debug)]
pub struct MatchIndex<D: ScoreDomain> {
    totals: IndexMap<String, ConstraintMatchTotal<D>>,
    indictments: IndexMap<JustificationRef, Indictment<D>>,
    next_match_id: u64,
}

impl<D: ScoreDomain> MatchIndex<D> {
    pub(crate) fn new() -> Self {
        Self {
            totals: IndexMap::new(),
            indictments: IndexMap::new(),
            next_match_id: 0,
        }
    }

    /// Registers a new constraint match and fans it out to the indictment of
    /// every distinct justification object it lists.
    pub(crate) fn add_constraint_match(
        &mut self,
        context: &ImpactContext<D>,
        justifications: Vec<JustificationRef>,
        match_score: ScoreValue<D>,
    ) -> MatchRemoval {
        let match_id = MatchId(self.next_match_id);
        self.next_match_id += 1;

        // One match might list the same justification twice.
        let mut distinct: Vec<JustificationRef> = Vec::with_capacity(justifications.len());
        for justification in &justifications {
            if !distinct.contains(justification) {
                distinct.push(justification.clone());
            }
        }

        let constraint_match = Rc::new(ConstraintMatch {
            id: match_id,
            constraint: context.constraint().clone(),
            justifications,
            score: match_score,
        });

        let constraint_id = context.constraint().constraint_id();
        self.totals
            .entry(constraint_id.clone())
            .or_insert_with(|| {
                ConstraintMatchTotal::new(context.constraint().clone(), context.weight().clone())
            })
            .add(Rc::clone(&constraint_match));

        for justification in &distinct {
            self.indictments
                .entry(justification.clone())
                .or_insert_with(|| {
                    Indictment::new(
                        justification.clone(),
                        ScoreValue::zero(constraint_match.score.shape()),
                    )
                })
                .add(Rc::clone(&constraint_match));
        }

        MatchRemoval {
            constraint_id,
            match_id,
            justifications: distinct,
        }
    }

    /// Removes a previously registered match, pruning aggregates that drain.
    pub(crate) fn remove(&mut self, removal: MatchRemoval) {
        if let Some(total) = self.totals.get_mut(&removal.constraint_id) {
            total.remove(removal.match_id);
            if total.is_empty() {
                self.totals.shift_remove(&removal.constraint_id);
            }
        }
        for justification in &removal.justifications {
            if let Some(indictment) = self.indictments.get_mut(justification) {
                indictment.remove(removal.match_id);
                if indictment.is_empty() {
                    self.indictments.shift_remove(justification);
                }
            }
        }
    }

    /// Read-only view: constraint id -> match total, in activation order.
    pub fn constraint_match_totals(&self) -> &IndexMap<String, ConstraintMatchTotal<D>> {
        &self.totals
    }

    /// Read-only view: justification -> indictment, in activation order.
    pub fn indictments(&self) -> &IndexMap<JustificationRef, Indictment<D>> {
        &self.indictments
    }
}
