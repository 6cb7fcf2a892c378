//! Match tracking: totals, indictments, laziness, pruning.

use scorekeep_core::{Int32, ScoreShape, ScoreValue};
use scorekeep_test::{constraint, CallCounter, Employee, Shift};

use crate::{JustificationRef, ScoreInliner};

fn shift(id: u32) -> JustificationRef {
    JustificationRef::new(&Shift { id })
}

fn employee(name: &'static str) -> JustificationRef {
    JustificationRef::new(&Employee { name })
}

#[test]
fn justifications_are_lazy_when_tracking_is_disabled() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, false);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("lazy"), ScoreValue::hard_soft(-1, 0))
        .unwrap();

    let counter = CallCounter::new();
    for _ in 0..5 {
        let c = counter.clone();
        let undo = impacter.impact(1, move || {
            c.bump();
            vec![shift(1)]
        });
        undo.undo();
    }
    let _kept = impacter.impact(1, || -> Vec<JustificationRef> {
        panic!("justifications must not be computed without tracking")
    });
    assert_eq!(counter.count(), 0);
    assert!(inliner.constraint_match_totals().is_empty());
    assert!(inliner.indictments().is_empty());
}

#[test]
fn justifications_are_computed_when_tracking_is_enabled() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, true);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("eager"), ScoreValue::hard_soft(-1, 0))
        .unwrap();
    let counter = CallCounter::new();
    let c = counter.clone();
    let _undo = impacter.impact(1, move || {
        c.bump();
        vec![shift(7)]
    });
    assert_eq!(counter.count(), 1);
}

#[test]
fn match_total_aggregates_n_matches() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, true);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("count"), ScoreValue::hard_soft(-1, 0))
        .unwrap();

    let n = 4;
    let _undos: Vec<_> = (0..n)
        .map(|i| impacter.impact(i + 1, move || vec![shift(i as u32)]))
        .collect();

    let totals = inliner.constraint_match_totals();
    let total = totals.get("test/count").expect("total must exist");
    assert_eq!(total.match_count(), n as usize);
    assert_eq!(*total.weight(), ScoreValue::hard_soft(-1, 0));

    // The match scores sum to the total's score.
    let sum = total
        .matches()
        .fold(ScoreValue::zero(ScoreShape::HardSoft), |acc, m| {
            acc + m.score().clone()
        });
    assert_eq!(&sum, total.score());
    assert_eq!(*total.score(), ScoreValue::hard_soft(-10, 0));
}

#[test]
fn undo_restores_totals_and_indictments_exactly() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, true);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("restore"), ScoreValue::hard_soft(0, -1))
        .unwrap();

    let _kept = impacter.impact(2, || vec![shift(1), employee("ann")]);
    let before_score = inliner.extract_score(0);
    let before_matches = inliner
        .constraint_match_totals()
        .get("test/restore")
        .unwrap()
        .match_count();
    let before_indictments = inliner.indictments().len();

    let undo = impacter.impact(3, || vec![shift(1), shift(2)]);
    assert_eq!(inliner.indictments().len(), 3);
    undo.undo();

    assert_eq!(inliner.extract_score(0), before_score);
    assert_eq!(
        inliner
            .constraint_match_totals()
            .get("test/restore")
            .unwrap()
            .match_count(),
        before_matches
    );
    assert_eq!(inliner.indictments().len(), before_indictments);
    // shift(2) was only referenced by the undone match; it must be pruned.
    assert!(inliner.indictments().get(&shift(2)).is_none());
    // shift(1) keeps the surviving match only.
    let indictment = inliner.indictments();
    let shift1 = indictment.get(&shift(1)).unwrap();
    assert_eq!(shift1.match_count(), 1);
    assert_eq!(*shift1.score(), ScoreValue::hard_soft(0, -2));
}

#[test]
fn empty_aggregates_are_pruned_immediately() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::Single, true);
    let a = inliner
        .build_weighted_score_impacter(constraint("a"), ScoreValue::simple(-1))
        .unwrap();
    let b = inliner
        .build_weighted_score_impacter(constraint("b"), ScoreValue::simple(-1))
        .unwrap();

    let undo_a = a.impact(1, || vec![shift(1)]);
    let _undo_b = b.impact(1, || vec![shift(2)]);
    assert_eq!(inliner.constraint_match_totals().len(), 2);

    undo_a.undo();
    let totals = inliner.constraint_match_totals();
    assert_eq!(totals.len(), 1);
    assert!(totals.get("test/a").is_none());
    drop(totals);
    assert!(inliner.indictments().get(&shift(1)).is_none());
    assert!(inliner.indictments().get(&shift(2)).is_some());
}

#[test]
fn duplicate_justifications_collapse_to_one_indictment_entry() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::Single, true);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("dup"), ScoreValue::simple(-1))
        .unwrap();

    let _undo = impacter.impact(1, || vec![shift(9), employee("bo"), shift(9)]);

    let indictments = inliner.indictments();
    let indictment = indictments.get(&shift(9)).unwrap();
    assert_eq!(indictment.match_count(), 1);
    assert_eq!(*indictment.score(), ScoreValue::simple(-1));
    // The match itself still lists all three entries for display.
    let the_match = indictment.matches().next().unwrap();
    assert_eq!(the_match.justifications().len(), 3);
}

#[test]
fn zero_match_weight_still_records_a_match() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, true);
    let impacter = inliner
        .build_weighted_score_impacter(constraint("nil"), ScoreValue::hard_soft(-1, 0))
        .unwrap();
    let _undo = impacter.impact(0, || vec![shift(3)]);

    assert_eq!(inliner.extract_score(0), ScoreValue::hard_soft(0, 0));
    let totals = inliner.constraint_match_totals();
    let total = totals.get("test/nil").unwrap();
    assert_eq!(total.match_count(), 1);
    assert!(total.score().is_zero());
    drop(totals);
    assert_eq!(inliner.indictments().get(&shift(3)).unwrap().match_count(), 1);
}

#[test]
fn views_iterate_in_first_activation_order() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::Single, true);
    let names = ["gamma", "alpha", "beta"];
    let impacters: Vec<_> = names
        .iter()
        .map(|name| {
            inliner
                .build_weighted_score_impacter(constraint(name), ScoreValue::simple(-1))
                .unwrap()
        })
        .collect();

    let _undos: Vec<_> = impacters
        .iter()
        .enumerate()
        .map(|(i, impacter)| impacter.impact(1, move || vec![shift(i as u32)]))
        .collect();

    let order: Vec<String> = inliner.constraint_match_totals().keys().cloned().collect();
    assert_eq!(order, vec!["test/gamma", "test/alpha", "test/beta"]);
}

#[test]
fn indictment_spans_constraints() {
    let inliner = ScoreInliner::<Int32>::new(ScoreShape::HardSoft, true);
    let a = inliner
        .build_weighted_score_impacter(constraint("a"), ScoreValue::hard_soft(-1, 0))
        .unwrap();
    let b = inliner
        .build_weighted_score_impacter(constraint("b"), ScoreValue::hard_soft(0, -5))
        .unwrap();

    let _u1 = a.impact(1, || vec![shift(1)]);
    let _u2 = b.impact(2, || vec![shift(1), employee("cy")]);

    let indictments = inliner.indictments();
    let shift1 = indictments.get(&shift(1)).unwrap();
    assert_eq!(shift1.match_count(), 2);
    assert_eq!(*shift1.score(), ScoreValue::hard_soft(-1, -10));
}
