//! Incremental multi-level score accumulation for scorekeep.
//!
//! This crate is the hot path of a local-search solver: it turns constraint
//! match/un-match events into a running, retractable, multi-level score.
//!
//! - [`ScoreInliner`] owns the running level totals for one solving run and
//!   builds one [`WeightedScoreImpacter`] per non-zero-weighted constraint.
//! - Every `impact` call applies an exact level-wise delta and returns an
//!   [`Undo`] token; consuming the token retracts exactly that delta.
//! - With match tracking enabled, the inliner also maintains a live, pruned
//!   index of constraint match totals and per-justification indictments for
//!   score explanation.
//!
//! # Architecture
//!
//! The engine is generic over the numeric domain ([`scorekeep_core::ScoreDomain`])
//! and carries the level arrangement as a runtime value
//! ([`scorekeep_core::ScoreShape`]), so the twelve built-in score kinds share
//! one implementation. Per-match cost scales with the number of
//! non-zero-weighted levels of the constraint, not the arity of the shape.
//!
//! All state is single-thread owned: the inliner hands out `Rc`-backed
//! impacters and is deliberately not `Send`.

pub mod context;
pub mod descriptor;
pub mod impacter;
pub mod inliner;
pub mod justification;
pub mod match_index;
pub mod registry;


pub use context::ImpactContext;
pub use descriptor::{ArrangementKind, ScoreDescriptor};
pub use impacter::{Undo, WeightedScoreImpacter};
pub use inliner::ScoreInliner;
pub use justification::JustificationRef;
pub use match_index::{ConstraintMatch, ConstraintMatchTotal, Indictment, MatchId, MatchIndex};
pub use registry::{resolve_accumulator, CustomAccumulatorFactory, ResolvedAccumulator};
#[allow(deprecated)]
pub use registry::register_custom_accumulator;
