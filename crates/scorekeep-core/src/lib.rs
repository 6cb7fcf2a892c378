//! Scorekeep Core - score values and constraint identity
//!
//! This crate provides the foundation types for the scorekeep accumulation
//! engine:
//! - A generic score value family (level arrangement x numeric domain)
//! - Constraint identity for weighted constraints
//! - The shared error type

pub mod constraint;
pub mod error;
pub mod score;

pub use constraint::ConstraintRef;
pub use error::{Result, ScoreError};
pub use score::{
    DecimalDomain, DomainKind, Int32, Int64, MatchWeight, ScoreDomain, ScoreShape, ScoreValue,
};
