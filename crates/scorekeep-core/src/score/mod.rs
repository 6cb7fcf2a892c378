//! Score types for representing solution quality
//!
//! A score is an immutable, ordered tuple of numeric levels sharing one
//! numeric domain. The family is generic over two orthogonal axes:
//! the level arrangement ([`ScoreShape`]) and the numeric domain
//! ([`ScoreDomain`]), giving twelve built-in combinations without twelve
//! hand-written types.

mod domain;
mod shape;
mod value;


pub use domain::{DecimalDomain, DomainKind, Int32, Int64, MatchWeight, ScoreDomain};
pub use shape::ScoreShape;
pub use value::ScoreValue;
