//! Error types for scorekeep

use thiserror::Error;

use crate::score::DomainKind;

/// Main error type for scorekeep operations
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Error in accumulator or constraint configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An impact call used a numeric domain the impacter was not built for
    #[error(
        "Numeric domain mismatch for constraint ({constraint}): \
         the impacter was built for the {expected} domain but was called with a {actual} weight. \
         One constraint definition only ever uses one numeric domain; \
         the match engine wiring is broken."
    )]
    DomainMismatch {
        constraint: String,
        expected: DomainKind,
        actual: DomainKind,
    },
}

/// Result type alias for scorekeep operations
pub type Result<T> = std::result::Result<T, ScoreError>;
