//! Shared test fixtures for scorekeep crates.
//!
//! This crate provides small domain types and helpers for testing.
//! It does NOT depend on `scorekeep-inliner` to avoid circular dependencies.
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! scorekeep-test = { workspace = true }
//! ```

use std::cell::Cell;
use std::rc::Rc;

use scorekeep_core::ConstraintRef;

/// A tiny planning-entity stand-in for justification objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shift {
    pub id: u32,
}

/// A second justification type, for mixed-type indictment tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    pub name: &'static str,
}

/// Creates a constraint reference in the shared `test` package.
pub fn constraint(name: &str) -> ConstraintRef {
    ConstraintRef::new("test", name)
}

/// Counts closure invocations, for asserting justification laziness.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Rc<Cell<usize>>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation.
    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Returns how many invocations were recorded.
    pub fn count(&self) -> usize {
        self.0.get()
    }
}
