//! Construction-time accumulator resolution.
//!
//! The built-in registry is an explicit match on the
//! `{arrangement, domain}` tag; all twelve built-in score kinds resolve to a
//! [`ScoreInliner`] without any runtime type inspection. Custom arrangements
//! go through a process-wide named-factory registry, read once per
//! construction and never on the hot path.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use tracing::debug;

use scorekeep_core::{DecimalDomain, DomainKind, Int32, Int64, Result, ScoreError};

use crate::descriptor::{ArrangementKind, ScoreDescriptor};
use crate::inliner::ScoreInliner;

/// Zero-argument factory for a custom accumulator.
///
/// The factory result is type-erased; the caller downcasts it to the
/// concrete accumulator type it registered.
pub type CustomAccumulatorFactory = fn() -> Box<dyn Any>;

static CUSTOM_ACCUMULATORS: OnceLock<RwLock<HashMap<String, CustomAccumulatorFactory>>> =
    OnceLock::new();

fn custom_registry() -> &'static RwLock<HashMap<String, CustomAccumulatorFactory>> {
    CUSTOM_ACCUMULATORS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers a factory for a custom score arrangement, process-wide.
///
/// Must happen before any session resolving `custom(name)` is built.
#[deprecated(
    note = "custom score arrangements are a legacy escape hatch; use a built-in arrangement"
)]
pub fn register_custom_accumulator(name: impl Into<String>, factory: CustomAccumulatorFactory) {
    custom_registry()
        .write()
        .expect("custom accumulator registry poisoned")
        .insert(name.into(), factory);
}

/// An accumulator resolved from a score descriptor.
pub enum ResolvedAccumulator {
    Int32(ScoreInliner<Int32>),
    Int64(ScoreInliner<Int64>),
    Decimal(ScoreInliner<DecimalDomain>),
    /// A legacy custom accumulator; downcast to the registered type.
    Custom(Box<dyn Any>),
}

/// Resolves the accumulator implementation for a score descriptor.
///
/// Built-in descriptors always resolve. A `custom(name)` arrangement is
/// looked up in the process-wide registry; failure to find it is a fatal
/// configuration error at startup, never a runtime fallback.
pub fn resolve_accumulator(
    descriptor: &ScoreDescriptor,
    match_tracking: bool,
) -> Result<ResolvedAccumulator> {
    if let ArrangementKind::Custom(name) = &descriptor.arrangement {
        let registry = custom_registry()
            .read()
            .expect("custom accumulator registry poisoned");
        let factory = registry.get(name).ok_or_else(|| {
            ScoreError::Config(format!(
                "Unknown score arrangement ({}) in descriptor ({}). \
                 If you're attempting to use a custom score, register a factory for it \
                 with register_custom_accumulator() before building the session. \
                 Note: custom score arrangements are deprecated.",
                name, descriptor
            ))
        })?;
        debug!(descriptor = %descriptor, "resolved custom score accumulator");
        return Ok(ResolvedAccumulator::Custom(factory()));
    }

    // All non-custom arrangements have a shape.
    let shape = descriptor.shape().ok_or_else(|| {
        ScoreError::Config(format!("Unresolvable score descriptor ({}).", descriptor))
    })?;
    debug!(descriptor = %descriptor, "resolved built-in score accumulator");
    Ok(match descriptor.domain {
        DomainKind::Int32 => ResolvedAccumulator::Int32(ScoreInliner::new(shape, match_tracking)),
        DomainKind::Int64 => ResolvedAccumulator::Int64(ScoreInliner::new(shape, match_tracking)),
        DomainKind::Decimal => {
            ResolvedAccumulator::Decimal(ScoreInliner::new(shape, match_tracking))
        }
    })
}
