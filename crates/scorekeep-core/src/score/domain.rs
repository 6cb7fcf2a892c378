//! Numeric domains for score arithmetic.
//!
//! Every level of a score belongs to exactly one numeric domain: 32-bit
//! integer, 64-bit integer, or arbitrary-precision decimal. The accumulation
//! engine is generic over [`ScoreDomain`] and only ever needs zero, add,
//! negate, and multiply from it.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;
use rust_decimal::Decimal;

/// Runtime tag identifying a numeric domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DomainKind {
    /// 32-bit integer levels.
    Int32,
    /// 64-bit integer levels.
    Int64,
    /// Arbitrary-precision decimal levels.
    Decimal,
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DomainKind::Int32 => "int32",
            DomainKind::Int64 => "int64",
            DomainKind::Decimal => "decimal",
        };
        write!(f, "{}", label)
    }
}

/// A match weight carried in one of the three numeric domains.
///
/// This is the dynamically-typed boundary of the engine: a match engine that
/// is not statically typed against one domain hands weights over in this
/// form, and mismatches against the impacter's domain fail loudly. The
/// typed `impact` path never constructs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchWeight {
    /// A 32-bit integer weight.
    Int(i32),
    /// A 64-bit integer weight.
    Long(i64),
    /// An arbitrary-precision decimal weight.
    Decimal(Decimal),
}

impl MatchWeight {
    /// Returns the domain this weight belongs to.
    pub fn kind(&self) -> DomainKind {
        match self {
            MatchWeight::Int(_) => DomainKind::Int32,
            MatchWeight::Long(_) => DomainKind::Int64,
            MatchWeight::Decimal(_) => DomainKind::Decimal,
        }
    }
}

/// One numeric domain for score values.
///
/// Implementations are zero-sized markers; the actual arithmetic happens on
/// [`ScoreDomain::Value`]. The bounds are exactly what level-wise
/// accumulation needs: zero, add, subtract, negate, and an in-domain
/// multiply for `weight * match_weight`.
pub trait ScoreDomain: Copy + Debug + Eq + Hash + Send + Sync + 'static {
    /// The per-level value type.
    type Value: Copy
        + Debug
        + Default
        + Display
        + Eq
        + Ord
        + Hash
        + Zero
        + Add<Output = Self::Value>
        + Sub<Output = Self::Value>
        + Neg<Output = Self::Value>
        + Mul<Output = Self::Value>
        + Send
        + Sync
        + 'static;

    /// Runtime tag for this domain.
    const KIND: DomainKind;

    /// Extracts a value of this domain from an erased match weight.
    ///
    /// Returns `None` when the weight belongs to a different domain; the
    /// caller turns that into a domain-mismatch error.
    fn value_of(weight: MatchWeight) -> Option<Self::Value>;
}

/// 32-bit integer domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int32;

impl ScoreDomain for Int32 {
    type Value = i32;

    const KIND: DomainKind = DomainKind::Int32;

    #[inline]
    fn value_of(weight: MatchWeight) -> Option<i32> {
        match weight {
            MatchWeight::Int(value) => Some(value),
            _ => None,
        }
    }
}

/// 64-bit integer domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int64;

impl ScoreDomain for Int64 {
    type Value = i64;

    const KIND: DomainKind = DomainKind::Int64;

    #[inline]
    fn value_of(weight: MatchWeight) -> Option<i64> {
        match weight {
            MatchWeight::Long(value) => Some(value),
            _ => None,
        }
    }
}

/// Arbitrary-precision decimal domain, backed by [`rust_decimal::Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalDomain;

impl ScoreDomain for DecimalDomain {
    type Value = Decimal;

    const KIND: DomainKind = DomainKind::Decimal;

    #[inline]
    fn value_of(weight: MatchWeight) -> Option<Decimal> {
        match weight {
            MatchWeight::Decimal(value) => Some(value),
            _ => None,
        }
    }
}
