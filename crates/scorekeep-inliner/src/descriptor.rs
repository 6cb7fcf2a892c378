//! Score descriptors: the configuration-time name of a score kind.
//!
//! A descriptor pairs a level arrangement with a numeric domain. It is what
//! a solver config file carries, and what
//! [`resolve_accumulator`](crate::resolve_accumulator) turns into a built-in
//! accumulator at startup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use scorekeep_core::{DomainKind, ScoreError, ScoreShape};

/// Level-arrangement tag of a score descriptor.
///
/// Unlike [`ScoreShape`], this can also name a legacy custom arrangement,
/// resolved through the deprecated custom-accumulator registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangementKind {
    Single,
    HardSoft,
    HardMediumSoft,
    Bendable {
        hard_levels: usize,
        soft_levels: usize,
    },
    /// A custom arrangement by registered name. Deprecated escape hatch.
    Custom(String),
}

/// A score kind: level arrangement x numeric domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreDescriptor {
    // Scalar first so TOML serialization never emits a value after a table.
    #[serde(default = "default_domain")]
    pub domain: DomainKind,
    pub arrangement: ArrangementKind,
}

fn default_domain() -> DomainKind {
    DomainKind::Int32
}

impl ScoreDescriptor {
    /// Creates a descriptor.
    pub fn new(arrangement: ArrangementKind, domain: DomainKind) -> Self {
        Self {
            arrangement,
            domain,
        }
    }

    /// Returns the built-in shape, or `None` for a custom arrangement.
    pub fn shape(&self) -> Option<ScoreShape> {
        match &self.arrangement {
            ArrangementKind::Single => Some(ScoreShape::Single),
            ArrangementKind::HardSoft => Some(ScoreShape::HardSoft),
            ArrangementKind::HardMediumSoft => Some(ScoreShape::HardMediumSoft),
            ArrangementKind::Bendable {
                hard_levels,
                soft_levels,
            } => Some(ScoreShape::Bendable {
                hard_levels: *hard_levels,
                soft_levels: *soft_levels,
            }),
            ArrangementKind::Custom(_) => None,
        }
    }
}

impl fmt::Display for ScoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arrangement {
            ArrangementKind::Single => write!(f, "single")?,
            ArrangementKind::HardSoft => write!(f, "hardSoft")?,
            ArrangementKind::HardMediumSoft => write!(f, "hardMediumSoft")?,
            ArrangementKind::Bendable {
                hard_levels,
                soft_levels,
            } => write!(f, "bendable[{}/{}]", hard_levels, soft_levels)?,
            ArrangementKind::Custom(name) => write!(f, "custom({})", name)?,
        }
        write!(f, ":{}", self.domain)
    }
}

impl FromStr for ScoreDescriptor {
    type Err = ScoreError;

    /// Parses descriptors like `"hardSoft"`, `"single:int64"`,
    /// `"bendable[2/3]:decimal"` or `"custom(legacyShape)"`. The domain
    /// suffix defaults to `int32` when absent.
    fn from_str(s: &str) -> Result<Self, ScoreError> {
        let s = s.trim();
        let (arrangement_part, domain_part) = match s.rsplit_once(':') {
            Some((a, d)) => (a, Some(d)),
            None => (s, None),
        };

        let domain = match domain_part {
            None => default_domain(),
            Some("int32") => DomainKind::Int32,
            Some("int64") => DomainKind::Int64,
            Some("decimal") => DomainKind::Decimal,
            Some(other) => {
                return Err(ScoreError::Config(format!(
                    "Invalid numeric domain ({}) in score descriptor ({}): \
                     expected int32, int64 or decimal.",
                    other, s
                )))
            }
        };

        let arrangement = match arrangement_part {
            "single" => ArrangementKind::Single,
            "hardSoft" => ArrangementKind::HardSoft,
            "hardMediumSoft" => ArrangementKind::HardMediumSoft,
            other => {
                if let Some(inner) = other
                    .strip_prefix("bendable[")
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    let (hard, soft) = inner.split_once('/').ok_or_else(|| {
                        ScoreError::Config(format!(
                            "Invalid bendable descriptor ({}): expected bendable[hard/soft].",
                            s
                        ))
                    })?;
                    let parse_count = |part: &str| {
                        part.trim().parse::<usize>().map_err(|e| {
                            ScoreError::Config(format!(
                                "Invalid bendable level count ({}) in descriptor ({}): {}",
                                part, s, e
                            ))
                        })
                    };
                    ArrangementKind::Bendable {
                        hard_levels: parse_count(hard)?,
                        soft_levels: parse_count(soft)?,
                    }
                } else if let Some(name) = other
                    .strip_prefix("custom(")
                    .and_then(|rest| rest.strip_suffix(')'))
                {
                    ArrangementKind::Custom(name.to_string())
                } else {
                    return Err(ScoreError::Config(format!(
                        "Invalid score arrangement ({}) in descriptor ({}): expected single, \
                         hardSoft, hardMediumSoft, bendable[hard/soft] or custom(name).",
                        other, s
                    )));
                }
            }
        };

        Ok(ScoreDescriptor::new(arrangement, domain))
    }
}
