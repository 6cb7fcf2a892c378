//! Level arrangements.

use std::fmt;

/// The level arrangement of a score: how many levels it has, in which order,
/// and which of them are hard.
///
/// Unlike the fixed arrangements, [`ScoreShape::Bendable`] carries its level
/// counts at runtime, so the arrangement is a value rather than a type.
///
/// # Examples
///
/// ```
/// use scorekeep_core::ScoreShape;
///
/// let shape = ScoreShape::Bendable { hard_levels: 2, soft_levels: 3 };
/// assert_eq!(shape.level_count(), 5);
/// assert_eq!(shape.hard_level_count(), 2);
/// assert_eq!(shape.level_label(4), "soft[2]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreShape {
    /// One level, no feasibility split.
    Single,
    /// Two levels: hard then soft.
    HardSoft,
    /// Three levels: hard, medium, soft.
    HardMediumSoft,
    /// Configurable number of hard and soft levels, hard first.
    Bendable {
        hard_levels: usize,
        soft_levels: usize,
    },
}

impl ScoreShape {
    /// Returns the total number of levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        match self {
            ScoreShape::Single => 1,
            ScoreShape::HardSoft => 2,
            ScoreShape::HardMediumSoft => 3,
            ScoreShape::Bendable {
                hard_levels,
                soft_levels,
            } => hard_levels + soft_levels,
        }
    }

    /// Returns how many leading levels are hard (feasibility-relevant).
    #[inline]
    pub fn hard_level_count(&self) -> usize {
        match self {
            ScoreShape::Single => 0,
            ScoreShape::HardSoft | ScoreShape::HardMediumSoft => 1,
            ScoreShape::Bendable { hard_levels, .. } => *hard_levels,
        }
    }

    /// Returns the semantic label for the level at the given index.
    ///
    /// # Panics
    /// Panics if `index >= level_count()`.
    pub fn level_label(&self, index: usize) -> String {
        match self {
            ScoreShape::Single => match index {
                0 => "score".to_string(),
                _ => panic!("Single score has 1 level, got index {}", index),
            },
            ScoreShape::HardSoft => match index {
                0 => "hard".to_string(),
                1 => "soft".to_string(),
                _ => panic!("HardSoft score has 2 levels, got index {}", index),
            },
            ScoreShape::HardMediumSoft => match index {
                0 => "hard".to_string(),
                1 => "medium".to_string(),
                2 => "soft".to_string(),
                _ => panic!("HardMediumSoft score has 3 levels, got index {}", index),
            },
            ScoreShape::Bendable {
                hard_levels,
                soft_levels,
            } => {
                if index < *hard_levels {
                    format!("hard[{}]", index)
                } else if index < hard_levels + soft_levels {
                    format!("soft[{}]", index - hard_levels)
                } else {
                    panic!(
                        "Bendable score has {} levels, got index {}",
                        hard_levels + soft_levels,
                        index
                    )
                }
            }
        }
    }
}

impl fmt::Display for ScoreShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreShape::Single => write!(f, "single"),
            ScoreShape::HardSoft => write!(f, "hardSoft"),
            ScoreShape::HardMediumSoft => write!(f, "hardMediumSoft"),
            ScoreShape::Bendable {
                hard_levels,
                soft_levels,
            } => write!(f, "bendable[{}/{}]", hard_levels, soft_levels),
        }
    }
}
