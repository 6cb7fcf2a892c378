//! Generic score value: one level arrangement crossed with one numeric domain.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;
use smallvec::{smallvec, SmallVec};

use super::domain::ScoreDomain;
use super::shape::ScoreShape;

/// Inline capacity covering every fixed arrangement; bendable may spill.
pub(crate) const INLINE_LEVELS: usize = 4;

pub(crate) type Levels<V> = SmallVec<[V; INLINE_LEVELS]>;

/// An immutable multi-level score value.
///
/// A score carries its [`ScoreShape`], its per-level values (all in the
/// numeric domain `D`), and a separate `init_score`: a penalty for
/// unassigned entities that is combined only at snapshot time and never by
/// per-match deltas.
///
/// When comparing scores, `init_score` is compared first, then levels in
/// declared order (hard before soft).
///
/// # Examples
///
/// ```
/// use scorekeep_core::score::{Int32, ScoreValue};
///
/// let score1 = ScoreValue::<Int32>::hard_soft(-1, -100); // 1 hard broken
/// let score2 = ScoreValue::<Int32>::hard_soft(0, -200);  // feasible but poor
///
/// // Feasible solutions are always better than infeasible ones
/// assert!(score2 > score1);
/// assert!(score2.is_feasible());
/// assert_eq!(format!("{}", score2), "0hard/-200soft");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScoreValue<D: ScoreDomain> {
    shape: ScoreShape,
    init_score: i32,
    levels: Levels<D::Value>,
}

impl<D: ScoreDomain> ScoreValue<D> {
    /// Creates the zero score for the given shape.
    pub fn zero(shape: ScoreShape) -> Self {
        ScoreValue {
            shape,
            init_score: 0,
            levels: smallvec![D::Value::zero(); shape.level_count()],
        }
    }

    /// Creates a score from explicit level values.
    ///
    /// # Panics
    /// Panics if the number of levels doesn't match the shape.
    pub fn of_levels(shape: ScoreShape, levels: &[D::Value]) -> Self {
        assert_eq!(
            levels.len(),
            shape.level_count(),
            "{} score requires exactly {} levels",
            shape,
            shape.level_count()
        );
        ScoreValue {
            shape,
            init_score: 0,
            levels: SmallVec::from_slice(levels),
        }
    }

    /// Creates a score that only contributes to one level.
    ///
    /// This is the constructor behind the single-level fast path: all other
    /// levels are zero.
    ///
    /// # Panics
    /// Panics if `index >= shape.level_count()`.
    pub fn of_level(shape: ScoreShape, index: usize, value: D::Value) -> Self {
        let mut score = ScoreValue::zero(shape);
        assert!(
            index < score.levels.len(),
            "{} score has {} levels, got index {}",
            shape,
            shape.level_count(),
            index
        );
        score.levels[index] = value;
        score
    }

    /// Creates a single-level score.
    pub fn simple(score: D::Value) -> Self {
        ScoreValue::of_levels(ScoreShape::Single, &[score])
    }

    /// Creates a hard/soft score.
    pub fn hard_soft(hard: D::Value, soft: D::Value) -> Self {
        ScoreValue::of_levels(ScoreShape::HardSoft, &[hard, soft])
    }

    /// Creates a hard/medium/soft score.
    pub fn hard_medium_soft(hard: D::Value, medium: D::Value, soft: D::Value) -> Self {
        ScoreValue::of_levels(ScoreShape::HardMediumSoft, &[hard, medium, soft])
    }

    /// Creates a bendable score; the shape is taken from the slice lengths.
    pub fn bendable(hard: &[D::Value], soft: &[D::Value]) -> Self {
        let mut levels = Levels::from_slice(hard);
        levels.extend_from_slice(soft);
        ScoreValue {
            shape: ScoreShape::Bendable {
                hard_levels: hard.len(),
                soft_levels: soft.len(),
            },
            init_score: 0,
            levels,
        }
    }

    /// Returns this score with the given init score.
    pub fn with_init_score(mut self, init_score: i32) -> Self {
        self.init_score = init_score;
        self
    }

    /// Returns the shape of this score.
    #[inline]
    pub fn shape(&self) -> ScoreShape {
        self.shape
    }

    /// Returns the init score (0 for a fully initialized solution).
    #[inline]
    pub fn init_score(&self) -> i32 {
        self.init_score
    }

    /// Returns the value at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    #[inline]
    pub fn level(&self, index: usize) -> D::Value {
        self.levels[index]
    }

    /// Returns all level values in declared order.
    #[inline]
    pub fn levels(&self) -> &[D::Value] {
        &self.levels
    }

    /// Returns true if the init score and every level are zero.
    pub fn is_zero(&self) -> bool {
        self.init_score == 0 && self.levels.iter().all(|v| v.is_zero())
    }

    /// Returns true if this score represents a feasible solution:
    /// no unassigned entities and no broken hard level.
    pub fn is_feasible(&self) -> bool {
        self.init_score >= 0
            && self.levels[..self.shape.hard_level_count()]
                .iter()
                .all(|v| *v >= D::Value::zero())
    }

    fn ensure_compatible(&self, other: &Self) {
        assert_eq!(
            self.shape, other.shape,
            "Incompatible score shapes: {} vs {}",
            self.shape, other.shape
        );
    }
}

impl<D: ScoreDomain> Add for ScoreValue<D> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.ensure_compatible(&other);
        ScoreValue {
            shape: self.shape,
            init_score: self.init_score + other.init_score,
            levels: self
                .levels
                .iter()
                .zip(other.levels.iter())
                .map(|(a, b)| *a + *b)
                .collect(),
        }
    }
}

impl<D: ScoreDomain> Sub for ScoreValue<D> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.ensure_compatible(&other);
        ScoreValue {
            shape: self.shape,
            init_score: self.init_score - other.init_score,
            levels: self
                .levels
                .iter()
                .zip(other.levels.iter())
                .map(|(a, b)| *a - *b)
                .collect(),
        }
    }
}

impl<D: ScoreDomain> Neg for ScoreValue<D> {
    type Output = Self;

    fn neg(self) -> Self {
        ScoreValue {
            shape: self.shape,
            init_score: -self.init_score,
            levels: self.levels.iter().map(|v| -*v).collect(),
        }
    }
}

impl<D: ScoreDomain> Ord for ScoreValue<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ensure_compatible(other);
        match self.init_score.cmp(&other.init_score) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        for (a, b) in self.levels.iter().zip(other.levels.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl<D: ScoreDomain> PartialOrd for ScoreValue<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: ScoreDomain> fmt::Debug for ScoreValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoreValue({}, init: {}, levels: {:?})",
            self.shape, self.init_score, self.levels
        )
    }
}

impl<D: ScoreDomain> fmt::Display for ScoreValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.init_score != 0 {
            write!(f, "{}init/", self.init_score)?;
        }
        match self.shape {
            ScoreShape::Single => write!(f, "{}", self.levels[0]),
            ScoreShape::Bendable { hard_levels, .. } => {
                let join = |values: &[D::Value]| {
                    values
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join("/")
                };
                write!(
                    f,
                    "[{}]hard/[{}]soft",
                    join(&self.levels[..hard_levels]),
                    join(&self.levels[hard_levels..])
                )
            }
            _ => {
                let parts: Vec<String> = self
                    .levels
                    .iter()
                    .enumerate()
                    .map(|(index, v)| format!("{}{}", v, self.shape.level_label(index)))
                    .collect();
                write!(f, "{}", parts.join("/"))
            }
        }
    }
}
