//! Tolerance-aware floating-point comparison.
//!
//! Every float decision in the workspace (position dedup, cell trimming,
//! radial interval tests) funnels through one [`ToleranceComparer`] so the
//! whole pipeline shares a single notion of "equal enough".

use crate::error::CoordinateError;
use std::cmp::Ordering;

/// Absolute-tolerance comparer for `f64` values.
///
/// Two values compare equal when their absolute difference is at most the
/// tolerance. The tolerance is absolute rather than relative because the
/// quantities compared here (fractional coordinates, Ångström distances)
/// live in a narrow, known magnitude range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparer {
    tolerance: f64,
}

impl ToleranceComparer {
    /// Create a comparer with the given absolute tolerance.
    ///
    /// Rejects non-finite or negative tolerances.
    pub fn new(tolerance: f64) -> Result<Self, CoordinateError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CoordinateError::InvalidTolerance { value: tolerance });
        }
        Ok(Self { tolerance })
    }

    /// The absolute tolerance of this comparer.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether two values are equal within tolerance.
    pub fn equals(&self, lhs: f64, rhs: f64) -> bool {
        (lhs - rhs).abs() <= self.tolerance
    }

    /// Whether a value is zero within tolerance.
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.tolerance
    }

    /// Three-way comparison that treats within-tolerance values as equal.
    pub fn compare(&self, lhs: f64, rhs: f64) -> Ordering {
        if self.equals(lhs, rhs) {
            Ordering::Equal
        } else if lhs < rhs {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Whether `lhs` is strictly below `rhs`, outside tolerance.
    pub fn less_than(&self, lhs: f64, rhs: f64) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }

    /// Floor that snaps values just below an integer boundary upward.
    ///
    /// `floor(1.0 - ε)` with `ε` inside tolerance yields `1.0`, not `0.0`.
    /// Without the snap, a coordinate that is numerically a hair below a
    /// cell boundary would trim to ~1.0 instead of ~0.0 and be assigned to
    /// the wrong cell.
    pub fn floor(&self, value: f64) -> f64 {
        let floored = value.floor();
        if self.equals(value, floored + 1.0) {
            floored + 1.0
        } else {
            floored
        }
    }

    /// [`floor`](Self::floor) narrowed to `i32`.
    ///
    /// Coordinates handled here are cell offsets of finite crystal models,
    /// well inside `i32` range.
    pub fn floor_to_int(&self, value: f64) -> i32 {
        self.floor(value) as i32
    }
}

impl Default for ToleranceComparer {
    /// A comparer with tolerance `1.0e-10`, suitable for fractional
    /// coordinates of typical unit cells.
    fn default() -> Self {
        Self { tolerance: 1.0e-10 }
    }
}
