//! The affine symmetry operation.

use crate::error::SymmetryError;
use halite_core::{Fractional3D, ToleranceComparer, Vector3D};
use std::fmt;

/// Default trim tolerance for operations built without an explicit one.
pub const DEFAULT_TRIM_TOLERANCE: f64 = 1.0e-10;

/// An affine symmetry operation `v ↦ M·v + t` on fractional coordinates.
///
/// The twelve coefficients are the rows of the 3×4 augmented matrix in
/// row-major order: indices 0..4 produce the first output coordinate,
/// 4..8 the second, 8..12 the third, with the fourth column holding the
/// translation. One data-holding type covers every operation of a space
/// group; the human-readable `literal` (for example `"-y, x-y, z"`) rides
/// along for diagnostics only and takes no part in equality.
#[derive(Debug, Clone)]
pub struct SymmetryOperation {
    coefficients: [f64; 12],
    trim: ToleranceComparer,
    literal: String,
}

impl SymmetryOperation {
    /// Build an operation from exactly twelve row-major coefficients.
    ///
    /// Uses [`DEFAULT_TRIM_TOLERANCE`] for trimming.
    pub fn from_coefficients(
        coefficients: &[f64],
        literal: impl Into<String>,
    ) -> Result<Self, SymmetryError> {
        Self::with_trim_tolerance(coefficients, literal, DEFAULT_TRIM_TOLERANCE)
    }

    /// Build an operation with an explicit trim tolerance.
    pub fn with_trim_tolerance(
        coefficients: &[f64],
        literal: impl Into<String>,
        trim_tolerance: f64,
    ) -> Result<Self, SymmetryError> {
        let coefficients: [f64; 12] = coefficients
            .try_into()
            .map_err(|_| SymmetryError::WrongCoefficientCount {
                found: coefficients.len(),
            })?;
        let trim = ToleranceComparer::new(trim_tolerance)
            .map_err(|_| SymmetryError::InvalidTrimTolerance {
                value: trim_tolerance,
            })?;
        Ok(Self {
            coefficients,
            trim,
            literal: literal.into(),
        })
    }

    /// The identity operation `x, y, z`.
    pub fn identity() -> Self {
        Self {
            coefficients: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
            trim: ToleranceComparer::default(),
            literal: String::from("x, y, z"),
        }
    }

    /// The twelve row-major coefficients.
    pub fn coefficients(&self) -> &[f64; 12] {
        &self.coefficients
    }

    /// The human-readable operation literal.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The trim tolerance used by [`apply_trimmed`](Self::apply_trimmed).
    pub fn trim_tolerance(&self) -> f64 {
        self.trim.tolerance()
    }

    /// Apply the operation without folding the result into the unit cell.
    pub fn apply<V: Vector3D>(&self, v: &V) -> V {
        let (a, b, c) = v.coordinates();
        let m = &self.coefficients;
        V::from_coordinates(
            m[0] * a + m[1] * b + m[2] * c + m[3],
            m[4] * a + m[5] * b + m[6] * c + m[7],
            m[8] * a + m[9] * b + m[10] * c + m[11],
        )
    }

    /// Apply the operation and fold the result into the origin cell using
    /// the operation's own trim tolerance.
    pub fn apply_trimmed(&self, v: &Fractional3D) -> Fractional3D {
        self.apply(v).trim_to_unit_cell(&self.trim)
    }

    /// Apply the operation and fold with a caller-supplied comparer.
    pub fn apply_trimmed_with(
        &self,
        v: &Fractional3D,
        comparer: &ToleranceComparer,
    ) -> Fractional3D {
        self.apply(v).trim_to_unit_cell(comparer)
    }

    /// Apply the operation to every vector, lazily and in order.
    pub fn apply_all<'a, V: Vector3D>(
        &'a self,
        vectors: &'a [V],
    ) -> impl Iterator<Item = V> + 'a {
        vectors.iter().map(move |v| self.apply(v))
    }

    /// A copy of this operation with its translation shifted by `delta`.
    ///
    /// The linear part is untouched. This is how one operation of the
    /// space-group table is replicated across neighboring cells.
    pub fn translated(&self, delta: &Fractional3D) -> Self {
        let mut coefficients = self.coefficients;
        coefficients[3] += delta.a;
        coefficients[7] += delta.b;
        coefficients[11] += delta.c;
        Self {
            coefficients,
            trim: self.trim,
            literal: self.literal.clone(),
        }
    }

    /// Composition `self ∘ other`: applying the result equals applying
    /// `other` first, then `self`.
    ///
    /// The composite keeps `self`'s trim tolerance and joins the literals.
    pub fn compose(&self, other: &Self) -> Self {
        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut m = [0.0_f64; 12];
        for row in 0..3 {
            for col in 0..4 {
                let mut sum = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col];
                if col == 3 {
                    sum += a[row * 4 + 3];
                }
                m[row * 4 + col] = sum;
            }
        }
        Self {
            coefficients: m,
            trim: self.trim,
            literal: format!("({}) ∘ ({})", self.literal, other.literal),
        }
    }
}

impl PartialEq for SymmetryOperation {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
    }
}

impl fmt::Display for SymmetryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}
