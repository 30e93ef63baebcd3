//! Rotation-invariant comparison of point geometries.

use crate::mass_point::{inertia_tensor, shift_to_mass_center, CartesianMassPoint};
use halite_core::ToleranceComparer;

/// Rotation- and translation-invariant moments of a mass-point set.
///
/// Two geometries related by a rigid motion (or a mirror) produce identical
/// indicators, so indicator equality is a cheap necessary condition for
/// symmetry equivalence without a space-group table. It is not sufficient:
/// distinct geometries can share all six moments. Callers that need exact
/// equivalence must verify candidates against the full symmetry table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryIndicator {
    /// Trace of the mass-centered inertia tensor.
    pub inertia_trace: f64,
    /// Sum of principal minors of the mass-centered inertia tensor.
    pub inertia_minor_sum: f64,
    /// Determinant of the mass-centered inertia tensor.
    pub inertia_det: f64,
    /// Total mass of the set.
    pub total_mass: f64,
    /// Mass-weighted sum of distances from the mass center.
    pub mass_distance_sum: f64,
    /// Number of points in the set.
    pub point_count: usize,
}

impl SymmetryIndicator {
    /// Compute the indicator of a mass-point set.
    pub fn of(points: &[CartesianMassPoint]) -> Self {
        let centered = shift_to_mass_center(points);
        let tensor = inertia_tensor(&centered);
        Self {
            inertia_trace: tensor.trace(),
            inertia_minor_sum: tensor.minor_sum(),
            inertia_det: tensor.determinant(),
            total_mass: centered.iter().map(|p| p.mass).sum(),
            mass_distance_sum: centered
                .iter()
                .map(|p| p.mass * p.vector.length())
                .sum(),
            point_count: centered.len(),
        }
    }

    /// Whether two indicators agree in every moment within tolerance.
    pub fn equivalent(&self, other: &Self, comparer: &ToleranceComparer) -> bool {
        self.point_count == other.point_count
            && comparer.equals(self.total_mass, other.total_mass)
            && comparer.equals(self.mass_distance_sum, other.mass_distance_sum)
            && comparer.equals(self.inertia_trace, other.inertia_trace)
            && comparer.equals(self.inertia_minor_sum, other.inertia_minor_sum)
            && comparer.equals(self.inertia_det, other.inertia_det)
    }
}
