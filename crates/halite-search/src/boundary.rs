//! Termination bookkeeping for the shell-expanding sampler.

use halite_core::{Fractional3D, ToleranceComparer};
use halite_encode::UnitCellVectorEncoder;

/// Distances from a start point to the six boundary planes of the covered
/// supercell.
///
/// Each basis-vector pair spans a family of parallel lattice planes; the
/// slab of cells visited so far is bounded by one lower and one upper plane
/// per family. The spacing of a family is the projection of the remaining
/// basis vector onto the family's unit normal, which stays correct for
/// skew cells where the bare vector length overstates the spacing. Once
/// every plane is at least the search radius away, no unvisited cell can
/// hold a hit and the search may stop.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBoundary {
    // Lower/upper plane distance per family, in Å.
    distances: [f64; 6],
    spacings: [f64; 3],
}

impl SearchBoundary {
    /// Set up the boundary of the single cell containing `start`.
    pub fn new(encoder: &UnitCellVectorEncoder, start: &Fractional3D) -> Self {
        let (base_a, base_b, base_c) = encoder.base_vectors();
        let spacings = [
            base_a.dot(&base_b.cross(&base_c).normalized()).abs(),
            base_b.dot(&base_c.cross(&base_a).normalized()).abs(),
            base_c.dot(&base_a.cross(&base_b).normalized()).abs(),
        ];
        let trimmed = encoder.origin_cell_trimmed(start);
        let (ta, tb, tc) = (trimmed.a, trimmed.b, trimmed.c);
        let distances = [
            ta * spacings[0],
            (1.0 - ta) * spacings[0],
            tb * spacings[1],
            (1.0 - tb) * spacings[1],
            tc * spacings[2],
            (1.0 - tc) * spacings[2],
        ];
        Self { distances, spacings }
    }

    /// Push every plane outward by whole cells.
    pub fn expand(&mut self, steps: u32) {
        let steps = f64::from(steps);
        for (i, distance) in self.distances.iter_mut().enumerate() {
            *distance += steps * self.spacings[i / 2];
        }
    }

    /// Distance to the nearest boundary plane.
    pub fn min_distance(&self) -> f64 {
        self.distances.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Whether every boundary plane is at least `radius` away.
    pub fn covers(&self, radius: f64, comparer: &ToleranceComparer) -> bool {
        !comparer.less_than(self.min_distance(), radius)
    }
}
