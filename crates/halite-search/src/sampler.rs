//! The shell-expanding radial sampler.

use crate::boundary::SearchBoundary;
use crate::constraint::RadialConstraint;
use crate::lookup::{LatticePoint, SiteLookup};
use halite_core::Fractional3D;
use std::cmp::Ordering;

/// Exhaustive radial search around an origin point.
///
/// Unit cells are visited shell by shell outward from the cell containing
/// the origin (Chebyshev shells, interior cells skipped on revisit). Every
/// sublattice site of every visited cell is distance-checked against the
/// constraint and offered to the predicate. The walk stops once the
/// [`SearchBoundary`] guarantees all unvisited cells lie beyond the
/// constraint's upper bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialPositionSampler;

impl RadialPositionSampler {
    /// Collect all sites in the constraint interval that pass the
    /// predicate. Hit order follows the cell walk; no hits is an empty
    /// result, not a fault.
    pub fn search<L, P>(
        lookup: &L,
        origin: &Fractional3D,
        constraint: &RadialConstraint,
        mut predicate: P,
    ) -> Vec<LatticePoint<L::Content>>
    where
        L: SiteLookup,
        P: FnMut(&LatticePoint<L::Content>) -> bool,
    {
        let encoder = lookup.encoder();
        let transformer = encoder.transformer();
        let (cell_a, cell_b, cell_c) = encoder.target_cell_offset(origin);
        let mut boundary = SearchBoundary::new(encoder, origin);
        let mut hits = Vec::new();
        let mut shell: i32 = 0;
        loop {
            for (da, db, dc) in shell_offsets(shell) {
                let cell = Fractional3D::new(
                    f64::from(cell_a + da),
                    f64::from(cell_b + db),
                    f64::from(cell_c + dc),
                );
                for (index, position) in encoder.positions().iter().enumerate() {
                    let fractional = *position + cell;
                    let distance = transformer.fractional_length(&(fractional - *origin));
                    if !constraint.contains(distance) {
                        continue;
                    }
                    let point = LatticePoint::new(fractional, lookup.content_at(index));
                    if predicate(&point) {
                        hits.push(point);
                    }
                }
            }
            if boundary.covers(constraint.max(), constraint.comparer()) {
                break;
            }
            boundary.expand(1);
            shell += 1;
        }
        hits
    }

    /// Like [`search`](Self::search), with the hits sorted by the given
    /// total order before they are returned.
    pub fn search_sorted<L, P, F>(
        lookup: &L,
        origin: &Fractional3D,
        constraint: &RadialConstraint,
        predicate: P,
        mut order: F,
    ) -> Vec<LatticePoint<L::Content>>
    where
        L: SiteLookup,
        P: FnMut(&LatticePoint<L::Content>) -> bool,
        F: FnMut(&LatticePoint<L::Content>, &LatticePoint<L::Content>) -> Ordering,
    {
        let mut hits = Self::search(lookup, origin, constraint, predicate);
        hits.sort_by(|lhs, rhs| order(lhs, rhs));
        hits
    }
}

// Cells whose Chebyshev distance from the base cell equals `shell`.
fn shell_offsets(shell: i32) -> impl Iterator<Item = (i32, i32, i32)> {
    (-shell..=shell).flat_map(move |da| {
        (-shell..=shell).flat_map(move |db| {
            (-shell..=shell)
                .map(move |dc| (da, db, dc))
                .filter(move |&(da, db, dc)| {
                    da.abs().max(db.abs()).max(dc.abs()) == shell
                })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use halite_core::{
        Cartesian3D, FractionalCoordinateSystem, ToleranceComparer, VectorTransformer,
    };
    use halite_encode::{PositionList, UnitCellVectorEncoder};

    struct TableLookup {
        encoder: UnitCellVectorEncoder,
        contents: Vec<&'static str>,
    }

    impl SiteLookup for TableLookup {
        type Content = &'static str;

        fn encoder(&self) -> &UnitCellVectorEncoder {
            &self.encoder
        }

        fn content_at(&self, position_index: usize) -> &'static str {
            self.contents[position_index]
        }
    }

    fn cubic_lookup(a: f64) -> TableLookup {
        let comparer = ToleranceComparer::new(1.0e-6).unwrap();
        let positions =
            PositionList::new(&[Fractional3D::new(0.0, 0.0, 0.0)], comparer).unwrap();
        let system = FractionalCoordinateSystem::new(
            Cartesian3D::new(a, 0.0, 0.0),
            Cartesian3D::new(0.0, a, 0.0),
            Cartesian3D::new(0.0, 0.0, a),
        )
        .unwrap();
        TableLookup {
            encoder: UnitCellVectorEncoder::new(positions, VectorTransformer::new(system)),
            contents: vec!["A"],
        }
    }

    fn rock_salt_lookup(a: f64) -> TableLookup {
        let comparer = ToleranceComparer::new(1.0e-6).unwrap();
        let positions = PositionList::new(
            &[
                Fractional3D::new(0.0, 0.0, 0.0),
                Fractional3D::new(0.5, 0.5, 0.5),
            ],
            comparer,
        )
        .unwrap();
        let system = FractionalCoordinateSystem::new(
            Cartesian3D::new(a, 0.0, 0.0),
            Cartesian3D::new(0.0, a, 0.0),
            Cartesian3D::new(0.0, 0.0, a),
        )
        .unwrap();
        TableLookup {
            encoder: UnitCellVectorEncoder::new(positions, VectorTransformer::new(system)),
            contents: vec!["Na", "Cl"],
        }
    }

    fn comparer() -> ToleranceComparer {
        ToleranceComparer::new(1.0e-6).unwrap()
    }

    #[test]
    fn simple_cubic_first_shell_has_six_sites() {
        let lookup = cubic_lookup(4.0);
        let constraint = RadialConstraint::up_to(4.0, comparer()).unwrap();
        let hits = RadialPositionSampler::search(
            &lookup,
            &Fractional3D::new(0.0, 0.0, 0.0),
            &constraint,
            |_| true,
        );
        assert_eq!(hits.len(), 6);
        for hit in &hits {
            assert_eq!(hit.content, "A");
        }
    }

    #[test]
    fn widening_the_interval_adds_the_second_shell() {
        let lookup = cubic_lookup(4.0);
        // sqrt(2)·4 ≈ 5.657 brings in the 12 edge neighbors.
        let constraint = RadialConstraint::up_to(5.7, comparer()).unwrap();
        let hits = RadialPositionSampler::search(
            &lookup,
            &Fractional3D::new(0.0, 0.0, 0.0),
            &constraint,
            |_| true,
        );
        assert_eq!(hits.len(), 18);
    }

    #[test]
    fn off_lattice_origin_is_allowed() {
        let lookup = cubic_lookup(2.0);
        // From the body center, the 8 corners sit at sqrt(3) Å.
        let constraint = RadialConstraint::up_to(1.8, comparer()).unwrap();
        let hits = RadialPositionSampler::search(
            &lookup,
            &Fractional3D::new(0.5, 0.5, 0.5),
            &constraint,
            |_| true,
        );
        assert_eq!(hits.len(), 8);
    }

    #[test]
    fn predicate_filters_by_content() {
        let lookup = rock_salt_lookup(4.0);
        let constraint = RadialConstraint::up_to(3.5, comparer()).unwrap();
        let hits = RadialPositionSampler::search(
            &lookup,
            &Fractional3D::new(0.0, 0.0, 0.0),
            &constraint,
            |point| point.content == "Cl",
        );
        // The 8 body centers at sqrt(3)/2·4 ≈ 3.46 Å.
        assert_eq!(hits.len(), 8);
        assert!(hits.iter().all(|h| h.content == "Cl"));
    }

    #[test]
    fn zero_hits_is_empty_not_a_fault() {
        let lookup = cubic_lookup(4.0);
        let constraint = RadialConstraint::up_to(1.0, comparer()).unwrap();
        let hits = RadialPositionSampler::search(
            &lookup,
            &Fractional3D::new(0.0, 0.0, 0.0),
            &constraint,
            |_| true,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn sorted_search_applies_the_order() {
        let lookup = cubic_lookup(4.0);
        let constraint = RadialConstraint::up_to(5.7, comparer()).unwrap();
        let origin = Fractional3D::new(0.0, 0.0, 0.0);
        let transformer = lookup.encoder().transformer().clone();
        let hits = RadialPositionSampler::search_sorted(
            &lookup,
            &origin,
            &constraint,
            |_| true,
            |lhs, rhs| {
                let dl = transformer.fractional_length(&(lhs.fractional - origin));
                let dr = transformer.fractional_length(&(rhs.fractional - origin));
                dl.total_cmp(&dr)
            },
        );
        assert_eq!(hits.len(), 18);
        let first = transformer.fractional_length(&(hits[0].fractional - origin));
        let last = transformer.fractional_length(&(hits[17].fractional - origin));
        assert!((first - 4.0).abs() < 1.0e-9);
        assert!((last - 4.0 * 2.0_f64.sqrt()).abs() < 1.0e-9);
    }
}
