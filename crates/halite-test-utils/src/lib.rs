//! Shared fixtures for Halite tests.
//!
//! Small reference crystals (simple cubic, cesium chloride, rock salt),
//! a table-backed [`SiteLookup`] and a table-backed [`SpaceGroupService`]
//! driven by an explicit operation list.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use halite_core::{
    Cartesian3D, Fractional3D, FractionalCoordinateSystem, ToleranceComparer,
    VectorTransformer,
};
use halite_encode::{PositionList, UnitCellVectorEncoder};
use halite_search::SiteLookup;
use halite_symmetry::{expand_orbit, expand_sequences, SpaceGroupService, SymmetryOperation};

/// The comparer used throughout the fixtures.
pub fn test_comparer() -> ToleranceComparer {
    ToleranceComparer::new(1.0e-6).expect("fixture tolerance is valid")
}

/// A cubic coordinate system with lattice constant `a` (Å).
pub fn cubic_system(a: f64) -> FractionalCoordinateSystem {
    FractionalCoordinateSystem::new(
        Cartesian3D::new(a, 0.0, 0.0),
        Cartesian3D::new(0.0, a, 0.0),
        Cartesian3D::new(0.0, 0.0, a),
    )
    .expect("cubic basis is regular")
}

fn encoder_for(a: f64, positions: &[Fractional3D]) -> UnitCellVectorEncoder {
    let list = PositionList::new(positions, test_comparer()).expect("fixture positions");
    UnitCellVectorEncoder::new(list, VectorTransformer::new(cubic_system(a)))
}

/// Simple cubic cell: one site at the corner.
pub fn simple_cubic_encoder(a: f64) -> UnitCellVectorEncoder {
    encoder_for(a, &[Fractional3D::new(0.0, 0.0, 0.0)])
}

/// Cesium-chloride cell: corner plus body center.
pub fn cesium_chloride_encoder(a: f64) -> UnitCellVectorEncoder {
    encoder_for(
        a,
        &[
            Fractional3D::new(0.0, 0.0, 0.0),
            Fractional3D::new(0.5, 0.5, 0.5),
        ],
    )
}

/// Rock-salt cell: fcc cation sublattice plus fcc anion sublattice.
pub fn rock_salt_encoder(a: f64) -> UnitCellVectorEncoder {
    encoder_for(
        a,
        &[
            // cations
            Fractional3D::new(0.0, 0.0, 0.0),
            Fractional3D::new(0.5, 0.5, 0.0),
            Fractional3D::new(0.5, 0.0, 0.5),
            Fractional3D::new(0.0, 0.5, 0.5),
            // anions
            Fractional3D::new(0.5, 0.0, 0.0),
            Fractional3D::new(0.0, 0.5, 0.0),
            Fractional3D::new(0.0, 0.0, 0.5),
            Fractional3D::new(0.5, 0.5, 0.5),
        ],
    )
}

/// A [`SiteLookup`] backed by one content value per sublattice index.
pub struct TableSiteLookup<C> {
    encoder: UnitCellVectorEncoder,
    contents: Vec<C>,
}

impl<C: Clone> TableSiteLookup<C> {
    /// Pair an encoder with a content table of matching cardinality.
    pub fn new(encoder: UnitCellVectorEncoder, contents: Vec<C>) -> Self {
        assert_eq!(
            encoder.position_count(),
            contents.len(),
            "one content entry per sublattice position"
        );
        Self { encoder, contents }
    }
}

impl<C: Clone> SiteLookup for TableSiteLookup<C> {
    type Content = C;

    fn encoder(&self) -> &UnitCellVectorEncoder {
        &self.encoder
    }

    fn content_at(&self, position_index: usize) -> C {
        self.contents[position_index].clone()
    }
}

/// A [`SpaceGroupService`] that expands an explicit operation table.
pub struct TableSpaceGroup {
    operations: Vec<SymmetryOperation>,
    comparer: ToleranceComparer,
}

impl TableSpaceGroup {
    /// Build the service from an operation list.
    pub fn new(operations: Vec<SymmetryOperation>, comparer: ToleranceComparer) -> Self {
        Self {
            operations,
            comparer,
        }
    }

    /// Number of operations in the table.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}

impl SpaceGroupService for TableSpaceGroup {
    fn orbit(&self, origin: &Fractional3D) -> Vec<Fractional3D> {
        expand_orbit(&self.operations, origin, &self.comparer)
    }

    fn equivalent_sequences(&self, path: &[Fractional3D]) -> Vec<Vec<Fractional3D>> {
        expand_sequences(&self.operations, path, &self.comparer)
    }
}

/// The 48 point-group operations of the full cubic group m-3m: every axis
/// permutation combined with every sign choice.
pub fn cubic_point_group() -> Vec<SymmetryOperation> {
    const AXES: [&str; 3] = ["x", "y", "z"];
    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut operations = Vec::with_capacity(48);
    for permutation in PERMUTATIONS {
        for signs in 0..8_u8 {
            let mut coefficients = [0.0_f64; 12];
            let mut literal = Vec::with_capacity(3);
            for (row, &axis) in permutation.iter().enumerate() {
                let sign = if signs & (1 << row) == 0 { 1.0 } else { -1.0 };
                coefficients[row * 4 + axis] = sign;
                literal.push(format!(
                    "{}{}",
                    if sign > 0.0 { "" } else { "-" },
                    AXES[axis]
                ));
            }
            operations.push(
                SymmetryOperation::from_coefficients(&coefficients, literal.join(", "))
                    .expect("generated operation is well-formed"),
            );
        }
    }
    operations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_point_group_has_48_distinct_operations() {
        let operations = cubic_point_group();
        assert_eq!(operations.len(), 48);
        for (i, a) in operations.iter().enumerate() {
            for b in &operations[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn table_space_group_expands_orbits() {
        let group = TableSpaceGroup::new(cubic_point_group(), test_comparer());
        // The face-center orbit under m-3m: (±1/2, 0, 0) images fold to 3
        // distinct unit-cell positions.
        let orbit = group.orbit(&Fractional3D::new(0.5, 0.0, 0.0));
        assert_eq!(orbit.len(), 3);
        // A general position sees the full group order.
        let general = group.orbit(&Fractional3D::new(0.1, 0.2, 0.3));
        assert_eq!(general.len(), 48);
    }

    #[test]
    fn rock_salt_has_eight_sublattices() {
        assert_eq!(rock_salt_encoder(5.0).position_count(), 8);
    }
}
