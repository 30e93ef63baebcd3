//! The 3D/4D codec over one unit cell.

use crate::position_list::PositionList;
use crate::vector4::LatticeVector4D;
use halite_core::{
    Cartesian3D, Fractional3D, GenericVector3D, Spherical3D, VectorTransformer,
};

/// Converts between continuous coordinates and discrete 4D lattice
/// addresses.
///
/// Encoding folds a fractional vector into the origin cell, looks the
/// folded position up in the canonical [`PositionList`] and combines the
/// sublattice index with the whole-cell offset. Every `try_*` operation
/// returns `Option`: a position not on the lattice is a domain miss, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellVectorEncoder {
    positions: PositionList,
    transformer: VectorTransformer,
}

impl UnitCellVectorEncoder {
    /// Build an encoder over a canonical position list and the crystal's
    /// transformer.
    pub fn new(positions: PositionList, transformer: VectorTransformer) -> Self {
        Self {
            positions,
            transformer,
        }
    }

    /// The canonical position list.
    pub fn positions(&self) -> &PositionList {
        &self.positions
    }

    /// The crystal's coordinate transformer.
    pub fn transformer(&self) -> &VectorTransformer {
        &self.transformer
    }

    /// Number of sublattice positions per unit cell.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// The fractional position at a sublattice index.
    pub fn position(&self, index: usize) -> Option<&Fractional3D> {
        self.positions.get(index)
    }

    /// The cartesian position at a sublattice index.
    pub fn cartesian_position(&self, index: usize) -> Option<Cartesian3D> {
        self.positions
            .get(index)
            .map(|v| self.transformer.fractional_to_cartesian(v))
    }

    /// The three cartesian base vectors of the unit cell.
    pub fn base_vectors(&self) -> (Cartesian3D, Cartesian3D, Cartesian3D) {
        self.transformer.fractional_system().base_vectors()
    }

    /// Unit-cell volume in Å³.
    pub fn cell_volume(&self) -> f64 {
        self.transformer.fractional_system().cell_volume()
    }

    /// Whole-cell offset of the cell containing a fractional position.
    pub fn target_cell_offset(&self, v: &Fractional3D) -> (i32, i32, i32) {
        v.cell_offset(self.positions.comparer())
    }

    /// A fractional position folded into the origin cell.
    pub fn origin_cell_trimmed(&self, v: &Fractional3D) -> Fractional3D {
        v.trim_to_unit_cell(self.positions.comparer())
    }

    // ── Encoding ──────────────────────────────────────────────────

    /// Encode an absolute fractional position into a 4D address.
    ///
    /// `None` when the folded position is not in the canonical list.
    pub fn try_encode(&self, v: &Fractional3D) -> Option<LatticeVector4D> {
        let (a, b, c) = self.target_cell_offset(v);
        let trimmed = self.origin_cell_trimmed(v);
        let p = self.positions.index_of(&trimmed)?;
        Some(LatticeVector4D::new(a, b, c, p as i32))
    }

    /// Encode an absolute cartesian position.
    pub fn try_encode_cartesian(&self, v: &Cartesian3D) -> Option<LatticeVector4D> {
        self.try_encode(&self.transformer.cartesian_to_fractional(v))
    }

    /// Encode an absolute spherical position.
    pub fn try_encode_spherical(&self, v: &Spherical3D) -> Option<LatticeVector4D> {
        self.try_encode(&self.transformer.spherical_to_fractional(v))
    }

    /// Encode a position in any representation.
    pub fn try_encode_generic(&self, v: &GenericVector3D) -> Option<LatticeVector4D> {
        self.try_encode(&self.transformer.to_fractional(v))
    }

    /// Encode `origin + v`.
    pub fn try_encode_with_origin(
        &self,
        origin: &Fractional3D,
        v: &Fractional3D,
    ) -> Option<LatticeVector4D> {
        self.try_encode(&(*origin + *v))
    }

    /// Encode a whole path, short-circuiting on the first miss.
    pub fn try_encode_all<'a>(
        &self,
        vectors: impl IntoIterator<Item = &'a Fractional3D>,
    ) -> Option<Vec<LatticeVector4D>> {
        vectors.into_iter().map(|v| self.try_encode(v)).collect()
    }

    /// Encode the step from `origin` to `origin + v` as a relative 4D
    /// vector.
    ///
    /// Both absolute endpoints must encode; the result is their elementwise
    /// difference, so the sublattice component is a (possibly negative)
    /// index delta.
    pub fn try_encode_as_relative(
        &self,
        origin: &Fractional3D,
        v: &Fractional3D,
    ) -> Option<LatticeVector4D> {
        let start = self.try_encode(origin)?;
        let end = self.try_encode(&(*origin + *v))?;
        Some(end - start)
    }

    // ── Decoding ──────────────────────────────────────────────────

    /// Decode an absolute 4D address into a fractional position.
    ///
    /// `None` iff the sublattice index is outside `[0, position_count)`.
    pub fn try_decode(&self, encoded: &LatticeVector4D) -> Option<Fractional3D> {
        let index = usize::try_from(encoded.p).ok()?;
        let position = self.positions.get(index)?;
        Some(
            *position
                + Fractional3D::new(
                    f64::from(encoded.a),
                    f64::from(encoded.b),
                    f64::from(encoded.c),
                ),
        )
    }

    /// Decode an absolute 4D address into a cartesian position.
    pub fn try_decode_cartesian(&self, encoded: &LatticeVector4D) -> Option<Cartesian3D> {
        self.try_decode(encoded)
            .map(|v| self.transformer.fractional_to_cartesian(&v))
    }

    /// Decode an absolute 4D address into a spherical position.
    pub fn try_decode_spherical(&self, encoded: &LatticeVector4D) -> Option<Spherical3D> {
        self.try_decode(encoded)
            .map(|v| self.transformer.fractional_to_spherical(&v))
    }

    /// Decode a whole path, short-circuiting on the first miss.
    pub fn try_decode_all<'a>(
        &self,
        encoded: impl IntoIterator<Item = &'a LatticeVector4D>,
    ) -> Option<Vec<Fractional3D>> {
        encoded.into_iter().map(|e| self.try_decode(e)).collect()
    }

    /// Decode a relative 4D vector at an absolute origin address into the
    /// fractional step it represents.
    pub fn try_decode_to_relative(
        &self,
        origin: &LatticeVector4D,
        relative: &LatticeVector4D,
    ) -> Option<Fractional3D> {
        let start = self.try_decode(origin)?;
        let end = self.try_decode(&(*origin + *relative))?;
        Some(end - start)
    }
}
