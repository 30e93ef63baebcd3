//! The canonical, sorted unit-cell position list.

use crate::error::EncodeError;
use halite_core::{Fractional3D, ToleranceComparer};

/// The canonical list of unit-cell positions.
///
/// Built once from raw fractional positions: every input is folded into the
/// origin cell, the result is sorted lexicographically and tolerance-
/// duplicates are dropped. The index of a position in this list is its
/// sublattice index, the `p` of a 4D address, so the list is immutable
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionList {
    positions: Vec<Fractional3D>,
    comparer: ToleranceComparer,
}

impl PositionList {
    /// Build the canonical list from raw positions.
    ///
    /// Positions outside the origin cell are folded in first, so
    /// `(1.5, 0.5, 0.5)` and `(0.5, 0.5, 0.5)` collapse to one entry.
    pub fn new(
        positions: &[Fractional3D],
        comparer: ToleranceComparer,
    ) -> Result<Self, EncodeError> {
        if positions.is_empty() {
            return Err(EncodeError::EmptyPositionList);
        }
        let mut trimmed: Vec<Fractional3D> = positions
            .iter()
            .map(|v| v.trim_to_unit_cell(&comparer))
            .collect();
        trimmed.sort_by(|lhs, rhs| lhs.compare_lexicographic(rhs, &comparer));
        trimmed.dedup_by(|lhs, rhs| lhs.equals_with(rhs, &comparer));
        Ok(Self {
            positions: trimmed,
            comparer,
        })
    }

    /// The comparer the list was built with.
    pub fn comparer(&self) -> &ToleranceComparer {
        &self.comparer
    }

    /// Sublattice index of a position already folded into the origin cell.
    ///
    /// Binary search with the list's own comparer; `None` when no entry
    /// matches within tolerance.
    pub fn index_of(&self, position: &Fractional3D) -> Option<usize> {
        self.positions
            .binary_search_by(|entry| entry.compare_lexicographic(position, &self.comparer))
            .ok()
    }

    /// The position at a sublattice index.
    pub fn get(&self, index: usize) -> Option<&Fractional3D> {
        self.positions.get(index)
    }

    /// Number of canonical positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the list is empty. Always `false` for constructed lists.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate the canonical positions in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Fractional3D> {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_input() {
        let err = PositionList::new(&[], ToleranceComparer::default()).unwrap_err();
        assert_eq!(err, EncodeError::EmptyPositionList);
    }

    #[test]
    fn folds_sorts_and_dedups() {
        let comparer = ToleranceComparer::new(1.0e-6).unwrap();
        let list = PositionList::new(
            &[
                Fractional3D::new(1.5, 0.5, 0.5),
                Fractional3D::new(0.5, 0.5, 0.5),
                Fractional3D::new(0.0, 0.0, 0.0),
                Fractional3D::new(0.5, 0.5, 0.5 + 1.0e-8),
            ],
            comparer,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&Fractional3D::new(0.0, 0.0, 0.0)));
        assert_eq!(list.index_of(&Fractional3D::new(0.5, 0.5, 0.5)), Some(1));
    }

    #[test]
    fn index_of_misses_unknown_position() {
        let list = PositionList::new(
            &[Fractional3D::new(0.0, 0.0, 0.0)],
            ToleranceComparer::default(),
        )
        .unwrap();
        assert_eq!(list.index_of(&Fractional3D::new(0.25, 0.0, 0.0)), None);
    }

    proptest! {
        #[test]
        fn index_of_inverts_get(
            positions in proptest::collection::vec(
                (0.0..1.0_f64, 0.0..1.0_f64, 0.0..1.0_f64)
                    .prop_map(|(a, b, c)| Fractional3D::new(a, b, c)),
                1..12,
            )
        ) {
            let list =
                PositionList::new(&positions, ToleranceComparer::default()).unwrap();
            for i in 0..list.len() {
                let entry = *list.get(i).unwrap();
                prop_assert_eq!(list.index_of(&entry), Some(i));
            }
        }
    }
}
