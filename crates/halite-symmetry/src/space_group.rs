//! The space-group collaborator and the sequence-expansion algorithm.
//!
//! Space-group databases live outside this workspace. Consumers hand in any
//! type implementing [`SpaceGroupService`]; the free functions here do the
//! actual expansion work given a plain operation table, so an implementation
//! over a loaded table is a thin wrapper.

use crate::operation::SymmetryOperation;
use halite_core::{Fractional3D, ToleranceComparer};

/// Source of symmetry-equivalent positions and position sequences.
///
/// Implementations are expected to be deterministic: the same input must
/// yield the same output in the same order, since downstream model building
/// derives stable indices from these lists.
pub trait SpaceGroupService {
    /// All symmetry-equivalent images of one position, folded into the
    /// origin cell, deduplicated, in canonical order.
    fn orbit(&self, origin: &Fractional3D) -> Vec<Fractional3D>;

    /// Every symmetry- and translation-equivalent image of a position
    /// sequence.
    ///
    /// Each returned sequence has its first member folded into the origin
    /// cell with all later members shifted by the same whole-cell offset,
    /// preserving the internal geometry exactly. Duplicates are removed and
    /// the result is in canonical order.
    fn equivalent_sequences(&self, path: &[Fractional3D]) -> Vec<Vec<Fractional3D>>;
}

/// Shift a sequence by whole cells so its first member lies in the origin
/// cell.
///
/// All members move by the same offset, so relative geometry is preserved
/// bit for bit.
pub fn shift_first_to_origin(
    sequence: &mut [Fractional3D],
    comparer: &ToleranceComparer,
) {
    let Some(first) = sequence.first() else {
        return;
    };
    let (a, b, c) = first.cell_offset(comparer);
    if (a, b, c) == (0, 0, 0) {
        return;
    }
    let shift = Fractional3D::new(f64::from(a), f64::from(b), f64::from(c));
    for v in sequence {
        *v = *v - shift;
    }
}

/// Expand one position sequence through an operation table.
///
/// Applies every operation to the whole sequence, folds each image's first
/// member into the origin cell, then sorts and removes tolerance-duplicates.
pub fn expand_sequences(
    operations: &[SymmetryOperation],
    path: &[Fractional3D],
    comparer: &ToleranceComparer,
) -> Vec<Vec<Fractional3D>> {
    let mut sequences: Vec<Vec<Fractional3D>> = operations
        .iter()
        .map(|op| {
            let mut mapped: Vec<Fractional3D> = op.apply_all(path).collect();
            shift_first_to_origin(&mut mapped, comparer);
            mapped
        })
        .collect();
    sequences.sort_by(|lhs, rhs| compare_sequences(lhs, rhs, comparer));
    sequences.dedup_by(|lhs, rhs| compare_sequences(lhs, rhs, comparer).is_eq());
    sequences
}

/// Expand one position into its Wyckoff orbit through an operation table.
pub fn expand_orbit(
    operations: &[SymmetryOperation],
    origin: &Fractional3D,
    comparer: &ToleranceComparer,
) -> Vec<Fractional3D> {
    let mut positions: Vec<Fractional3D> = operations
        .iter()
        .map(|op| op.apply_trimmed_with(origin, comparer))
        .collect();
    positions.sort_by(|lhs, rhs| lhs.compare_lexicographic(rhs, comparer));
    positions.dedup_by(|lhs, rhs| lhs.equals_with(rhs, comparer));
    positions
}

fn compare_sequences(
    lhs: &[Fractional3D],
    rhs: &[Fractional3D],
    comparer: &ToleranceComparer,
) -> std::cmp::Ordering {
    lhs.len().cmp(&rhs.len()).then_with(|| {
        lhs.iter()
            .zip(rhs)
            .map(|(l, r)| l.compare_lexicographic(r, comparer))
            .find(|ord| ord.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
