//! Concrete placements of kinetic transitions.

use halite_core::Fractional3D;
use halite_encode::LatticeVector4D;
use smallvec::SmallVec;

/// One concrete placement of a kinetic transition on the lattice.
///
/// Carries the path both as 4D addresses and as the fractional positions
/// they decode to; the two stay index-aligned and hold at least two
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticMapping {
    /// Index of the transition this mapping realizes.
    pub transition_index: usize,
    /// The path as absolute 4D addresses.
    pub encoded_path: SmallVec<[LatticeVector4D; 4]>,
    /// The path as absolute fractional positions.
    pub fractional_path: SmallVec<[Fractional3D; 4]>,
}

impl KineticMapping {
    /// The start address of the jump.
    pub fn start(&self) -> &LatticeVector4D {
        self.encoded_path
            .first()
            .expect("mapping paths hold at least two positions")
    }

    /// The destination address of the jump.
    pub fn end(&self) -> &LatticeVector4D {
        self.encoded_path
            .last()
            .expect("mapping paths hold at least two positions")
    }

    /// Number of steps in the path.
    pub fn step_count(&self) -> usize {
        self.encoded_path.len().saturating_sub(1)
    }

    /// The same jump walked in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            transition_index: self.transition_index,
            encoded_path: self.encoded_path.iter().rev().copied().collect(),
            fractional_path: self.fractional_path.iter().rev().copied().collect(),
        }
    }

    /// Whether `other` is the reverse jump of `self`.
    ///
    /// True iff the relative 4D vectors are exact negations and the
    /// endpoint sublattice indices swap. Whole-cell translations are
    /// ignored, so any periodic image of the reverse jump counts.
    pub fn is_geometric_inversion_of(&self, other: &Self) -> bool {
        let forward = *self.end() - *self.start();
        let backward = *other.end() - *other.start();
        forward == -backward
            && self.start().p == other.end().p
            && self.end().p == other.start().p
    }

    /// Direction-independent identity key of the path geometry.
    pub fn path_key(&self) -> PathKey {
        PathKey::of(&self.fractional_path)
    }
}

/// A hashable, direction-independent key over a fractional path.
///
/// Coordinates are rounded to whole femtometre-scale integers (1e-5 of a
/// cell), then the lexicographically smaller of the forward and reverse
/// coordinate sequences is kept. Two chains that trace the same sites in
/// either direction collapse to one key; tolerance logic is not needed
/// because equal-by-construction positions round identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey(Vec<(i64, i64, i64)>);

impl PathKey {
    /// Key of a fractional path.
    pub fn of(path: &[Fractional3D]) -> Self {
        let rounded: Vec<(i64, i64, i64)> = path
            .iter()
            .map(|v| {
                (
                    (v.a * 1.0e5).round() as i64,
                    (v.b * 1.0e5).round() as i64,
                    (v.c * 1.0e5).round() as i64,
                )
            })
            .collect();
        let mut reversed = rounded.clone();
        reversed.reverse();
        if reversed < rounded {
            Self(reversed)
        } else {
            Self(rounded)
        }
    }
}
