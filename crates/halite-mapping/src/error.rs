//! Error types for transition mapping.

use halite_core::Fractional3D;
use std::fmt;

/// Errors raised while mapping transitions onto a lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingError {
    /// A kinetic transition path holds fewer than two positions.
    ShortTransitionPath {
        /// Number of positions supplied.
        found: usize,
    },
    /// A position required by a mapping is not on the encoded lattice.
    ///
    /// The transition geometry and the encoder describe different crystals;
    /// the whole build attempt is unusable.
    LatticeMismatch {
        /// The position that failed to encode or decode.
        position: Fractional3D,
    },
    /// A Metropolis transition names a sublattice index with no entry in
    /// the supplied position sets.
    PositionIndexOutOfBounds {
        /// The index named by the transition.
        index: usize,
        /// Number of position sets supplied.
        available: usize,
    },
    /// A Metropolis position set is empty, so no mapping can exist.
    EmptyPositionSet {
        /// The sublattice index whose set is empty.
        position_index: usize,
    },
    /// An intermediate-position filter was given a map whose step count
    /// does not match the mappings.
    IntermediateMapLengthMismatch {
        /// Steps in each mapping.
        expected: usize,
        /// Entries in the supplied map.
        found: usize,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortTransitionPath { found } => {
                write!(f, "a kinetic transition needs at least 2 positions, got {found}")
            }
            Self::LatticeMismatch { position } => {
                write!(f, "position {position} is not on the encoded lattice")
            }
            Self::PositionIndexOutOfBounds { index, available } => {
                write!(
                    f,
                    "transition references position set {index}, only {available} supplied"
                )
            }
            Self::EmptyPositionSet { position_index } => {
                write!(f, "position set {position_index} is empty")
            }
            Self::IntermediateMapLengthMismatch { expected, found } => {
                write!(
                    f,
                    "intermediate map covers {found} steps, mappings have {expected}"
                )
            }
        }
    }
}

impl std::error::Error for MappingError {}
