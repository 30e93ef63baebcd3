//! Abstract transition templates.

use crate::error::MappingError;
use halite_core::Fractional3D;

/// A kinetic jump described by its reference geometry.
///
/// The path runs from the start site through any intermediate transition
/// states to the destination site, in fractional coordinates of one
/// arbitrary placement. Mapping replicates it over the whole lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticTransition {
    /// Stable identifier of the transition in the model input.
    pub index: usize,
    /// Reference path geometry, at least two positions.
    pub path: Vec<Fractional3D>,
}

impl KineticTransition {
    /// Create a transition, rejecting paths of fewer than two positions.
    pub fn new(index: usize, path: Vec<Fractional3D>) -> Result<Self, MappingError> {
        if path.len() < 2 {
            return Err(MappingError::ShortTransitionPath { found: path.len() });
        }
        Ok(Self { index, path })
    }

    /// Number of steps in the path.
    pub fn step_count(&self) -> usize {
        self.path.len() - 1
    }
}

/// A Metropolis exchange between two sublattices.
///
/// Names the two sublattice indices whose site contents may swap; the
/// mapper pairs every concrete site of one with every site of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetropolisTransition {
    /// Stable identifier of the transition in the model input.
    pub index: usize,
    /// Sublattice index of the first exchange partner.
    pub first_position: usize,
    /// Sublattice index of the second exchange partner.
    pub second_position: usize,
}

impl MetropolisTransition {
    /// Create an exchange transition.
    pub const fn new(index: usize, first_position: usize, second_position: usize) -> Self {
        Self {
            index,
            first_position,
            second_position,
        }
    }
}
