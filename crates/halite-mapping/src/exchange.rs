//! Metropolis exchange mapping.

use crate::error::MappingError;
use crate::transition::MetropolisTransition;
use halite_encode::LatticeVector4D;

/// One concrete Metropolis exchange pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetropolisMapping {
    /// Index of the transition this mapping realizes.
    pub transition_index: usize,
    /// Address of the first exchange partner.
    pub first: LatticeVector4D,
    /// Address of the second exchange partner.
    pub second: LatticeVector4D,
}

/// Maps Metropolis transitions onto concrete site pairs.
///
/// An exchange has no path geometry; its mappings are simply the cartesian
/// product of the two named position sets. Input problems fail fast before
/// any pair is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetropolisTransitionMapper;

impl MetropolisTransitionMapper {
    /// All `|first| × |second|` exchange pairs of one transition.
    ///
    /// `encoded_positions` holds the concrete addresses per sublattice
    /// index, as produced by an encoder pass over the occupied sites.
    pub fn map(
        transition: &MetropolisTransition,
        encoded_positions: &[Vec<LatticeVector4D>],
    ) -> Result<Vec<MetropolisMapping>, MappingError> {
        let first_set = Self::position_set(encoded_positions, transition.first_position)?;
        let second_set = Self::position_set(encoded_positions, transition.second_position)?;
        let mut mappings = Vec::with_capacity(first_set.len() * second_set.len());
        for &first in first_set {
            for &second in second_set {
                mappings.push(MetropolisMapping {
                    transition_index: transition.index,
                    first,
                    second,
                });
            }
        }
        Ok(mappings)
    }

    fn position_set(
        encoded_positions: &[Vec<LatticeVector4D>],
        index: usize,
    ) -> Result<&Vec<LatticeVector4D>, MappingError> {
        let set = encoded_positions
            .get(index)
            .ok_or(MappingError::PositionIndexOutOfBounds {
                index,
                available: encoded_positions.len(),
            })?;
        if set.is_empty() {
            return Err(MappingError::EmptyPositionSet {
                position_index: index,
            });
        }
        Ok(set)
    }
}
