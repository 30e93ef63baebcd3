//! Space-group-driven kinetic transition mapping.

use crate::error::MappingError;
use crate::mapping::KineticMapping;
use crate::transition::KineticTransition;
use halite_encode::UnitCellVectorEncoder;
use halite_symmetry::SpaceGroupService;
use smallvec::SmallVec;

/// Maps kinetic transitions through a space-group table.
///
/// The space group enumerates every symmetry- and translation-equivalent
/// image of the reference path; each image is encoded into 4D addresses.
/// An image position the encoder cannot place means the symmetry data and
/// the position list describe different crystals, which fails the whole
/// mapping with [`MappingError::LatticeMismatch`].
pub struct KineticTransitionMapper<'a, S: SpaceGroupService> {
    space_group: &'a S,
    encoder: &'a UnitCellVectorEncoder,
}

impl<'a, S: SpaceGroupService> KineticTransitionMapper<'a, S> {
    /// Pair a space group with an encoder.
    pub fn new(space_group: &'a S, encoder: &'a UnitCellVectorEncoder) -> Self {
        Self {
            space_group,
            encoder,
        }
    }

    /// All mappings of one transition, in the space group's sequence order.
    pub fn map(
        &self,
        transition: &KineticTransition,
    ) -> Result<Vec<KineticMapping>, MappingError> {
        if transition.path.len() < 2 {
            return Err(MappingError::ShortTransitionPath {
                found: transition.path.len(),
            });
        }
        let sequences = self.space_group.equivalent_sequences(&transition.path);
        let mut mappings = Vec::with_capacity(sequences.len());
        for sequence in sequences {
            let mut encoded_path = SmallVec::with_capacity(sequence.len());
            for position in &sequence {
                let encoded = self
                    .encoder
                    .try_encode(position)
                    .ok_or(MappingError::LatticeMismatch {
                        position: *position,
                    })?;
                encoded_path.push(encoded);
            }
            mappings.push(KineticMapping {
                transition_index: transition.index,
                encoded_path,
                fractional_path: sequence.into_iter().collect(),
            });
        }
        Ok(mappings)
    }
}
