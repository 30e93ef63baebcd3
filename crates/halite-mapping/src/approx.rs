//! Search-based kinetic transition mapping.
//!
//! When no space-group table is available, candidate mappings are found by
//! chain search: walk the lattice reproducing the reference path's step
//! lengths and site contents, then keep the chains whose moment invariants
//! match the reference geometry. Moment equality is necessary but not
//! sufficient, so rare moment-equal impostor geometries pass the filter;
//! exact model building goes through the space-group mapper instead.

use crate::error::MappingError;
use crate::mapping::{KineticMapping, PathKey};
use crate::transition::KineticTransition;
use halite_core::Fractional3D;
use halite_encode::{LatticeVector4D, PositionList};
use halite_search::{LatticePoint, PositionChainSampler, SiteLookup};
use halite_symmetry::{CartesianMassPoint, SymmetryIndicator};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// Maps kinetic transitions by radial chain search and moment filtering.
pub struct ApproxKineticTransitionMapper<'a, L: SiteLookup> {
    lookup: &'a L,
}

impl<'a, L> ApproxKineticTransitionMapper<'a, L>
where
    L: SiteLookup,
    L::Content: PartialEq,
{
    /// Build a mapper over a site lookup.
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// All mappings of one transition reachable from the given start
    /// points.
    ///
    /// Candidate chains must reproduce the reference step lengths and the
    /// reference site contents step by step. Duplicate chains (including
    /// reverse traversals of an already-found chain) are dropped in first-
    /// found order, then the moment filter removes chains whose geometry
    /// differs from the reference. `mass_of` assigns the comparison weight
    /// of a site content.
    pub fn quick_map(
        &self,
        transition: &KineticTransition,
        start_points: &[Fractional3D],
        mass_of: impl Fn(&L::Content) -> f64,
    ) -> Result<Vec<KineticMapping>, MappingError> {
        if transition.path.len() < 2 {
            return Err(MappingError::ShortTransitionPath {
                found: transition.path.len(),
            });
        }
        let encoder = self.lookup.encoder();
        let comparer = *encoder.positions().comparer();

        let reference_contents = self.contents_of(&transition.path)?;
        let reference_indicator =
            self.indicator_of(&transition.path, &reference_contents, &mass_of);

        // Starts that sit on the wrong sublattice content cannot anchor the
        // reference path; validating them here also keeps off-lattice input
        // an error instead of a panic inside the sampler.
        let mut anchors = Vec::with_capacity(start_points.len());
        for start in start_points {
            let encoded = encoder
                .try_encode(start)
                .ok_or(MappingError::LatticeMismatch { position: *start })?;
            if self.lookup.content_at(encoded.p as usize) == reference_contents[0] {
                anchors.push(*start);
            }
        }

        // The sampler only rejects references that are too short or carry a
        // non-finite step length; both were ruled out above (length check and
        // per-position encoding).
        let chains = PositionChainSampler::multi_point_search(
            self.lookup,
            &anchors,
            &transition.path,
            |step, point: &LatticePoint<L::Content>| {
                point.content == reference_contents[step + 1]
            },
        )
        .expect("transition path was validated before the chain search");

        let mut seen: IndexSet<PathKey> = IndexSet::with_capacity(chains.len());
        let mut mappings = Vec::new();
        for chain in chains {
            let fractional: SmallVec<[Fractional3D; 4]> =
                chain.iter().map(|point| point.fractional).collect();
            if !seen.insert(PathKey::of(&fractional)) {
                continue;
            }
            let points: Vec<CartesianMassPoint> = chain
                .iter()
                .map(|point| {
                    CartesianMassPoint::new(
                        mass_of(&point.content),
                        encoder
                            .transformer()
                            .fractional_to_cartesian(&point.fractional),
                    )
                })
                .collect();
            if !SymmetryIndicator::of(&points).equivalent(&reference_indicator, &comparer) {
                continue;
            }
            let mut encoded_path: SmallVec<[LatticeVector4D; 4]> =
                SmallVec::with_capacity(fractional.len());
            for position in &fractional {
                let encoded = encoder
                    .try_encode(position)
                    .ok_or(MappingError::LatticeMismatch {
                        position: *position,
                    })?;
                encoded_path.push(encoded);
            }
            mappings.push(KineticMapping {
                transition_index: transition.index,
                encoded_path,
                fractional_path: fractional,
            });
        }
        Ok(mappings)
    }

    /// Keep only mappings whose step midpoints land on allowed transition
    /// states.
    ///
    /// `position_map` supplies one allowed [`PositionList`] per step; a
    /// mapping survives when every step's midpoint, folded into the origin
    /// cell, is contained in that step's list.
    pub fn filter_by_intermediate_positions(
        &self,
        mappings: Vec<KineticMapping>,
        position_map: &[PositionList],
    ) -> Result<Vec<KineticMapping>, MappingError> {
        let encoder = self.lookup.encoder();
        let comparer = *encoder.positions().comparer();
        let mut kept = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            if mapping.step_count() != position_map.len() {
                return Err(MappingError::IntermediateMapLengthMismatch {
                    expected: mapping.step_count(),
                    found: position_map.len(),
                });
            }
            let mut allowed = true;
            for (step, pair) in mapping.encoded_path.windows(2).enumerate() {
                let from = self.decode(&mapping, &pair[0])?;
                let to = self.decode(&mapping, &pair[1])?;
                let midpoint = from.midpoint(&to).trim_to_unit_cell(&comparer);
                if position_map[step].index_of(&midpoint).is_none() {
                    allowed = false;
                    break;
                }
            }
            if allowed {
                kept.push(mapping);
            }
        }
        Ok(kept)
    }

    fn decode(
        &self,
        mapping: &KineticMapping,
        address: &LatticeVector4D,
    ) -> Result<Fractional3D, MappingError> {
        self.lookup.encoder().try_decode(address).ok_or_else(|| {
            MappingError::LatticeMismatch {
                position: mapping.fractional_path[0],
            }
        })
    }

    fn contents_of(&self, path: &[Fractional3D]) -> Result<Vec<L::Content>, MappingError> {
        let encoder = self.lookup.encoder();
        path.iter()
            .map(|position| {
                encoder
                    .try_encode(position)
                    .map(|encoded| self.lookup.content_at(encoded.p as usize))
                    .ok_or(MappingError::LatticeMismatch {
                        position: *position,
                    })
            })
            .collect()
    }

    fn indicator_of(
        &self,
        path: &[Fractional3D],
        contents: &[L::Content],
        mass_of: &impl Fn(&L::Content) -> f64,
    ) -> SymmetryIndicator {
        let transformer = self.lookup.encoder().transformer();
        let points: Vec<CartesianMassPoint> = path
            .iter()
            .zip(contents)
            .map(|(position, content)| {
                CartesianMassPoint::new(
                    mass_of(content),
                    transformer.fractional_to_cartesian(position),
                )
            })
            .collect();
        SymmetryIndicator::of(&points)
    }
}
