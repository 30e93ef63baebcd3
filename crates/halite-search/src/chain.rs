//! Chain extension along a reference geometry.

use crate::constraint::RadialConstraint;
use crate::error::SearchError;
use crate::lookup::{LatticePoint, SiteLookup};
use crate::sampler::RadialPositionSampler;
use halite_core::Fractional3D;
use smallvec::SmallVec;

/// Finds all position chains that reproduce a reference geometry's step
/// lengths.
///
/// Starting from an anchor site, every chain is extended one step at a
/// time: candidates for step `i` must lie at exactly the cartesian length
/// of the reference's step `i` (within tolerance) from the chain's current
/// end and must pass the caller's per-step filter. Chains that cannot be
/// extended are dropped, so the result contains only full-length chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionChainSampler;

impl PositionChainSampler {
    /// All full-length chains from one start position.
    ///
    /// The filter receives the zero-based step index and the candidate
    /// site. The reference needs at least two positions.
    ///
    /// # Panics
    ///
    /// Panics when `start` does not encode; chain search anchors must be
    /// lattice sites of the lookup's encoder.
    pub fn point_search<L, P>(
        lookup: &L,
        start: &Fractional3D,
        reference: &[Fractional3D],
        step_filter: P,
    ) -> Result<Vec<Vec<LatticePoint<L::Content>>>, SearchError>
    where
        L: SiteLookup,
        P: Fn(usize, &LatticePoint<L::Content>) -> bool,
    {
        if reference.len() < 2 {
            return Err(SearchError::EmptyReferenceGeometry {
                found: reference.len(),
            });
        }
        let encoder = lookup.encoder();
        let transformer = encoder.transformer();
        let comparer = *encoder.positions().comparer();
        let step_lengths: SmallVec<[f64; 4]> = reference
            .windows(2)
            .map(|pair| transformer.fractional_length(&(pair[1] - pair[0])))
            .collect();
        let start_encoded = match encoder.try_encode(start) {
            Some(encoded) => encoded,
            None => panic!("chain start {start} is not on the encoded lattice"),
        };
        let start_point =
            LatticePoint::new(*start, lookup.content_at(start_encoded.p as usize));
        let mut chains = vec![vec![start_point]];
        for (step, &length) in step_lengths.iter().enumerate() {
            let constraint = RadialConstraint::exact(length, comparer)?;
            let mut extended = Vec::new();
            for chain in &chains {
                let Some(anchor) = chain.last() else {
                    continue;
                };
                let hits = RadialPositionSampler::search(
                    lookup,
                    &anchor.fractional,
                    &constraint,
                    |point| step_filter(step, point),
                );
                for hit in hits {
                    let mut next = chain.clone();
                    next.push(hit);
                    extended.push(next);
                }
            }
            chains = extended;
            if chains.is_empty() {
                break;
            }
        }
        Ok(chains)
    }

    /// All full-length chains from each of several start positions,
    /// concatenated in start order.
    pub fn multi_point_search<L, P>(
        lookup: &L,
        starts: &[Fractional3D],
        reference: &[Fractional3D],
        step_filter: P,
    ) -> Result<Vec<Vec<LatticePoint<L::Content>>>, SearchError>
    where
        L: SiteLookup,
        P: Fn(usize, &LatticePoint<L::Content>) -> bool,
    {
        let mut chains = Vec::new();
        for start in starts {
            chains.extend(Self::point_search(lookup, start, reference, &step_filter)?);
        }
        Ok(chains)
    }
}
