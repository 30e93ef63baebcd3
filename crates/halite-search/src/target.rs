//! Projection of search hits into full target records.

use crate::lookup::LatticePoint;
use halite_core::{Cartesian3D, Fractional3D, Spherical3D};
use halite_encode::{LatticeVector4D, UnitCellVectorEncoder};

/// One reachable lattice site, described in every representation a model
/// builder needs.
///
/// Carries the absolute site coordinates, the step from the source site in
/// fractional, cartesian, spherical and 4D form, and the step length. The
/// length is also available as an integer femtometre key for tolerance-free
/// bucketing of equal-length steps.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeTarget {
    /// Absolute fractional position of the target site.
    pub fractional: Fractional3D,
    /// Absolute cartesian position of the target site.
    pub cartesian: Cartesian3D,
    /// Absolute spherical position of the target site.
    pub spherical: Spherical3D,
    /// Absolute 4D address of the target site.
    pub encoded: LatticeVector4D,
    /// Step from the source site, fractional.
    pub relative_fractional: Fractional3D,
    /// Step from the source site, cartesian.
    pub relative_cartesian: Cartesian3D,
    /// Step from the source site, spherical.
    pub relative_spherical: Spherical3D,
    /// Step from the source site, 4D (sublattice delta may be negative).
    pub relative_encoded: LatticeVector4D,
    /// Step length in Å.
    pub distance: f64,
}

impl LatticeTarget {
    /// Project a source/target position pair through the encoder.
    ///
    /// # Panics
    ///
    /// Panics when either position does not encode. A search only reaches
    /// positions the encoder produced, so a miss here means the lookup and
    /// encoder disagree about the lattice.
    pub fn from_points(
        source: &Fractional3D,
        target: &Fractional3D,
        encoder: &UnitCellVectorEncoder,
    ) -> Self {
        let source_encoded = match encoder.try_encode(source) {
            Some(encoded) => encoded,
            None => panic!("source position {source} is not on the encoded lattice"),
        };
        let encoded = match encoder.try_encode(target) {
            Some(encoded) => encoded,
            None => panic!("target position {target} is not on the encoded lattice"),
        };
        let transformer = encoder.transformer();
        let cartesian = transformer.fractional_to_cartesian(target);
        let relative_fractional = *target - *source;
        let relative_cartesian = transformer.fractional_to_cartesian(&relative_fractional);
        Self {
            fractional: *target,
            cartesian,
            spherical: transformer.cartesian_to_spherical(&cartesian),
            encoded,
            relative_fractional,
            relative_cartesian,
            relative_spherical: transformer.cartesian_to_spherical(&relative_cartesian),
            relative_encoded: encoded - source_encoded,
            distance: relative_cartesian.length(),
        }
    }

    /// Project a batch of search hits from one source position.
    pub fn project<T>(
        source: &Fractional3D,
        points: &[LatticePoint<T>],
        encoder: &UnitCellVectorEncoder,
    ) -> Vec<Self> {
        points
            .iter()
            .map(|point| Self::from_points(source, &point.fractional, encoder))
            .collect()
    }

    /// Step length rounded to whole femtometres.
    ///
    /// Two steps of symmetry-equal length always produce the same key,
    /// which makes the key usable for exact grouping where a float distance
    /// would need tolerance logic.
    pub fn distance_fm(&self) -> i64 {
        (self.distance * 1.0e5).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halite_core::{FractionalCoordinateSystem, ToleranceComparer, VectorTransformer};
    use halite_encode::PositionList;

    fn encoder() -> UnitCellVectorEncoder {
        let comparer = ToleranceComparer::new(1.0e-6).unwrap();
        let positions = PositionList::new(
            &[
                Fractional3D::new(0.0, 0.0, 0.0),
                Fractional3D::new(0.5, 0.5, 0.5),
            ],
            comparer,
        )
        .unwrap();
        let system = FractionalCoordinateSystem::new(
            Cartesian3D::new(4.0, 0.0, 0.0),
            Cartesian3D::new(0.0, 4.0, 0.0),
            Cartesian3D::new(0.0, 0.0, 4.0),
        )
        .unwrap();
        UnitCellVectorEncoder::new(positions, VectorTransformer::new(system))
    }

    #[test]
    fn projection_fills_every_representation() {
        let enc = encoder();
        let source = Fractional3D::new(0.0, 0.0, 0.0);
        let target = Fractional3D::new(0.5, 0.5, 0.5);
        let projected = LatticeTarget::from_points(&source, &target, &enc);
        assert_eq!(projected.encoded, LatticeVector4D::new(0, 0, 0, 1));
        assert_eq!(projected.relative_encoded, LatticeVector4D::new(0, 0, 0, 1));
        assert_eq!(projected.cartesian, Cartesian3D::new(2.0, 2.0, 2.0));
        let expected = (3.0_f64).sqrt() * 2.0;
        assert!((projected.distance - expected).abs() < 1.0e-9);
        assert!((projected.relative_spherical.radius - expected).abs() < 1.0e-9);
        assert!((projected.spherical.radius - expected).abs() < 1.0e-9);
    }

    #[test]
    fn distance_fm_buckets_equal_lengths() {
        let enc = encoder();
        let source = Fractional3D::new(0.0, 0.0, 0.0);
        let up = LatticeTarget::from_points(&source, &Fractional3D::new(0.0, 0.0, 1.0), &enc);
        let left =
            LatticeTarget::from_points(&source, &Fractional3D::new(-1.0, 0.0, 0.0), &enc);
        assert_eq!(up.distance_fm(), left.distance_fm());
        assert_eq!(up.distance_fm(), 400_000);
    }

    #[test]
    #[should_panic(expected = "not on the encoded lattice")]
    fn off_lattice_target_is_a_configuration_fault() {
        let enc = encoder();
        LatticeTarget::from_points(
            &Fractional3D::new(0.0, 0.0, 0.0),
            &Fractional3D::new(0.25, 0.0, 0.0),
            &enc,
        );
    }
}
