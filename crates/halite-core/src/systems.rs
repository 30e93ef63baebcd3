//! Coordinate systems and the transformer that converts between them.
//!
//! A crystal is described by three base vectors in cartesian space. The
//! [`FractionalCoordinateSystem`] maps fractional coordinates through that
//! basis; the [`SphericalCoordinateSystem`] maps cartesian vectors to radial
//! form. The [`VectorTransformer`] bundles both and offers every pairwise
//! conversion.

use crate::error::CoordinateError;
use crate::vector::{Cartesian3D, Fractional3D, GenericVector3D, Spherical3D};

/// A crystal basis with a precomputed inverse.
///
/// Constructed once per crystal; the inverse of the basis matrix is solved
/// at construction time so both conversion directions are a single
/// matrix-vector product.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionalCoordinateSystem {
    base_a: Cartesian3D,
    base_b: Cartesian3D,
    base_c: Cartesian3D,
    // Rows of the inverted basis matrix.
    inverse_a: Cartesian3D,
    inverse_b: Cartesian3D,
    inverse_c: Cartesian3D,
    volume: f64,
}

impl FractionalCoordinateSystem {
    /// Build a coordinate system from three cartesian base vectors.
    ///
    /// Fails with [`CoordinateError::SingularBasis`] when the vectors do not
    /// span 3D space.
    pub fn new(
        base_a: Cartesian3D,
        base_b: Cartesian3D,
        base_c: Cartesian3D,
    ) -> Result<Self, CoordinateError> {
        let det = base_a.scalar_triple(&base_b, &base_c);
        if !det.is_finite() || det.abs() < 1.0e-12 {
            return Err(CoordinateError::SingularBasis { determinant: det });
        }
        // Inverse via the adjugate: rows are the reciprocal-lattice vectors
        // (b × c) / det etc., transposed into matrix rows.
        let rec_a = base_b.cross(&base_c) / det;
        let rec_b = base_c.cross(&base_a) / det;
        let rec_c = base_a.cross(&base_b) / det;
        Ok(Self {
            base_a,
            base_b,
            base_c,
            inverse_a: Cartesian3D::new(rec_a.x, rec_b.x, rec_c.x),
            inverse_b: Cartesian3D::new(rec_a.y, rec_b.y, rec_c.y),
            inverse_c: Cartesian3D::new(rec_a.z, rec_b.z, rec_c.z),
            volume: det.abs(),
        })
    }

    /// The three base vectors in declaration order.
    pub fn base_vectors(&self) -> (Cartesian3D, Cartesian3D, Cartesian3D) {
        (self.base_a, self.base_b, self.base_c)
    }

    /// Unit-cell volume in Å³.
    pub fn cell_volume(&self) -> f64 {
        self.volume
    }

    /// Fractional to cartesian.
    pub fn to_cartesian(&self, v: &Fractional3D) -> Cartesian3D {
        self.base_a * v.a + self.base_b * v.b + self.base_c * v.c
    }

    /// Cartesian to fractional.
    pub fn to_fractional(&self, v: &Cartesian3D) -> Fractional3D {
        let col = Cartesian3D::new(v.x, v.y, v.z);
        Fractional3D::new(
            self.inverse_a.x * col.x + self.inverse_b.x * col.y + self.inverse_c.x * col.z,
            self.inverse_a.y * col.x + self.inverse_b.y * col.y + self.inverse_c.y * col.z,
            self.inverse_a.z * col.x + self.inverse_b.z * col.y + self.inverse_c.z * col.z,
        )
    }
}

/// Cartesian/spherical conversion in the ISO convention.
///
/// Stateless; exists as a type so the transformer's two halves read the
/// same way.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphericalCoordinateSystem;

impl SphericalCoordinateSystem {
    /// Cartesian to spherical. The zero vector maps to all-zero components.
    pub fn to_spherical(&self, v: &Cartesian3D) -> Spherical3D {
        let radius = v.length();
        if radius == 0.0 {
            return Spherical3D::new(0.0, 0.0, 0.0);
        }
        Spherical3D::new(radius, (v.z / radius).acos(), v.y.atan2(v.x))
    }

    /// Spherical to cartesian.
    pub fn to_cartesian(&self, v: &Spherical3D) -> Cartesian3D {
        let (sin_t, cos_t) = v.theta.sin_cos();
        let (sin_p, cos_p) = v.phi.sin_cos();
        Cartesian3D::new(
            v.radius * sin_t * cos_p,
            v.radius * sin_t * sin_p,
            v.radius * cos_t,
        )
    }
}

/// Converts between all three coordinate representations of one crystal.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTransformer {
    fractional: FractionalCoordinateSystem,
    spherical: SphericalCoordinateSystem,
}

impl VectorTransformer {
    /// Build a transformer for the given crystal basis.
    pub fn new(fractional: FractionalCoordinateSystem) -> Self {
        Self {
            fractional,
            spherical: SphericalCoordinateSystem,
        }
    }

    /// The underlying fractional coordinate system.
    pub fn fractional_system(&self) -> &FractionalCoordinateSystem {
        &self.fractional
    }

    /// Fractional to cartesian.
    pub fn fractional_to_cartesian(&self, v: &Fractional3D) -> Cartesian3D {
        self.fractional.to_cartesian(v)
    }

    /// Cartesian to fractional.
    pub fn cartesian_to_fractional(&self, v: &Cartesian3D) -> Fractional3D {
        self.fractional.to_fractional(v)
    }

    /// Cartesian to spherical.
    pub fn cartesian_to_spherical(&self, v: &Cartesian3D) -> Spherical3D {
        self.spherical.to_spherical(v)
    }

    /// Spherical to cartesian.
    pub fn spherical_to_cartesian(&self, v: &Spherical3D) -> Cartesian3D {
        self.spherical.to_cartesian(v)
    }

    /// Fractional to spherical.
    pub fn fractional_to_spherical(&self, v: &Fractional3D) -> Spherical3D {
        self.cartesian_to_spherical(&self.fractional_to_cartesian(v))
    }

    /// Spherical to fractional.
    pub fn spherical_to_fractional(&self, v: &Spherical3D) -> Fractional3D {
        self.cartesian_to_fractional(&self.spherical_to_cartesian(v))
    }

    /// Any representation to fractional.
    pub fn to_fractional(&self, v: &GenericVector3D) -> Fractional3D {
        match v {
            GenericVector3D::Fractional(v) => *v,
            GenericVector3D::Cartesian(v) => self.cartesian_to_fractional(v),
            GenericVector3D::Spherical(v) => self.spherical_to_fractional(v),
        }
    }

    /// Cartesian length of a fractional vector, in Ångström.
    pub fn fractional_length(&self, v: &Fractional3D) -> f64 {
        self.fractional_to_cartesian(v).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cubic(a: f64) -> FractionalCoordinateSystem {
        FractionalCoordinateSystem::new(
            Cartesian3D::new(a, 0.0, 0.0),
            Cartesian3D::new(0.0, a, 0.0),
            Cartesian3D::new(0.0, 0.0, a),
        )
        .unwrap()
    }

    // Hexagonal cell, a = b = 3 Å at 120°, c = 5 Å.
    fn hexagonal() -> FractionalCoordinateSystem {
        FractionalCoordinateSystem::new(
            Cartesian3D::new(3.0, 0.0, 0.0),
            Cartesian3D::new(-1.5, 1.5 * 3.0_f64.sqrt(), 0.0),
            Cartesian3D::new(0.0, 0.0, 5.0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_singular_basis() {
        let err = FractionalCoordinateSystem::new(
            Cartesian3D::new(1.0, 0.0, 0.0),
            Cartesian3D::new(2.0, 0.0, 0.0),
            Cartesian3D::new(0.0, 0.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, CoordinateError::SingularBasis { .. }));
    }

    #[test]
    fn cubic_volume_and_lengths() {
        let system = cubic(4.0);
        assert!((system.cell_volume() - 64.0).abs() < 1.0e-12);
        let cart = system.to_cartesian(&Fractional3D::new(0.5, 0.5, 0.5));
        assert_eq!(cart, Cartesian3D::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn non_orthogonal_round_trip() {
        let system = hexagonal();
        let frac = Fractional3D::new(0.3, 0.6, 0.1);
        let back = system.to_fractional(&system.to_cartesian(&frac));
        assert!((back.a - frac.a).abs() < 1.0e-12);
        assert!((back.b - frac.b).abs() < 1.0e-12);
        assert!((back.c - frac.c).abs() < 1.0e-12);
    }

    #[test]
    fn spherical_axes() {
        let sph = SphericalCoordinateSystem;
        let up = sph.to_spherical(&Cartesian3D::new(0.0, 0.0, 2.0));
        assert_eq!(up, Spherical3D::new(2.0, 0.0, 0.0));
        let x = sph.to_spherical(&Cartesian3D::new(3.0, 0.0, 0.0));
        assert!((x.theta - FRAC_PI_2).abs() < 1.0e-12);
        assert_eq!(x.phi, 0.0);
        let neg_x = sph.to_spherical(&Cartesian3D::new(-1.0, 0.0, 0.0));
        assert!((neg_x.phi - PI).abs() < 1.0e-12);
    }

    #[test]
    fn spherical_zero_vector() {
        let sph = SphericalCoordinateSystem;
        assert_eq!(
            sph.to_spherical(&Cartesian3D::zero()),
            Spherical3D::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn transformer_generic_dispatch() {
        let transformer = VectorTransformer::new(cubic(2.0));
        let frac = Fractional3D::new(0.5, 0.0, 0.0);
        let cart = Cartesian3D::new(1.0, 0.0, 0.0);
        assert_eq!(transformer.to_fractional(&frac.into()), frac);
        let from_cart = transformer.to_fractional(&cart.into());
        assert!((from_cart.a - 0.5).abs() < 1.0e-12);
        let sph = transformer.cartesian_to_spherical(&cart);
        let from_sph = transformer.to_fractional(&sph.into());
        assert!((from_sph.a - 0.5).abs() < 1.0e-12);
    }

    proptest! {
        #[test]
        fn fractional_round_trip(
            a in -2.0..2.0_f64,
            b in -2.0..2.0_f64,
            c in -2.0..2.0_f64,
        ) {
            let system = hexagonal();
            let frac = Fractional3D::new(a, b, c);
            let back = system.to_fractional(&system.to_cartesian(&frac));
            prop_assert!((back.a - a).abs() < 1.0e-9);
            prop_assert!((back.b - b).abs() < 1.0e-9);
            prop_assert!((back.c - c).abs() < 1.0e-9);
        }

        #[test]
        fn spherical_round_trip(
            x in -5.0..5.0_f64,
            y in -5.0..5.0_f64,
            z in -5.0..5.0_f64,
        ) {
            let sph = SphericalCoordinateSystem;
            let cart = Cartesian3D::new(x, y, z);
            let back = sph.to_cartesian(&sph.to_spherical(&cart));
            prop_assert!((back - cart).length() < 1.0e-9);
        }
    }
}
