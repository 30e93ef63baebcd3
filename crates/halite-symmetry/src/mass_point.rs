//! Cartesian mass points and their rigid-body moments.

use halite_core::Cartesian3D;

/// A point mass at a cartesian position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianMassPoint {
    /// The mass (arbitrary units; only ratios matter downstream).
    pub mass: f64,
    /// The position in Ångström.
    pub vector: Cartesian3D,
}

impl CartesianMassPoint {
    /// Create a new mass point.
    pub const fn new(mass: f64, vector: Cartesian3D) -> Self {
        Self { mass, vector }
    }
}

/// The symmetric inertia tensor of a mass-point set, in its six independent
/// components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InertiaTensor {
    /// Diagonal xx component.
    pub xx: f64,
    /// Diagonal yy component.
    pub yy: f64,
    /// Diagonal zz component.
    pub zz: f64,
    /// Off-diagonal xy component.
    pub xy: f64,
    /// Off-diagonal xz component.
    pub xz: f64,
    /// Off-diagonal yz component.
    pub yz: f64,
}

impl InertiaTensor {
    /// Trace, the first rotation invariant.
    pub fn trace(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// Sum of principal 2×2 minors, the second rotation invariant.
    pub fn minor_sum(&self) -> f64 {
        self.xx * self.yy - self.xy * self.xy
            + self.xx * self.zz
            - self.xz * self.xz
            + self.yy * self.zz
            - self.yz * self.yz
    }

    /// Determinant, the third rotation invariant.
    pub fn determinant(&self) -> f64 {
        self.xx * (self.yy * self.zz - self.yz * self.yz)
            - self.xy * (self.xy * self.zz - self.yz * self.xz)
            + self.xz * (self.xy * self.yz - self.yy * self.xz)
    }
}

/// Mass-weighted center of a point set.
///
/// A set with zero total mass has no defined center; the origin is returned
/// so downstream shifts become no-ops.
pub fn mass_center(points: &[CartesianMassPoint]) -> Cartesian3D {
    let total: f64 = points.iter().map(|p| p.mass).sum();
    if total == 0.0 {
        return Cartesian3D::zero();
    }
    let weighted = points
        .iter()
        .fold(Cartesian3D::zero(), |acc, p| acc + p.vector * p.mass);
    weighted / total
}

/// Copy of the point set translated so its mass center sits at the origin.
pub fn shift_to_mass_center(points: &[CartesianMassPoint]) -> Vec<CartesianMassPoint> {
    let center = mass_center(points);
    points
        .iter()
        .map(|p| CartesianMassPoint::new(p.mass, p.vector - center))
        .collect()
}

/// Inertia tensor of the point set about the coordinate origin.
pub fn inertia_tensor(points: &[CartesianMassPoint]) -> InertiaTensor {
    let mut tensor = InertiaTensor::default();
    for p in points {
        let Cartesian3D { x, y, z } = p.vector;
        tensor.xx += p.mass * (y * y + z * z);
        tensor.yy += p.mass * (x * x + z * z);
        tensor.zz += p.mass * (x * x + y * y);
        tensor.xy -= p.mass * x * y;
        tensor.xz -= p.mass * x * z;
        tensor.yz -= p.mass * y * z;
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<CartesianMassPoint> {
        vec![
            CartesianMassPoint::new(1.0, Cartesian3D::new(1.0, 0.0, 0.0)),
            CartesianMassPoint::new(3.0, Cartesian3D::new(-1.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn mass_center_weights_by_mass() {
        let center = mass_center(&pair());
        assert!((center.x - (-0.5)).abs() < 1.0e-12);
        assert_eq!(center.y, 0.0);
        assert_eq!(center.z, 0.0);
    }

    #[test]
    fn zero_mass_center_is_origin() {
        let points = [CartesianMassPoint::new(0.0, Cartesian3D::new(5.0, 5.0, 5.0))];
        assert_eq!(mass_center(&points), Cartesian3D::zero());
    }

    #[test]
    fn shifted_set_has_origin_center() {
        let shifted = shift_to_mass_center(&pair());
        let center = mass_center(&shifted);
        assert!(center.length() < 1.0e-12);
    }

    #[test]
    fn inertia_of_axis_pair() {
        // Two unit masses at ±1 on x: no moment about x, 2 about y and z.
        let points = [
            CartesianMassPoint::new(1.0, Cartesian3D::new(1.0, 0.0, 0.0)),
            CartesianMassPoint::new(1.0, Cartesian3D::new(-1.0, 0.0, 0.0)),
        ];
        let tensor = inertia_tensor(&points);
        assert_eq!(tensor.xx, 0.0);
        assert_eq!(tensor.yy, 2.0);
        assert_eq!(tensor.zz, 2.0);
        assert_eq!((tensor.xy, tensor.xz, tensor.yz), (0.0, 0.0, 0.0));
    }

    #[test]
    fn invariants_of_diagonal_tensor() {
        let tensor = InertiaTensor {
            xx: 1.0,
            yy: 2.0,
            zz: 3.0,
            ..InertiaTensor::default()
        };
        assert_eq!(tensor.trace(), 6.0);
        assert_eq!(tensor.minor_sum(), 11.0);
        assert_eq!(tensor.determinant(), 6.0);
    }
}
