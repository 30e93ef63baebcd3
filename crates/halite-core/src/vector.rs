//! The three continuous coordinate representations of a lattice position.
//!
//! A crystal position can be expressed in the crystal's own basis
//! ([`Fractional3D`], unit = one lattice repeat), in orthogonal length-based
//! space ([`Cartesian3D`], unit = Ångström), or in radial form
//! ([`Spherical3D`]). The representations are plain value structs;
//! conversion between them lives in [`crate::systems`].

use crate::tolerance::ToleranceComparer;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A coordinate triple that can be taken apart and rebuilt.
///
/// Symmetry operations and coordinate transformers are generic over this
/// trait so the same affine map applies uniformly to any concrete vector
/// kind without an inheritance hierarchy.
pub trait Vector3D: Sized + Copy {
    /// The raw coordinate triple in declaration order.
    fn coordinates(&self) -> (f64, f64, f64);

    /// Rebuild the vector from a raw coordinate triple.
    fn from_coordinates(a: f64, b: f64, c: f64) -> Self;
}

// ── Fractional ────────────────────────────────────────────────────

/// A position in the crystal's (possibly non-orthogonal) basis.
///
/// Not intrinsically reduced to a single unit cell: `(1.5, 0.5, 0.5)` is the
/// position `(0.5, 0.5, 0.5)` in the cell at offset `(1, 0, 0)`. Use
/// [`trim_to_unit_cell`](Self::trim_to_unit_cell) /
/// [`cell_offset`](Self::cell_offset) to split the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fractional3D {
    /// Coordinate along the first basis direction.
    pub a: f64,
    /// Coordinate along the second basis direction.
    pub b: f64,
    /// Coordinate along the third basis direction.
    pub c: f64,
}

impl Fractional3D {
    /// Create a new fractional vector.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Integer offset of the unit cell containing this position.
    ///
    /// Each axis uses the comparer's tolerance-aware floor, so values within
    /// tolerance of an integer boundary fold consistently instead of
    /// jittering between adjacent cells.
    pub fn cell_offset(&self, comparer: &ToleranceComparer) -> (i32, i32, i32) {
        (
            comparer.floor_to_int(self.a),
            comparer.floor_to_int(self.b),
            comparer.floor_to_int(self.c),
        )
    }

    /// This position folded into the origin cell.
    ///
    /// The exact identity `trimmed + offset == self` holds for every finite
    /// vector because the trim subtracts the already-rounded offset rather
    /// than re-rounding each axis.
    pub fn trim_to_unit_cell(&self, comparer: &ToleranceComparer) -> Self {
        let (a, b, c) = self.cell_offset(comparer);
        Self::new(self.a - f64::from(a), self.b - f64::from(b), self.c - f64::from(c))
    }

    /// Lexicographic order over `(a, b, c)` with tolerance-aware ties.
    ///
    /// Total over finite vectors; used wherever fractional positions need a
    /// canonical order (sorted position lists, sequence dedup).
    pub fn compare_lexicographic(
        &self,
        other: &Self,
        comparer: &ToleranceComparer,
    ) -> std::cmp::Ordering {
        comparer
            .compare(self.a, other.a)
            .then_with(|| comparer.compare(self.b, other.b))
            .then_with(|| comparer.compare(self.c, other.c))
    }

    /// Whether all three coordinates match within tolerance.
    pub fn equals_with(&self, other: &Self, comparer: &ToleranceComparer) -> bool {
        comparer.equals(self.a, other.a)
            && comparer.equals(self.b, other.b)
            && comparer.equals(self.c, other.c)
    }

    /// Geometric midpoint between two fractional positions.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.a + other.a) * 0.5,
            (self.b + other.b) * 0.5,
            (self.c + other.c) * 0.5,
        )
    }
}

impl Vector3D for Fractional3D {
    fn coordinates(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    fn from_coordinates(a: f64, b: f64, c: f64) -> Self {
        Self::new(a, b, c)
    }
}

impl Add for Fractional3D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.a + rhs.a, self.b + rhs.b, self.c + rhs.c)
    }
}

impl Sub for Fractional3D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a - rhs.a, self.b - rhs.b, self.c - rhs.c)
    }
}

impl Neg for Fractional3D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.a, -self.b, -self.c)
    }
}

impl Mul<f64> for Fractional3D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.a * rhs, self.b * rhs, self.c * rhs)
    }
}

impl Div<f64> for Fractional3D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.a / rhs, self.b / rhs, self.c / rhs)
    }
}

impl fmt::Display for Fractional3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frac({}, {}, {})", self.a, self.b, self.c)
    }
}

// ── Cartesian ─────────────────────────────────────────────────────

/// A position in orthogonal, length-based space (Ångström).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3D {
    /// X component in Ångström.
    pub x: f64,
    /// Y component in Ångström.
    pub y: f64,
    /// Z component in Ångström.
    pub z: f64,
}

impl Cartesian3D {
    /// Create a new cartesian vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Scalar triple product `self · (b × c)` — the signed volume spanned
    /// by the three vectors.
    pub fn scalar_triple(&self, b: &Self, c: &Self) -> f64 {
        self.dot(&b.cross(c))
    }

    /// Unit-length copy of this vector. Returns the zero vector unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }
}

impl Vector3D for Cartesian3D {
    fn coordinates(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    fn from_coordinates(a: f64, b: f64, c: f64) -> Self {
        Self::new(a, b, c)
    }
}

impl Add for Cartesian3D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cartesian3D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Cartesian3D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Cartesian3D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Cartesian3D {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Cartesian3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cart({}, {}, {})", self.x, self.y, self.z)
    }
}

// ── Spherical ─────────────────────────────────────────────────────

/// A position in radial form (ISO convention).
///
/// `theta` is the polar angle measured from +z, `phi` the azimuthal angle
/// measured from +x in the xy-plane. The zero-length vector maps to all-zero
/// angles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical3D {
    /// Radius in Ångström.
    pub radius: f64,
    /// Polar angle in radians, `[0, π]`.
    pub theta: f64,
    /// Azimuthal angle in radians, `(-π, π]`.
    pub phi: f64,
}

impl Spherical3D {
    /// Create a new spherical vector.
    pub const fn new(radius: f64, theta: f64, phi: f64) -> Self {
        Self { radius, theta, phi }
    }
}

impl Vector3D for Spherical3D {
    fn coordinates(&self) -> (f64, f64, f64) {
        (self.radius, self.theta, self.phi)
    }

    fn from_coordinates(a: f64, b: f64, c: f64) -> Self {
        Self::new(a, b, c)
    }
}

impl fmt::Display for Spherical3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sph(r={}, θ={}, φ={})", self.radius, self.theta, self.phi)
    }
}

// ── Generic dispatch ──────────────────────────────────────────────

/// A vector of any of the three representations.
///
/// Call sites that accept "any" coordinate kind take this enum and let the
/// transformer normalize to fractional space first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenericVector3D {
    /// A fractional coordinate.
    Fractional(Fractional3D),
    /// A cartesian coordinate.
    Cartesian(Cartesian3D),
    /// A spherical coordinate.
    Spherical(Spherical3D),
}

impl From<Fractional3D> for GenericVector3D {
    fn from(v: Fractional3D) -> Self {
        Self::Fractional(v)
    }
}

impl From<Cartesian3D> for GenericVector3D {
    fn from(v: Cartesian3D) -> Self {
        Self::Cartesian(v)
    }
}

impl From<Spherical3D> for GenericVector3D {
    fn from(v: Spherical3D) -> Self {
        Self::Spherical(v)
    }
}
