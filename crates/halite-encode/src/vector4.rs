//! The discrete 4D lattice address.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A discrete lattice address: whole-cell offset plus sublattice index.
///
/// `(a, b, c)` counts unit cells along the three basis directions; `p`
/// indexes into the canonical position list of the unit cell. Differences
/// of addresses are addresses too, so `p` may be negative in relative
/// vectors even though absolute addresses keep it in `[0, position_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LatticeVector4D {
    /// Cell offset along the first basis direction.
    pub a: i32,
    /// Cell offset along the second basis direction.
    pub b: i32,
    /// Cell offset along the third basis direction.
    pub c: i32,
    /// Sublattice index (or index delta, for relative vectors).
    pub p: i32,
}

impl LatticeVector4D {
    /// Create a new 4D lattice vector.
    pub const fn new(a: i32, b: i32, c: i32, p: i32) -> Self {
        Self { a, b, c, p }
    }

    /// The whole-cell offset part.
    pub const fn cell_offset(&self) -> (i32, i32, i32) {
        (self.a, self.b, self.c)
    }
}

impl Add for LatticeVector4D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.a + rhs.a, self.b + rhs.b, self.c + rhs.c, self.p + rhs.p)
    }
}

impl Sub for LatticeVector4D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a - rhs.a, self.b - rhs.b, self.c - rhs.c, self.p - rhs.p)
    }
}

impl Neg for LatticeVector4D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.a, -self.b, -self.c, -self.p)
    }
}

impl fmt::Display for LatticeVector4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}; p={}]", self.a, self.b, self.c, self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_elementwise() {
        let lhs = LatticeVector4D::new(1, -2, 3, 1);
        let rhs = LatticeVector4D::new(0, 1, -1, 2);
        assert_eq!(lhs + rhs, LatticeVector4D::new(1, -1, 2, 3));
        assert_eq!(lhs - rhs, LatticeVector4D::new(1, -3, 4, -1));
        assert_eq!(-lhs, LatticeVector4D::new(-1, 2, -3, -1));
    }

    #[test]
    fn display_names_sublattice() {
        assert_eq!(
            LatticeVector4D::new(2, 0, -1, 3).to_string(),
            "[2, 0, -1; p=3]"
        );
    }
}
