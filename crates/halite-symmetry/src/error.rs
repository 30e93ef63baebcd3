//! Error types for symmetry-operation construction.

use std::fmt;

/// Errors arising from symmetry-operation construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SymmetryError {
    /// An operation was built from a coefficient slice that is not 3×4.
    WrongCoefficientCount {
        /// Number of coefficients supplied.
        found: usize,
    },
    /// The trim tolerance is not usable (non-finite or negative).
    InvalidTrimTolerance {
        /// The offending tolerance value.
        value: f64,
    },
}

impl fmt::Display for SymmetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCoefficientCount { found } => {
                write!(f, "symmetry operation requires 12 coefficients, got {found}")
            }
            Self::InvalidTrimTolerance { value } => {
                write!(f, "trim tolerance must be finite and non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for SymmetryError {}
