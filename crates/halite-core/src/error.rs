//! Error types for coordinate-system construction.

use std::fmt;

/// Errors arising from coordinate-system construction.
///
/// Conversions between finite vectors never fail; only malformed
/// construction input is rejected, and always at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// The three base vectors do not span 3D space (triple product ~ 0).
    SingularBasis {
        /// The near-zero determinant of the basis matrix.
        determinant: f64,
    },
    /// A tolerance value is not usable (non-finite or negative).
    InvalidTolerance {
        /// The offending tolerance value.
        value: f64,
    },
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingularBasis { determinant } => {
                write!(f, "base vectors are linearly dependent (det = {determinant:e})")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be finite and non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}
