//! Error types for search input validation.

use std::fmt;

/// Errors raised when search input is malformed.
///
/// These cover input-level validation only. A lookup whose encoder cannot
/// encode positions reached during a search is a configuration fault and
/// panics instead, naming the offending vector.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A radial constraint has its lower bound above its upper bound.
    InvertedConstraint {
        /// The lower bound supplied.
        min: f64,
        /// The upper bound supplied.
        max: f64,
    },
    /// A radial constraint bound is not a finite number.
    NonFiniteConstraint {
        /// The offending bound.
        value: f64,
    },
    /// A chain search was given a reference geometry of fewer than two
    /// positions.
    EmptyReferenceGeometry {
        /// Number of reference positions supplied.
        found: usize,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedConstraint { min, max } => {
                write!(f, "radial constraint is inverted: min {min} > max {max}")
            }
            Self::NonFiniteConstraint { value } => {
                write!(f, "radial constraint bounds must be finite, got {value}")
            }
            Self::EmptyReferenceGeometry { found } => {
                write!(
                    f,
                    "chain search requires at least 2 reference positions, got {found}"
                )
            }
        }
    }
}

impl std::error::Error for SearchError {}
