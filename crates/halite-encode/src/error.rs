//! Error types for encoder construction.

use std::fmt;

/// Errors arising from position-list and encoder construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A position list was built from zero positions.
    EmptyPositionList,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPositionList => {
                write!(f, "a position list requires at least one position")
            }
        }
    }
}

impl std::error::Error for EncodeError {}
