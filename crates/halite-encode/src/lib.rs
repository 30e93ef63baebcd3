//! Canonical position lists and the 3D/4D lattice-vector codec.
//!
//! A crystal model addresses sites by a discrete 4D vector: three whole-cell
//! offsets plus a sublattice index into the canonical [`PositionList`] of
//! the unit cell. The [`UnitCellVectorEncoder`] converts between that
//! address form and the continuous coordinate representations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod position_list;
pub mod vector4;

pub use encoder::UnitCellVectorEncoder;
pub use error::EncodeError;
pub use position_list::PositionList;
pub use vector4::LatticeVector4D;
