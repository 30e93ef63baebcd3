//! Symmetry-operation algebra for the Halite lattice toolkit.
//!
//! Provides the affine [`SymmetryOperation`] (a 3×4 coefficient block plus a
//! trim tolerance), the [`SpaceGroupService`] collaborator trait through
//! which a space-group database is consumed, and the moment-invariant
//! [`SymmetryIndicator`] used to compare point geometries without a symmetry
//! table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod indicator;
pub mod mass_point;
pub mod operation;
pub mod space_group;

pub use error::SymmetryError;
pub use indicator::SymmetryIndicator;
pub use mass_point::{
    inertia_tensor, mass_center, shift_to_mass_center, CartesianMassPoint, InertiaTensor,
};
pub use operation::{SymmetryOperation, DEFAULT_TRIM_TOLERANCE};
pub use space_group::{
    expand_orbit, expand_sequences, shift_first_to_origin, SpaceGroupService,
};
