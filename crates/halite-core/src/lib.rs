//! Coordinate primitives and tolerance-aware numerics for the Halite
//! lattice toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! three continuous coordinate representations of a crystal position
//! ([`Fractional3D`], [`Cartesian3D`], [`Spherical3D`]), the
//! [`ToleranceComparer`] used for every floating-point decision in the
//! workspace, and the [`VectorTransformer`] that converts between the
//! representations through a crystal's basis.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod systems;
pub mod tolerance;
pub mod vector;

pub use error::CoordinateError;
pub use systems::{FractionalCoordinateSystem, SphericalCoordinateSystem, VectorTransformer};
pub use tolerance::ToleranceComparer;
pub use vector::{Cartesian3D, Fractional3D, GenericVector3D, Spherical3D, Vector3D};
