//! Halite: crystal-lattice geometry and kinetic Monte Carlo model
//! construction.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Halite sub-crates. For most users, adding `halite` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use halite::prelude::*;
//!
//! // A 4 Å cubic cell with a corner and a body-center site.
//! let comparer = ToleranceComparer::new(1.0e-6).unwrap();
//! let system = FractionalCoordinateSystem::new(
//!     Cartesian3D::new(4.0, 0.0, 0.0),
//!     Cartesian3D::new(0.0, 4.0, 0.0),
//!     Cartesian3D::new(0.0, 0.0, 4.0),
//! )
//! .unwrap();
//! let positions = PositionList::new(
//!     &[
//!         Fractional3D::new(0.0, 0.0, 0.0),
//!         Fractional3D::new(0.5, 0.5, 0.5),
//!     ],
//!     comparer,
//! )
//! .unwrap();
//! let encoder = UnitCellVectorEncoder::new(positions, VectorTransformer::new(system));
//!
//! // Positions anywhere on the lattice encode to discrete 4D addresses.
//! let address = encoder.try_encode(&Fractional3D::new(1.5, -0.5, 0.5)).unwrap();
//! assert_eq!(address, LatticeVector4D::new(1, -1, 0, 1));
//! assert_eq!(
//!     encoder.try_decode(&address),
//!     Some(Fractional3D::new(1.5, -0.5, 0.5))
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`geometry`] | `halite-core` | Vectors, tolerance comparer, coordinate systems |
//! | [`symmetry`] | `halite-symmetry` | Symmetry operations, space-group trait, moment indicator |
//! | [`encode`] | `halite-encode` | Position lists and the 3D/4D codec |
//! | [`search`] | `halite-search` | Radial samplers, deferred queries, chain search |
//! | [`mapping`] | `halite-mapping` | Transition mappers and inversion-linked models |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinate primitives and tolerance numerics (`halite-core`).
pub use halite_core as geometry;

/// Symmetry-operation algebra and moment invariants (`halite-symmetry`).
pub use halite_symmetry as symmetry;

/// Position lists and the 3D/4D codec (`halite-encode`).
pub use halite_encode as encode;

/// Radial neighbor search and deferred queries (`halite-search`).
pub use halite_search as search;

/// Transition mapping and inversion linking (`halite-mapping`).
pub use halite_mapping as mapping;

/// The most commonly used types, importable in one line.
pub mod prelude {
    // Coordinates and numerics
    pub use halite_core::{
        Cartesian3D, CoordinateError, Fractional3D, FractionalCoordinateSystem,
        GenericVector3D, Spherical3D, ToleranceComparer, Vector3D, VectorTransformer,
    };

    // Symmetry
    pub use halite_symmetry::{
        CartesianMassPoint, SpaceGroupService, SymmetryError, SymmetryIndicator,
        SymmetryOperation,
    };

    // Encoding
    pub use halite_encode::{
        EncodeError, LatticeVector4D, PositionList, UnitCellVectorEncoder,
    };

    // Search
    pub use halite_search::{
        LatticePoint, LatticeTarget, PositionChainSampler, RadialConstraint,
        RadialPointQuery, RadialPositionSampler, RadialTargetQuery, SearchError,
        SiteLookup,
    };

    // Mapping
    pub use halite_mapping::{
        ApproxKineticTransitionMapper, InverseLink, KineticMapping, KineticMappingModel,
        KineticModelBuilder, KineticTransition, KineticTransitionMapper,
        KineticTransitionModel, MappingError, MetropolisMapping, MetropolisTransition,
        MetropolisTransitionMapper,
    };
}
