//! Transition pathway enumeration for kinetic and Metropolis Monte Carlo
//! models.
//!
//! A transition names an abstract jump geometry; a mapping pins that
//! geometry to concrete 4D lattice addresses. The mappers enumerate all
//! mappings of a transition, either through a space-group table
//! ([`KineticTransitionMapper`]), through radial chain search
//! ([`ApproxKineticTransitionMapper`]), or as position-set products
//! ([`MetropolisTransitionMapper`]). The [`KineticModelBuilder`] assembles
//! per-transition models and links every mapping to its geometric inverse.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod approx;
pub mod builder;
pub mod error;
pub mod exchange;
pub mod kinetic;
pub mod mapping;
pub mod transition;

pub use approx::ApproxKineticTransitionMapper;
pub use builder::{InverseLink, KineticMappingModel, KineticModelBuilder, KineticTransitionModel};
pub use error::MappingError;
pub use exchange::{MetropolisMapping, MetropolisTransitionMapper};
pub use kinetic::KineticTransitionMapper;
pub use mapping::{KineticMapping, PathKey};
pub use transition::{KineticTransition, MetropolisTransition};
