//! Tolerance-aware radial neighbor search over encoded lattices.
//!
//! The sampler walks unit cells shell by shell around an origin until the
//! [`SearchBoundary`] proves the remaining cells cannot contain another hit,
//! filtering sites through a [`RadialConstraint`] and a caller predicate.
//! Search results can be consumed raw, projected into [`LatticeTarget`]
//! records, or produced lazily through the deferred single-shot
//! [`RadialPointQuery`] / [`RadialTargetQuery`] pair. The
//! [`PositionChainSampler`] builds multi-step chains whose step lengths
//! reproduce a reference geometry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod chain;
pub mod constraint;
pub mod error;
pub mod lookup;
pub mod query;
pub mod sampler;
pub mod target;

pub use boundary::SearchBoundary;
pub use chain::PositionChainSampler;
pub use constraint::RadialConstraint;
pub use error::SearchError;
pub use lookup::{LatticePoint, SiteLookup};
pub use query::{RadialPointQuery, RadialTargetQuery};
pub use sampler::RadialPositionSampler;
pub use target::LatticeTarget;
