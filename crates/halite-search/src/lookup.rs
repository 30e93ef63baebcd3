//! The site-lookup collaborator and its result point type.

use halite_core::Fractional3D;
use halite_encode::UnitCellVectorEncoder;

/// A found lattice site: its fractional position plus whatever the lookup
/// stores there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint<T> {
    /// Absolute fractional position of the site.
    pub fractional: Fractional3D,
    /// Site content copied out of the lookup.
    pub content: T,
}

impl<T> LatticePoint<T> {
    /// Create a new lattice point.
    pub const fn new(fractional: Fractional3D, content: T) -> Self {
        Self { fractional, content }
    }
}

/// Source of site content for an encoded lattice.
///
/// Content is periodic: it depends only on the sublattice index, never on
/// the cell offset. The lookup pairs an encoder with a content table of the
/// same cardinality; keeping the two consistent is the implementor's
/// responsibility, and searches treat an index the encoder produced but the
/// lookup cannot serve as a configuration fault.
pub trait SiteLookup {
    /// What a site holds (an occupant species, a flag, an index, ...).
    type Content: Clone;

    /// The codec for the lattice this lookup describes.
    fn encoder(&self) -> &UnitCellVectorEncoder;

    /// Content of the sublattice with the given canonical index.
    fn content_at(&self, position_index: usize) -> Self::Content;
}
