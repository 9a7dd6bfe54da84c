//! Opaque vertex and edge identities.
//!
//! Both descriptors wrap dense indices into the CSR arrays; callers never see
//! raw storage positions beyond what `index()` / `position()` report.

use core::fmt;
use core::hash::{Hash, Hasher};

/// Dense vertex index in `[0, num_vertices)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VertexDescriptor(usize);

impl VertexDescriptor {
    /// Reserved "no vertex" value.
    pub const NONE: VertexDescriptor = VertexDescriptor(usize::MAX);

    #[inline]
    pub const fn new(index: usize) -> Self { VertexDescriptor(index) }

    #[inline]
    pub const fn index(self) -> usize { self.0 }

    #[inline]
    pub const fn is_none(self) -> bool { self.0 == usize::MAX }
}

impl Default for VertexDescriptor {
    fn default() -> Self { VertexDescriptor::NONE }
}

impl From<usize> for VertexDescriptor {
    fn from(index: usize) -> Self { VertexDescriptor(index) }
}

impl fmt::Display for VertexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() { write!(f, "v(none)") } else { write!(f, "v{}", self.0) }
    }
}

/// Edge identity: (source vertex index, flattened CSR position).
///
/// Equality and hashing look at the position only. Two descriptors for the
/// same position always carry the same source when produced by one graph.
#[derive(Copy, Clone, Debug)]
pub struct EdgeDescriptor {
    source: usize,
    position: usize,
}

impl EdgeDescriptor {
    #[inline]
    pub const fn new(source: usize, position: usize) -> Self { EdgeDescriptor { source, position } }

    #[inline]
    pub const fn source_index(self) -> usize { self.source }

    #[inline]
    pub const fn source(self) -> VertexDescriptor { VertexDescriptor(self.source) }

    /// Flattened position in the column array; also the edge-property index.
    #[inline]
    pub const fn position(self) -> usize { self.position }
}

impl PartialEq for EdgeDescriptor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let same = self.position == other.position;
        debug_assert!(!same || self.source == other.source,
            "edge descriptors at position {} disagree on source ({} vs {})", self.position, self.source, other.source);
        same
    }
}
impl Eq for EdgeDescriptor {}

impl Hash for EdgeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) { self.position.hash(state); }
}

impl fmt::Display for EdgeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}(from v{})", self.position, self.source)
    }
}

/// Descriptor types that address a dense property array.
pub trait Descriptor: Copy {
    fn dense_index(self) -> usize;
}

impl Descriptor for VertexDescriptor {
    #[inline(always)]
    fn dense_index(self) -> usize { self.0 }
}

impl Descriptor for EdgeDescriptor {
    #[inline(always)]
    fn dense_index(self) -> usize { self.position }
}
