//! Directed and bidirectional CSR graphs with optional vertex, edge and
//! graph properties.
//!
//! Graphs are built once and never mutated structurally afterwards; only
//! property values can be written through `*_mut` accessors.

use core::ops::{Deref, Range};

use log::debug;

use crate::csr::{CsrStore, EdgeRecord};
use crate::descriptor::{EdgeDescriptor, VertexDescriptor};
use crate::error::Result;
use crate::property::PropertyMap;

/// Read access the shortest-path engine needs from a graph.
pub trait OutgoingEdges {
    type OutIter<'a>: Iterator<Item = EdgeDescriptor>
    where
        Self: 'a;

    fn num_vertices(&self) -> usize;
    fn out_edges(&self, u: VertexDescriptor) -> Self::OutIter<'_>;
    fn target(&self, e: EdgeDescriptor) -> VertexDescriptor;
}

/// Directed CSR graph. `EP`, `VP`, `GP` are the edge, vertex and graph
/// property types; `()` means "none" and costs nothing.
#[derive(Clone, Debug)]
pub struct CsrGraph<EP = (), VP = (), GP = ()> {
    forward: CsrStore<EP>,
    vertex_props: PropertyMap<VertexDescriptor, VP>,
    graph_prop: GP,
}

impl<EP> CsrGraph<EP, (), ()> {
    /// `n` vertices and no edges.
    pub fn new(n: usize) -> Self { Self::from_store(CsrStore::with_vertices(n)) }

    pub fn from_store(forward: CsrStore<EP>) -> Self {
        let n = forward.num_vertices();
        Self { forward, vertex_props: PropertyMap::with_default(n), graph_prop: () }
    }

    /// Builds from edges grouped by ascending source; `properties[i]`
    /// belongs to `edges[i]`.
    pub fn try_from_sorted_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Result<Self> {
        CsrStore::try_from_sorted(n, edges, properties).map(Self::from_store)
    }

    /// # Panics
    /// On out-of-range endpoints, a property count different from the edge
    /// count, or edges not grouped by ascending source.
    pub fn from_sorted_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Self {
        Self::try_from_sorted_edges(n, edges, properties).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Builds from edges in any order (counting sort by source).
    pub fn try_from_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Result<Self> {
        CsrStore::try_from_unsorted(n, edges, properties).map(Self::from_store)
    }

    /// # Panics
    /// On out-of-range endpoints or a property count different from the
    /// edge count.
    pub fn from_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Self {
        Self::try_from_edges(n, edges, properties).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<EP: Clone> CsrGraph<EP, (), ()> {
    pub fn try_from_triples(n: usize, edges: &[(usize, usize, EP)]) -> Result<Self> {
        let props = edges.iter().map(|(_, _, p)| p.clone()).collect();
        Self::try_from_edges(n, edges, props)
    }

    /// Unsorted `(source, target, property)` triples.
    pub fn from_triples(n: usize, edges: &[(usize, usize, EP)]) -> Self {
        Self::try_from_triples(n, edges).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl CsrGraph {
    /// Unsorted `(source, target)` pairs without edge properties.
    pub fn from_pairs<R: EdgeRecord>(n: usize, edges: &[R]) -> Self {
        Self::from_edges(n, edges, vec![(); edges.len()])
    }

    pub fn from_sorted_pairs<R: EdgeRecord>(n: usize, edges: &[R]) -> Self {
        Self::from_sorted_edges(n, edges, vec![(); edges.len()])
    }
}

impl<EP, VP, GP> CsrGraph<EP, VP, GP> {
    /// Replaces the vertex properties; needs exactly one value per vertex.
    pub fn try_with_vertex_properties<V>(self, values: Vec<V>) -> Result<CsrGraph<EP, V, GP>> {
        let vertex_props = PropertyMap::try_with_len(values, self.num_vertices(), "vertex properties")?;
        Ok(CsrGraph { forward: self.forward, vertex_props, graph_prop: self.graph_prop })
    }

    pub fn with_vertex_properties<V>(self, values: Vec<V>) -> CsrGraph<EP, V, GP> {
        self.try_with_vertex_properties(values).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn with_graph_property<G>(self, value: G) -> CsrGraph<EP, VP, G> {
        CsrGraph { forward: self.forward, vertex_props: self.vertex_props, graph_prop: value }
    }

    #[inline] pub fn num_vertices(&self) -> usize { self.forward.num_vertices() }
    #[inline] pub fn num_edges(&self) -> usize { self.forward.num_edges() }

    #[inline]
    pub fn vertex(&self, index: usize) -> VertexDescriptor {
        assert!(index < self.num_vertices(), "vertex {} out of range for {} vertices", index, self.num_vertices());
        VertexDescriptor::new(index)
    }

    /// Edge at flattened position `index`. Locating its source searches the
    /// row starts, so keep this off hot paths.
    pub fn edge(&self, index: usize) -> EdgeDescriptor {
        EdgeDescriptor::new(self.forward.source_of(index), index)
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexDescriptor> + DoubleEndedIterator {
        (0..self.num_vertices()).map(VertexDescriptor::new)
    }

    #[inline]
    pub fn out_degree(&self, u: VertexDescriptor) -> usize { self.forward.degree(u.index()) }

    #[inline]
    pub fn source(&self, e: EdgeDescriptor) -> VertexDescriptor {
        debug_assert!(self.forward.bucket(e.source_index()).contains(&e.position()),
            "edge {} does not belong to source {}", e.position(), e.source_index());
        e.source()
    }

    #[inline]
    pub fn target(&self, e: EdgeDescriptor) -> VertexDescriptor {
        VertexDescriptor::new(self.forward.target_at(e.position()))
    }

    #[inline]
    pub fn endpoints(&self, e: EdgeDescriptor) -> (VertexDescriptor, VertexDescriptor) {
        (self.source(e), self.target(e))
    }

    /// The endpoint of `e` that is not `v`.
    pub fn opposite(&self, e: EdgeDescriptor, v: VertexDescriptor) -> VertexDescriptor {
        let (s, t) = self.endpoints(e);
        debug_assert!(v == s || v == t, "{} is not an endpoint of {}", v, e);
        if v == s { t } else { s }
    }

    /// All edges in ascending position order.
    pub fn edges(&self) -> Edges<'_> {
        Edges { row_start: self.forward.row_start(), source: 0, pos: 0, end: self.num_edges() }
    }

    pub fn out_edges(&self, u: VertexDescriptor) -> OutEdges {
        OutEdges { source: u.index(), range: self.forward.bucket(u.index()) }
    }

    /// Parallel edges `u -> v` in position order.
    pub fn edges_between(&self, u: VertexDescriptor, v: VertexDescriptor) -> EdgesBetween<'_> {
        assert!(v.index() < self.num_vertices(), "vertex {} out of range for {} vertices", v.index(), self.num_vertices());
        EdgesBetween { inner: self.out_edges(u), column: self.forward.columns(), target: v.index() }
    }

    pub fn has_edge(&self, u: VertexDescriptor, v: VertexDescriptor) -> bool {
        self.edges_between(u, v).next().is_some()
    }

    #[inline]
    pub fn edge_property(&self, e: EdgeDescriptor) -> &EP {
        assert!(e.position() < self.num_edges(), "edge {} out of range for {} edges", e.position(), self.num_edges());
        self.forward.payload_at(e.position())
    }

    #[inline]
    pub fn edge_property_mut(&mut self, e: EdgeDescriptor) -> &mut EP {
        assert!(e.position() < self.num_edges(), "edge {} out of range for {} edges", e.position(), self.num_edges());
        self.forward.payload_at_mut(e.position())
    }

    /// Edge properties indexed by position.
    pub fn edge_properties(&self) -> &[EP] { self.forward.payload() }

    #[inline] pub fn vertex_property(&self, v: VertexDescriptor) -> &VP { &self.vertex_props[v] }
    #[inline] pub fn vertex_property_mut(&mut self, v: VertexDescriptor) -> &mut VP { &mut self.vertex_props[v] }
    pub fn vertex_properties(&self) -> &PropertyMap<VertexDescriptor, VP> { &self.vertex_props }

    pub fn graph_property(&self) -> &GP { &self.graph_prop }
    pub fn graph_property_mut(&mut self) -> &mut GP { &mut self.graph_prop }

    pub fn store(&self) -> &CsrStore<EP> { &self.forward }
    pub fn row_start(&self) -> &[usize] { self.forward.row_start() }
    pub fn columns(&self) -> &[usize] { self.forward.columns() }
}

impl<EP, VP, GP> OutgoingEdges for CsrGraph<EP, VP, GP> {
    type OutIter<'a> = OutEdges where Self: 'a;

    #[inline] fn num_vertices(&self) -> usize { self.forward.num_vertices() }
    #[inline] fn out_edges(&self, u: VertexDescriptor) -> OutEdges { CsrGraph::out_edges(self, u) }
    #[inline] fn target(&self, e: EdgeDescriptor) -> VertexDescriptor { CsrGraph::target(self, e) }
}

// ---------------- Edge sequences ----------------

/// Outgoing edges of one vertex.
#[derive(Clone, Debug)]
pub struct OutEdges {
    source: usize,
    range: Range<usize>,
}

impl Iterator for OutEdges {
    type Item = EdgeDescriptor;
    #[inline]
    fn next(&mut self) -> Option<EdgeDescriptor> {
        self.range.next().map(|p| EdgeDescriptor::new(self.source, p))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.range.size_hint() }
}
impl DoubleEndedIterator for OutEdges {
    fn next_back(&mut self) -> Option<EdgeDescriptor> {
        self.range.next_back().map(|p| EdgeDescriptor::new(self.source, p))
    }
}
impl ExactSizeIterator for OutEdges {}

/// Every edge of the graph, ascending by position.
#[derive(Clone, Debug)]
pub struct Edges<'a> {
    row_start: &'a [usize],
    source: usize,
    pos: usize,
    end: usize,
}

impl Iterator for Edges<'_> {
    type Item = EdgeDescriptor;
    fn next(&mut self) -> Option<EdgeDescriptor> {
        if self.pos >= self.end { return None; }
        while self.row_start[self.source + 1] <= self.pos { self.source += 1; }
        let e = EdgeDescriptor::new(self.source, self.pos);
        self.pos += 1;
        Some(e)
    }
    fn size_hint(&self) -> (usize, Option<usize>) { let r = self.end - self.pos; (r, Some(r)) }
}
impl ExactSizeIterator for Edges<'_> {}

/// Outgoing edges of one vertex filtered to a single target.
#[derive(Clone, Debug)]
pub struct EdgesBetween<'a> {
    inner: OutEdges,
    column: &'a [usize],
    target: usize,
}

impl Iterator for EdgesBetween<'_> {
    type Item = EdgeDescriptor;
    fn next(&mut self) -> Option<EdgeDescriptor> {
        let (column, target) = (self.column, self.target);
        self.inner.find(|e| column[e.position()] == target)
    }
}

/// Incoming edges of one vertex, reported as forward edge descriptors.
#[derive(Clone, Debug)]
pub struct InEdges<'a> {
    backward: &'a CsrStore<usize>,
    range: Range<usize>,
}

impl Iterator for InEdges<'_> {
    type Item = EdgeDescriptor;
    fn next(&mut self) -> Option<EdgeDescriptor> {
        self.range.next().map(|p| EdgeDescriptor::new(self.backward.target_at(p), *self.backward.payload_at(p)))
    }
    fn size_hint(&self) -> (usize, Option<usize>) { self.range.size_hint() }
}
impl ExactSizeIterator for InEdges<'_> {}

// ---------------- Bidirectional ----------------

/// Directed graph plus a backward store for incoming-edge queries.
///
/// Dereferences to the forward [`CsrGraph`] for everything outgoing.
#[derive(Clone, Debug)]
pub struct BidirectionalCsrGraph<EP = (), VP = (), GP = ()> {
    graph: CsrGraph<EP, VP, GP>,
    backward: CsrStore<usize>,
}

impl<EP, VP, GP> BidirectionalCsrGraph<EP, VP, GP> {
    pub fn from_graph(graph: CsrGraph<EP, VP, GP>) -> Self {
        let backward = graph.forward.reversed();
        debug!("bidirectional graph ready n={} m={}", graph.num_vertices(), graph.num_edges());
        Self { graph, backward }
    }

    pub fn try_with_vertex_properties<V>(self, values: Vec<V>) -> Result<BidirectionalCsrGraph<EP, V, GP>> {
        let graph = self.graph.try_with_vertex_properties(values)?;
        Ok(BidirectionalCsrGraph { graph, backward: self.backward })
    }

    pub fn with_vertex_properties<V>(self, values: Vec<V>) -> BidirectionalCsrGraph<EP, V, GP> {
        self.try_with_vertex_properties(values).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn with_graph_property<G>(self, value: G) -> BidirectionalCsrGraph<EP, VP, G> {
        BidirectionalCsrGraph { graph: self.graph.with_graph_property(value), backward: self.backward }
    }

    #[inline]
    pub fn in_degree(&self, v: VertexDescriptor) -> usize { self.backward.degree(v.index()) }

    pub fn in_edges(&self, v: VertexDescriptor) -> InEdges<'_> {
        InEdges { backward: &self.backward, range: self.backward.bucket(v.index()) }
    }

    /// Mutable access to the properties of the forward graph. Structure is
    /// fixed, so the backward store stays valid.
    pub fn edge_property_mut(&mut self, e: EdgeDescriptor) -> &mut EP { self.graph.edge_property_mut(e) }
    pub fn vertex_property_mut(&mut self, v: VertexDescriptor) -> &mut VP { self.graph.vertex_property_mut(v) }
    pub fn graph_property_mut(&mut self) -> &mut GP { self.graph.graph_property_mut() }

    pub fn backward(&self) -> &CsrStore<usize> { &self.backward }
    pub fn forward(&self) -> &CsrGraph<EP, VP, GP> { &self.graph }
    pub fn into_forward(self) -> CsrGraph<EP, VP, GP> { self.graph }
}

impl<EP> BidirectionalCsrGraph<EP, (), ()> {
    pub fn try_from_sorted_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Result<Self> {
        CsrGraph::try_from_sorted_edges(n, edges, properties).map(Self::from_graph)
    }

    pub fn from_sorted_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Self {
        Self::from_graph(CsrGraph::from_sorted_edges(n, edges, properties))
    }

    pub fn try_from_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Result<Self> {
        CsrGraph::try_from_edges(n, edges, properties).map(Self::from_graph)
    }

    pub fn from_edges<R: EdgeRecord>(n: usize, edges: &[R], properties: Vec<EP>) -> Self {
        Self::from_graph(CsrGraph::from_edges(n, edges, properties))
    }
}

impl<EP: Clone> BidirectionalCsrGraph<EP, (), ()> {
    pub fn from_triples(n: usize, edges: &[(usize, usize, EP)]) -> Self {
        Self::from_graph(CsrGraph::from_triples(n, edges))
    }
}

impl BidirectionalCsrGraph {
    pub fn from_pairs<R: EdgeRecord>(n: usize, edges: &[R]) -> Self {
        Self::from_graph(CsrGraph::from_pairs(n, edges))
    }
}

impl<EP, VP, GP> Deref for BidirectionalCsrGraph<EP, VP, GP> {
    type Target = CsrGraph<EP, VP, GP>;
    fn deref(&self) -> &CsrGraph<EP, VP, GP> { &self.graph }
}

impl<EP, VP, GP> OutgoingEdges for BidirectionalCsrGraph<EP, VP, GP> {
    type OutIter<'a> = OutEdges where Self: 'a;

    #[inline] fn num_vertices(&self) -> usize { self.graph.num_vertices() }
    #[inline] fn out_edges(&self, u: VertexDescriptor) -> OutEdges { self.graph.out_edges(u) }
    #[inline] fn target(&self, e: EdgeDescriptor) -> VertexDescriptor { self.graph.target(e) }
}
