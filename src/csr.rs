//! Compressed sparse row adjacency store.
//!
//! `row_start` has `n + 1` monotone entries with `row_start[0] == 0` and
//! `row_start[n] == m`; the outgoing edges of `u` occupy positions
//! `row_start[u]..row_start[u + 1]` of `column`. `payload[p]` rides along
//! with `column[p]` (edge properties for a forward store, original forward
//! positions for a backward store).

use core::ops::Range;

use log::debug;

use crate::error::{GraphError, Result};

/// A `{source, target}` record as fed to the store builders.
pub trait EdgeRecord {
    fn source(&self) -> usize;
    fn target(&self) -> usize;
}

impl EdgeRecord for (usize, usize) {
    #[inline(always)] fn source(&self) -> usize { self.0 }
    #[inline(always)] fn target(&self) -> usize { self.1 }
}

impl EdgeRecord for (u32, u32) {
    #[inline(always)] fn source(&self) -> usize { self.0 as usize }
    #[inline(always)] fn target(&self) -> usize { self.1 as usize }
}

impl<P> EdgeRecord for (usize, usize, P) {
    #[inline(always)] fn source(&self) -> usize { self.0 }
    #[inline(always)] fn target(&self) -> usize { self.1 }
}

impl<P> EdgeRecord for (u32, u32, P) {
    #[inline(always)] fn source(&self) -> usize { self.0 as usize }
    #[inline(always)] fn target(&self) -> usize { self.1 as usize }
}

impl<R: EdgeRecord + ?Sized> EdgeRecord for &R {
    #[inline(always)] fn source(&self) -> usize { (**self).source() }
    #[inline(always)] fn target(&self) -> usize { (**self).target() }
}

#[inline]
fn check_endpoints<R: EdgeRecord>(e: &R, n: usize) -> Result<()> {
    if e.source() >= n { return Err(GraphError::VertexOutOfRange { index: e.source(), num_vertices: n }); }
    if e.target() >= n { return Err(GraphError::VertexOutOfRange { index: e.target(), num_vertices: n }); }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct CsrStore<P> {
    row_start: Vec<usize>,
    column: Vec<usize>,
    payload: Vec<P>,
}

impl<P> CsrStore<P> {
    /// `n` vertices, no edges.
    pub fn with_vertices(n: usize) -> Self {
        Self { row_start: vec![0; n + 1], column: Vec::new(), payload: Vec::new() }
    }

    /// Single pass over edges already grouped by ascending source.
    pub fn try_from_sorted<R: EdgeRecord>(n: usize, edges: &[R], payload: Vec<P>) -> Result<Self> {
        if payload.len() != edges.len() {
            return Err(GraphError::PropertyLengthMismatch { what: "edge properties", expected: edges.len(), actual: payload.len() });
        }
        let m = edges.len();
        let mut row_start = Vec::with_capacity(n + 1);
        let mut column = Vec::with_capacity(m);
        row_start.push(0);
        // row_start holds entries for vertices 0..=current
        let mut current = 0usize;
        for (pos, e) in edges.iter().enumerate() {
            check_endpoints(e, n)?;
            let s = e.source();
            if s < current { return Err(GraphError::UnsortedEdges { position: pos }); }
            while current < s { row_start.push(pos); current += 1; }
            column.push(e.target());
        }
        row_start.resize(n + 1, m);
        debug!("csr: sorted build n={} m={}", n, m);
        Ok(Self { row_start, column, payload })
    }

    /// Two-pass counting sort over arbitrary edge order. Edges sharing a
    /// source keep their relative input order; `payload` is permuted
    /// identically so `payload[p]` stays paired with `column[p]`.
    pub fn try_from_unsorted<R: EdgeRecord>(n: usize, edges: &[R], payload: Vec<P>) -> Result<Self> {
        if payload.len() != edges.len() {
            return Err(GraphError::PropertyLengthMismatch { what: "edge properties", expected: edges.len(), actual: payload.len() });
        }
        let m = edges.len();
        let mut row_start = vec![0usize; n + 1];
        for e in edges {
            check_endpoints(e, n)?;
            row_start[e.source() + 1] += 1;
        }
        for i in 1..=n { row_start[i] += row_start[i - 1]; }

        debug!("csr: counting-sort build n={} m={}", n, m);
        Ok(Self::scatter(row_start, edges, payload))
    }

    /// Pass 2 of the counting sort. `row_start` already holds bucket starts
    /// and every endpoint is in range.
    fn scatter<R: EdgeRecord>(row_start: Vec<usize>, edges: &[R], payload: Vec<P>) -> Self {
        let n = row_start.len() - 1;
        let m = edges.len();
        let mut cursor: Vec<usize> = row_start[..n].to_vec();
        let mut column = vec![0usize; m];
        let mut slots: Vec<Option<P>> = Vec::with_capacity(m);
        slots.resize_with(m, || None);
        for (e, p) in edges.iter().zip(payload) {
            let s = e.source();
            let pos = cursor[s];
            cursor[s] += 1;
            column[pos] = e.target();
            slots[pos] = Some(p);
        }
        // every position was written exactly once
        let payload: Vec<P> = slots.into_iter().flatten().collect();
        debug_assert_eq!(payload.len(), m);
        Self { row_start, column, payload }
    }

    /// Backward store: every `(s, t)` reversed to `(t, s)` and tagged with
    /// its forward position, bucketed by the new source.
    pub fn reversed(&self) -> CsrStore<usize> {
        let n = self.num_vertices();
        let m = self.num_edges();
        let mut flipped: Vec<(usize, usize)> = Vec::with_capacity(m);
        for u in 0..n {
            for pos in self.row_start[u]..self.row_start[u + 1] { flipped.push((self.column[pos], u)); }
        }
        let mut row_start = vec![0usize; n + 1];
        for &(t, _) in &flipped { row_start[t + 1] += 1; }
        for i in 1..=n { row_start[i] += row_start[i - 1]; }
        debug!("csr: backward build n={} m={}", n, m);
        CsrStore::scatter(row_start, &flipped, (0..m).collect())
    }

    /// Adopts prebuilt CSR arrays after checking their invariants.
    pub fn try_from_parts(row_start: Vec<usize>, column: Vec<usize>, payload: Vec<P>) -> Result<Self> {
        if row_start.is_empty() { return Err(GraphError::MalformedRowStart { position: 0 }); }
        if row_start[0] != 0 { return Err(GraphError::MalformedRowStart { position: 0 }); }
        for (i, w) in row_start.windows(2).enumerate() {
            if w[0] > w[1] { return Err(GraphError::MalformedRowStart { position: i + 1 }); }
        }
        let n = row_start.len() - 1;
        if row_start[n] != column.len() { return Err(GraphError::MalformedRowStart { position: n }); }
        if let Some(&bad) = column.iter().find(|&&t| t >= n) {
            return Err(GraphError::VertexOutOfRange { index: bad, num_vertices: n });
        }
        if payload.len() != column.len() {
            return Err(GraphError::PropertyLengthMismatch { what: "edge properties", expected: column.len(), actual: payload.len() });
        }
        Ok(Self { row_start, column, payload })
    }

    #[inline] pub fn num_vertices(&self) -> usize { self.row_start.len() - 1 }
    #[inline] pub fn num_edges(&self) -> usize { self.column.len() }

    /// Positions of `u`'s outgoing edges.
    #[inline]
    pub fn bucket(&self, u: usize) -> Range<usize> {
        assert!(u < self.num_vertices(), "vertex {} out of range for {} vertices", u, self.num_vertices());
        self.row_start[u]..self.row_start[u + 1]
    }

    #[inline]
    pub fn degree(&self, u: usize) -> usize { let r = self.bucket(u); r.end - r.start }

    #[inline]
    pub fn target_at(&self, pos: usize) -> usize {
        assert!(pos < self.column.len(), "edge {} out of range for {} edges", pos, self.column.len());
        self.column[pos]
    }

    #[inline] pub fn payload_at(&self, pos: usize) -> &P { &self.payload[pos] }
    #[inline] pub fn payload_at_mut(&mut self, pos: usize) -> &mut P { &mut self.payload[pos] }

    /// Source vertex owning position `pos`.
    pub fn source_of(&self, pos: usize) -> usize {
        assert!(pos < self.column.len(), "edge {} out of range for {} edges", pos, self.column.len());
        // first u with row_start[u + 1] > pos
        self.row_start[1..].partition_point(|&end| end <= pos)
    }

    #[inline] pub fn row_start(&self) -> &[usize] { &self.row_start }
    #[inline] pub fn columns(&self) -> &[usize] { &self.column }
    #[inline] pub fn payload(&self) -> &[P] { &self.payload }
    #[inline] pub fn payload_mut(&mut self) -> &mut [P] { &mut self.payload }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_zero_rows(){
        let s: CsrStore<()> = CsrStore::with_vertices(4);
        assert_eq!(s.row_start(), &[0, 0, 0, 0, 0]);
        assert_eq!(s.num_edges(), 0);
        assert_eq!(s.degree(3), 0);
    }

    #[test]
    fn sorted_build_skips_empty_rows(){
        let edges = [(0usize, 1usize), (0, 3), (2, 0), (4, 4)];
        let s = CsrStore::try_from_sorted(5, &edges, vec!['a', 'b', 'c', 'd']).unwrap();
        assert_eq!(s.row_start(), &[0, 2, 2, 3, 3, 4]);
        assert_eq!(s.columns(), &[1, 3, 0, 4]);
        assert_eq!(s.source_of(2), 2);
        assert_eq!(s.source_of(3), 4);
        assert_eq!(*s.payload_at(2), 'c');
    }

    #[test]
    fn sorted_build_rejects_descending_sources(){
        let edges = [(1usize, 0usize), (0, 1)];
        let r = CsrStore::try_from_sorted(2, &edges, vec![(), ()]);
        assert_eq!(r, Err(GraphError::UnsortedEdges { position: 1 }));
    }

    #[test]
    fn counting_sort_is_stable_and_permutes_payload(){
        let edges = [(2usize, 0usize), (0, 2), (2, 1), (0, 1)];
        let s = CsrStore::try_from_unsorted(3, &edges, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(s.row_start(), &[0, 2, 2, 4]);
        assert_eq!(s.columns(), &[2, 1, 0, 1]);
        assert_eq!(s.payload(), &[20, 40, 10, 30]);
    }

    #[test]
    fn reversed_store_points_back_to_forward_positions(){
        let edges = [(0usize, 2usize), (1, 2), (2, 0)];
        let fwd = CsrStore::try_from_sorted(3, &edges, vec![(), (), ()]).unwrap();
        let bwd = fwd.reversed();
        assert_eq!(bwd.row_start(), &[0, 1, 1, 3]);
        assert_eq!(bwd.columns(), &[2, 0, 1]);
        assert_eq!(bwd.payload(), &[2, 0, 1]);
    }

    #[test]
    fn builders_reject_bad_input(){
        let edges = [(0usize, 5usize)];
        assert_eq!(CsrStore::try_from_unsorted(2, &edges, vec![()]), Err(GraphError::VertexOutOfRange { index: 5, num_vertices: 2 }));
        let edges = [(0usize, 1usize)];
        assert!(matches!(CsrStore::<u8>::try_from_unsorted(2, &edges, vec![]), Err(GraphError::PropertyLengthMismatch { .. })));
        assert_eq!(CsrStore::try_from_parts(vec![0, 2, 1], vec![0, 1], vec![(), ()]), Err(GraphError::MalformedRowStart { position: 2 }));
        assert_eq!(CsrStore::try_from_parts(vec![0, 1, 2], vec![0, 7], vec![(), ()]), Err(GraphError::VertexOutOfRange { index: 7, num_vertices: 2 }));
    }
}
