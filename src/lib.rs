//! In-process graph store and shortest-path engine.
//!
//! Three pieces, leaves first:
//!  - [`CsrGraph`] / [`BidirectionalCsrGraph`]: immutable compressed sparse
//!    row adjacency with optional vertex, edge and graph properties.
//!  - [`DaryHeap`]: comparator-parameterized d-ary heap whose handles stay
//!    valid across moves, giving O(log_K n) decrease-key.
//!  - [`Dijkstra`]: single-source shortest paths coupling the two, writing
//!    into caller-owned [`Label`]s.
//!
//! A stable C ABI over raw CSR arrays / edge lists is exported at the bottom
//! of this file.

use core::slice;

pub mod config;
pub mod csr;
pub mod descriptor;
pub mod dijkstra;
pub mod error;
pub mod gen;
pub mod graph;
pub mod heap;
pub mod property;

pub use config::DijkstraConfig;
pub use csr::{CsrStore, EdgeRecord};
pub use descriptor::{Descriptor, EdgeDescriptor, VertexDescriptor};
pub use dijkstra::{
    dijkstra, dijkstra_until, edge_weights, init_labels, shortest_path, Dijkstra, DijkstraStats, Distance, Label,
};
pub use error::{GraphError, Result};
pub use graph::{BidirectionalCsrGraph, CsrGraph, Edges, EdgesBetween, InEdges, OutEdges, OutgoingEdges};
pub use heap::{DaryHeap, Handle, HeapOrder, MaxFirst, MinFirst};
pub use property::PropertyMap;

// ---------------- C ABI ----------------

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct CsrSsspRunInfo {
    pub pushes: u64,
    pub pops: u64,
    pub decrease_keys: u64,
    pub relaxations: u64,
    pub settled: u32,
    pub stopped_early: i32,
    pub error_code: i32, // 0 == success
}

impl From<DijkstraStats> for CsrSsspRunInfo {
    fn from(s: DijkstraStats) -> Self {
        CsrSsspRunInfo {
            pushes: s.pushes,
            pops: s.pops,
            decrease_keys: s.decrease_keys,
            relaxations: s.relaxations,
            settled: s.settled.min(u32::MAX as u64) as u32,
            stopped_early: s.stopped_early as i32,
            error_code: 0,
        }
    }
}

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 { &[] } else { slice::from_raw_parts(ptr, len) }
}
#[inline(always)]
unsafe fn as_mut_slice<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 { &mut [] } else { slice::from_raw_parts_mut(ptr, len) }
}

fn solve_f32(graph: &CsrGraph<f32>, source: u32, dist: &mut [f32], pred: &mut [i32]) -> DijkstraStats {
    let mut labels = init_labels::<f32>(graph.num_vertices());
    let stats = Dijkstra::<f32>::from_env().run(graph, VertexDescriptor::new(source as usize), &mut labels, edge_weights(graph));
    for ((l, d), p) in labels.iter().zip(dist.iter_mut()).zip(pred.iter_mut()) {
        *d = l.distance;
        *p = if l.is_reached() { l.predecessor.index() as i32 } else { -1 };
    }
    stats
}

fn finish(result: Result<DijkstraStats>, info: *mut CsrSsspRunInfo) -> i32 {
    let (rc, out) = match result {
        Ok(stats) => (0, CsrSsspRunInfo::from(stats)),
        Err(e) => {
            log::debug!("csr_sssp ffi: {e}");
            (e.code(), CsrSsspRunInfo { error_code: e.code(), ..Default::default() })
        }
    };
    if !info.is_null() { unsafe { *info = out; } }
    rc
}

/// Shortest paths over caller CSR arrays (`offsets` has `n + 1` entries,
/// `targets` / `weights` have `offsets[n]`). Unreached vertices get
/// `f32::INFINITY` and predecessor `-1`; the source is its own predecessor.
/// Returns 0 or a negative [`GraphError::code`].
///
/// # Safety
/// Every non-null pointer must be valid for the lengths above; `out_dist`
/// and `out_pred` must have room for `n` entries; `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn csr_sssp_run(
    n: u32,
    offsets: *const u32, // len n+1
    targets: *const u32, // len m
    weights: *const f32, // len m
    source: u32,
    out_dist: *mut f32, // len n
    out_pred: *mut i32, // len n
    info: *mut CsrSsspRunInfo,
) -> i32 {
    let result = (|| -> Result<DijkstraStats> {
        if n == 0 { return Err(GraphError::EmptyGraph); }
        if source >= n { return Err(GraphError::VertexOutOfRange { index: source as usize, num_vertices: n as usize }); }
        if offsets.is_null() || out_dist.is_null() || out_pred.is_null() { return Err(GraphError::NullPointer); }
        let n_usize = n as usize;
        let off = as_slice(offsets, n_usize + 1);
        let m = off[n_usize] as usize;
        if m > 0 && (targets.is_null() || weights.is_null()) { return Err(GraphError::NullPointer); }
        let row_start: Vec<usize> = off.iter().map(|&o| o as usize).collect();
        let column: Vec<usize> = as_slice(targets, m).iter().map(|&t| t as usize).collect();
        let store = CsrStore::try_from_parts(row_start, column, as_slice(weights, m).to_vec())?;
        let graph = CsrGraph::from_store(store);
        Ok(solve_f32(&graph, source, as_mut_slice(out_dist, n_usize), as_mut_slice(out_pred, n_usize)))
    })();
    finish(result, info)
}

/// Shortest paths over an unsorted edge list of `m` edges
/// (`sources[i] -> targets[i]` with `weights[i]`). Same outputs and return
/// codes as [`csr_sssp_run`].
///
/// # Safety
/// Every non-null pointer must be valid for its length (`m` for the edge
/// arrays, `n` for the outputs); `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn csr_sssp_run_edges(
    n: u32,
    m: u32,
    sources: *const u32,
    targets: *const u32,
    weights: *const f32,
    source: u32,
    out_dist: *mut f32,
    out_pred: *mut i32,
    info: *mut CsrSsspRunInfo,
) -> i32 {
    let result = (|| -> Result<DijkstraStats> {
        if n == 0 { return Err(GraphError::EmptyGraph); }
        if source >= n { return Err(GraphError::VertexOutOfRange { index: source as usize, num_vertices: n as usize }); }
        if out_dist.is_null() || out_pred.is_null() { return Err(GraphError::NullPointer); }
        let m_usize = m as usize;
        if m_usize > 0 && (sources.is_null() || targets.is_null() || weights.is_null()) { return Err(GraphError::NullPointer); }
        let edges: Vec<(u32, u32)> = as_slice(sources, m_usize).iter().copied().zip(as_slice(targets, m_usize).iter().copied()).collect();
        let graph = CsrGraph::try_from_edges(n as usize, &edges, as_slice(weights, m_usize).to_vec())?;
        let n_usize = n as usize;
        Ok(solve_f32(&graph, source, as_mut_slice(out_dist, n_usize), as_mut_slice(out_pred, n_usize)))
    })();
    finish(result, info)
}

#[no_mangle]
pub extern "C" fn csr_sssp_version() -> u32 { 1 }
