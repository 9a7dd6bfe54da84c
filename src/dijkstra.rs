//! Single-source shortest paths over non-negative weights.
//!
//! The engine owns only a heap and a per-vertex handle table; distances and
//! predecessors go into a caller-owned label slice. Each vertex is pushed at
//! most once and re-prioritized in place through its heap handle, so a run
//! costs O((V + E) log_K V).

use core::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::DijkstraConfig;
use crate::descriptor::{EdgeDescriptor, VertexDescriptor};
use crate::graph::{CsrGraph, OutgoingEdges};
use crate::heap::{DaryHeap, Handle, HeapOrder};

/// Scalar distance with a reserved "infinite" value.
///
/// `saturating_add` must never wrap: sums that do not fit become
/// `INFINITY`, so an overflowed path never looks shorter than a real one.
pub trait Distance: Copy + PartialOrd + fmt::Debug {
    const ZERO: Self;
    const INFINITY: Self;
    fn saturating_add(self, rhs: Self) -> Self;
}

macro_rules! int_distance {
    ($($t:ty),*) => {$(
        impl Distance for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;
            #[inline(always)]
            fn saturating_add(self, rhs: Self) -> Self { <$t>::saturating_add(self, rhs) }
        }
    )*};
}
int_distance!(u8, u16, u32, u64, usize, i32, i64);

macro_rules! float_distance {
    ($($t:ty),*) => {$(
        impl Distance for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;
            // IEEE addition already saturates at +inf
            #[inline(always)]
            fn saturating_add(self, rhs: Self) -> Self { self + rhs }
        }
    )*};
}
float_distance!(f32, f64);

/// Per-vertex result record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Label<W> {
    pub predecessor: VertexDescriptor,
    pub distance: W,
}

impl<W: Distance> Default for Label<W> {
    fn default() -> Self { Label { predecessor: VertexDescriptor::NONE, distance: W::INFINITY } }
}

impl<W: Distance> Label<W> {
    #[inline]
    pub fn is_reached(&self) -> bool { self.distance < W::INFINITY }
}

/// `n` default labels, ready to hand to a run.
pub fn init_labels<W: Distance>(n: usize) -> Vec<Label<W>> { vec![Label::default(); n] }

/// Counters for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraStats {
    pub pushes: u64,
    pub pops: u64,
    pub decrease_keys: u64,
    /// Edge relaxations that improved a distance.
    pub relaxations: u64,
    pub settled: u64,
    pub max_heap_size: u64,
    pub stopped_early: bool,
}

#[derive(Copy, Clone, Debug)]
struct QueueEntry<W> {
    vertex: usize,
    distance: W,
}

/// Inverts the heap's "prefer larger" convention so the smallest distance
/// sits on top.
#[derive(Copy, Clone, Debug, Default)]
struct ByDistance;

impl<W: Distance> HeapOrder<QueueEntry<W>> for ByDistance {
    #[inline(always)]
    fn less(&self, a: &QueueEntry<W>, b: &QueueEntry<W>) -> bool { a.distance > b.distance }
}

#[derive(Copy, Clone, Debug)]
enum Seen {
    Undiscovered,
    Queued(Handle),
    Settled,
}

/// Reusable Dijkstra engine; `K` is the heap arity.
pub struct Dijkstra<W: Distance, const K: usize = 4> {
    heap: DaryHeap<QueueEntry<W>, ByDistance, K>,
    seen: Vec<Seen>,
    config: DijkstraConfig,
    last: DijkstraStats,
}

impl<W: Distance, const K: usize> Default for Dijkstra<W, K> {
    fn default() -> Self { Self::new() }
}

impl<W: Distance, const K: usize> Dijkstra<W, K> {
    pub fn new() -> Self { Self::with_config(DijkstraConfig::default()) }

    pub fn from_env() -> Self { Self::with_config(DijkstraConfig::from_env()) }

    pub fn with_config(config: DijkstraConfig) -> Self {
        Self { heap: DaryHeap::with_order(ByDistance), seen: Vec::new(), config, last: DijkstraStats::default() }
    }

    pub fn config(&self) -> &DijkstraConfig { &self.config }

    pub fn last_stats(&self) -> DijkstraStats { self.last }

    /// Full run from `start`. `weight` yields the non-negative weight of an
    /// edge; `labels` must hold one entry per vertex.
    pub fn run<G, F>(&mut self, graph: &G, start: VertexDescriptor, labels: &mut [Label<W>], weight: F) -> DijkstraStats
    where
        G: OutgoingEdges + ?Sized,
        F: FnMut(EdgeDescriptor) -> W,
    {
        self.run_until(graph, start, labels, weight, |_| false)
    }

    /// Like [`run`](Self::run), but `stop` is asked once per popped vertex
    /// before its edges are relaxed; returning `true` ends the run with the
    /// labels as they stand. Popped vertices carry final distances, vertices
    /// still queued carry their best distance so far.
    pub fn run_until<G, F, S>(
        &mut self,
        graph: &G,
        start: VertexDescriptor,
        labels: &mut [Label<W>],
        mut weight: F,
        mut stop: S,
    ) -> DijkstraStats
    where
        G: OutgoingEdges + ?Sized,
        F: FnMut(EdgeDescriptor) -> W,
        S: FnMut(VertexDescriptor) -> bool,
    {
        let n = graph.num_vertices();
        assert_eq!(labels.len(), n, "label slice holds {} entries for {} vertices", labels.len(), n);
        assert!(start.index() < n, "start vertex {} out of range for {} vertices", start.index(), n);

        self.heap.clear();
        self.heap.reserve(self.config.heap_reserve.min(n));
        self.seen.clear();
        self.seen.resize(n, Seen::Undiscovered);
        for (i, l) in labels.iter_mut().enumerate() {
            l.distance = W::INFINITY;
            l.predecessor = VertexDescriptor::new(i);
        }

        let mut stats = DijkstraStats::default();
        let s = start.index();
        labels[s].distance = W::ZERO;
        self.seen[s] = Seen::Queued(self.heap.push(QueueEntry { vertex: s, distance: W::ZERO }));
        stats.pushes = 1;
        stats.max_heap_size = 1;

        while let Some(QueueEntry { vertex: u, distance: du }) = self.heap.try_pop() {
            stats.pops += 1;
            stats.settled += 1;
            self.seen[u] = Seen::Settled;
            let uv = VertexDescriptor::new(u);
            if stop(uv) {
                stats.stopped_early = true;
                debug!("dijkstra: stop predicate hit at {} after {} pops", uv, stats.pops);
                break;
            }
            for e in graph.out_edges(uv) {
                let v = graph.target(e).index();
                let w = weight(e);
                debug_assert!(!(w < W::ZERO), "negative weight {:?} on {}", w, e);
                let candidate = du.saturating_add(w);
                if !(candidate < labels[v].distance) { continue; }
                let entry = QueueEntry { vertex: v, distance: candidate };
                match self.seen[v] {
                    Seen::Undiscovered => {
                        self.seen[v] = Seen::Queued(self.heap.push(entry));
                        stats.pushes += 1;
                        stats.max_heap_size = stats.max_heap_size.max(self.heap.len() as u64);
                    }
                    // priority only improved
                    Seen::Queued(h) => {
                        self.heap.sift_up(h, entry);
                        stats.decrease_keys += 1;
                    }
                    Seen::Settled => continue,
                }
                labels[v] = Label { predecessor: uv, distance: candidate };
                stats.relaxations += 1;
            }
        }

        trace!("dijkstra: n={} start={} {:?}", n, start, stats);
        if self.config.trace {
            eprintln!("[dijkstra] n={} start={} settled={} pushes={} decrease_keys={} relax={} max_heap={} stopped_early={}",
                n, s, stats.settled, stats.pushes, stats.decrease_keys, stats.relaxations, stats.max_heap_size, stats.stopped_early);
        }
        self.last = stats;
        stats
    }
}

/// One-shot run with configuration taken from the environment.
pub fn dijkstra<G, W, F>(graph: &G, start: VertexDescriptor, labels: &mut [Label<W>], weight: F) -> DijkstraStats
where
    G: OutgoingEdges + ?Sized,
    W: Distance,
    F: FnMut(EdgeDescriptor) -> W,
{
    Dijkstra::<W>::from_env().run(graph, start, labels, weight)
}

/// One-shot run that ends as soon as `stop` accepts a popped vertex.
pub fn dijkstra_until<G, W, F, S>(graph: &G, start: VertexDescriptor, labels: &mut [Label<W>], weight: F, stop: S) -> DijkstraStats
where
    G: OutgoingEdges + ?Sized,
    W: Distance,
    F: FnMut(EdgeDescriptor) -> W,
    S: FnMut(VertexDescriptor) -> bool,
{
    Dijkstra::<W>::from_env().run_until(graph, start, labels, weight, stop)
}

/// Weight function reading each edge's property.
pub fn edge_weights<W: Copy, VP, GP>(graph: &CsrGraph<W, VP, GP>) -> impl Fn(EdgeDescriptor) -> W + '_ {
    move |e| *graph.edge_property(e)
}

/// Vertices from the run's start to `target` along predecessors, or `None`
/// when `target` was not reached. A chain longer than the label count (only
/// possible with labels not produced by a run) also yields `None`.
pub fn shortest_path<W: Distance>(labels: &[Label<W>], target: VertexDescriptor) -> Option<Vec<VertexDescriptor>> {
    let label = labels.get(target.index())?;
    if !label.is_reached() { return None; }
    let mut path = vec![target];
    let mut cur = target;
    loop {
        let pred = labels.get(cur.index())?.predecessor;
        if pred == cur { break; }
        if pred.is_none() || path.len() > labels.len() { return None; }
        path.push(pred);
        cur = pred;
    }
    path.reverse();
    Some(path)
}
