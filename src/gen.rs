//! Seeded random edge lists for tests, demos and benches.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// `n * avg_degree` edges with uniformly random endpoints (self-loops
/// skipped) and weights drawn from `[w_min, w_max)`. Output is in
/// generation order, i.e. not grouped by source.
pub fn random_edges(n: usize, avg_degree: f32, seed: u64, w_min: f32, w_max: f32) -> Vec<(usize, usize, f32)> {
    assert!(n >= 2, "need at least two vertices");
    assert!(w_min < w_max, "empty weight range");
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f32 * avg_degree) as usize;
    let mut edges = Vec::with_capacity(m_est);
    for _ in 0..m_est {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v { continue; }
        edges.push((u, v, rng.gen_range(w_min..w_max)));
    }
    edges
}

/// Integer-weighted variant; weights in `[w_min, w_max]`.
pub fn random_int_edges(n: usize, avg_degree: f32, seed: u64, w_min: u64, w_max: u64) -> Vec<(usize, usize, u64)> {
    assert!(n >= 2, "need at least two vertices");
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f32 * avg_degree) as usize;
    let mut edges = Vec::with_capacity(m_est);
    for _ in 0..m_est {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v { continue; }
        edges.push((u, v, rng.gen_range(w_min..=w_max)));
    }
    edges
}

/// Stable sort by source, the precondition of the single-pass builder.
pub fn sorted_by_source<P: Clone>(edges: &[(usize, usize, P)]) -> Vec<(usize, usize, P)> {
    let mut out = edges.to_vec();
    out.sort_by_key(|e| e.0);
    out
}

/// `0 -> 1 -> ... -> n-1`, all weights `w`.
pub fn path_edges<P: Clone>(n: usize, w: P) -> Vec<(usize, usize, P)> {
    (1..n).map(|v| (v - 1, v, w.clone())).collect()
}
