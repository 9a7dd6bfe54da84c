use std::fs::File;
use std::io::Write;
use std::time::Instant;

use csr_sssp::gen::random_edges;
use csr_sssp::{edge_weights, init_labels, CsrGraph, Dijkstra, DijkstraStats, VertexDescriptor};

fn time_arity<const K: usize>(graph: &CsrGraph<f32>, reps: usize) -> (f64, DijkstraStats, Vec<f32>) {
    let n = graph.num_vertices();
    let mut engine: Dijkstra<f32, K> = Dijkstra::from_env();
    let mut labels = init_labels::<f32>(n);
    let mut stats = DijkstraStats::default();
    let t0 = Instant::now();
    for _ in 0..reps { stats = engine.run(graph, VertexDescriptor::new(0), &mut labels, edge_weights(graph)); }
    let ms = t0.elapsed().as_secs_f64() * 1000.0 / reps.max(1) as f64;
    (ms, stats, labels.iter().map(|l| l.distance).collect())
}

fn run_one(n: usize, avg_degree: f32, seed: u64, reps: usize) -> serde_json::Value {
    let edges = random_edges(n, avg_degree, seed, 1.0, 5.0);
    let t0 = Instant::now();
    let graph = CsrGraph::from_triples(n, &edges);
    let build_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let (ms2, st2, d2) = time_arity::<2>(&graph, reps);
    let (ms4, st4, d4) = time_arity::<4>(&graph, reps);
    let (ms8, st8, d8) = time_arity::<8>(&graph, reps);
    for i in 0..n {
        for (k, d) in [(4, &d4), (8, &d8)] {
            if d2[i].is_infinite() && d[i].is_infinite() { continue; }
            assert!((d2[i] - d[i]).abs() < 1e-4, "arity {} parity fail at {}", k, i);
        }
    }
    serde_json::json!({
        "n": n, "m": graph.num_edges(), "avg_degree": avg_degree, "build_ms": build_ms,
        "k2_ms": ms2, "k4_ms": ms4, "k8_ms": ms8,
        "k4_speedup": ms2 / ms4.max(1e-9),
        "k8_speedup": ms2 / ms8.max(1e-9),
        "stats_k2": st2, "stats_k4": st4, "stats_k8": st8,
    })
}

fn main(){
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_arity --sizes 10000,100000 --degrees 2,4,8 --seed 42 --reps 3 --out benchmarks/arity.json"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<usize> = arg("--sizes").unwrap_or_else(|| "10000,100000".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f32> = arg("--degrees").unwrap_or_else(|| "4".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let reps: usize = arg("--reps").and_then(|v| v.parse().ok()).unwrap_or(3);
    let out_path = arg("--out").unwrap_or_else(|| "benchmarks/arity.json".into());

    let mut results = Vec::new();
    for &n in &sizes { for &deg in &degrees { if n > 0 { results.push(run_one(n, deg, seed, reps)); } } }
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).unwrap().as_bytes()).unwrap();
    eprintln!("wrote {}", out_path);
}
