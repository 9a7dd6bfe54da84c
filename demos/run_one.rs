use csr_sssp::gen::random_edges;
use csr_sssp::*;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 { eprintln!("usage: run_one <n> <avg_degree> <seed> [mode: engine|ffi] [target]"); std::process::exit(1); }
    let n: usize = args[1].parse().expect("n");
    let avg_degree: f32 = args[2].parse().expect("avg_degree");
    let seed: u64 = args[3].parse().expect("seed");
    let mode = args.get(4).map(String::as_str).unwrap_or("engine");
    let target: Option<usize> = args.get(5).and_then(|t| t.parse().ok());
    if n == 0 { eprintln!("n must be positive"); std::process::exit(1); }

    let edges = random_edges(n, avg_degree, seed, 1.0, 4.0);
    let graph = CsrGraph::from_triples(n, &edges);
    let m = graph.num_edges();

    match mode {
        "engine" => {
            let mut labels = init_labels::<f32>(n);
            let mut engine: Dijkstra<f32> = Dijkstra::from_env();
            let stats = match target {
                Some(t) if t < n => engine.run_until(&graph, VertexDescriptor::new(0), &mut labels, edge_weights(&graph), |u| u.index() == t),
                _ => engine.run(&graph, VertexDescriptor::new(0), &mut labels, edge_weights(&graph)),
            };
            let reached = labels.iter().filter(|l| l.is_reached()).count();
            let path = target.and_then(|t| shortest_path(&labels, VertexDescriptor::new(t)));
            let out = serde_json::json!({
                "mode": mode, "n": n, "m": m, "reached": reached,
                "config": engine.config(),
                "stats": stats,
                "path": path.map(|p| p.iter().map(|v| v.index()).collect::<Vec<_>>()),
            });
            println!("{}", serde_json::to_string(&out).unwrap());
        }
        "ffi" => {
            let offsets: Vec<u32> = graph.row_start().iter().map(|&o| o as u32).collect();
            let targets: Vec<u32> = graph.columns().iter().map(|&t| t as u32).collect();
            let weights: Vec<f32> = graph.edge_properties().to_vec();
            let mut dist = vec![0f32; n];
            let mut pred = vec![0i32; n];
            let mut info = CsrSsspRunInfo::default();
            let rc = unsafe { csr_sssp_run(n as u32, offsets.as_ptr(), targets.as_ptr(), weights.as_ptr(), 0, dist.as_mut_ptr(), pred.as_mut_ptr(), &mut info) };
            if rc != 0 {
                eprintln!("error {rc}");
                return;
            }
            println!("mode={mode} n={n} m={m} pushes={} pops={} decrease_keys={} relax={} settled={} version={}",
                info.pushes, info.pops, info.decrease_keys, info.relaxations, info.settled, csr_sssp_version());
        }
        _ => eprintln!("bad mode"),
    }
}
