use std::collections::HashMap;

use csr_sssp::gen::{random_int_edges, sorted_by_source};
use csr_sssp::{BidirectionalCsrGraph, CsrGraph, EdgeDescriptor, GraphError, VertexDescriptor};

fn v(i: usize) -> VertexDescriptor { VertexDescriptor::new(i) }

// (target, property) multiset per source, independent of bucket order
fn adjacency<EP: Clone + Ord>(g: &CsrGraph<EP>) -> Vec<Vec<(usize, EP)>> {
    g.vertices()
        .map(|u| {
            let mut out: Vec<(usize, EP)> = g.out_edges(u).map(|e| (g.target(e).index(), g.edge_property(e).clone())).collect();
            out.sort();
            out
        })
        .collect()
}

#[test]
fn vertex_count_only_graph_is_empty(){
    let g: CsrGraph = CsrGraph::new(5);
    assert_eq!(g.num_vertices(), 5);
    assert_eq!(g.num_edges(), 0);
    assert_eq!(g.row_start(), &[0, 0, 0, 0, 0, 0]);
    assert!(g.vertices().all(|u| g.out_degree(u) == 0));
    assert_eq!(g.edges().count(), 0);
}

#[test]
fn sorted_and_unsorted_builds_agree(){
    for seed in 0..6u64 {
        let n = 120;
        let edges = random_int_edges(n, 5.0, seed, 1, 9);
        let sorted = sorted_by_source(&edges);
        let a = CsrGraph::from_triples(n, &edges);
        let b = CsrGraph::from_sorted_edges(n, &sorted, sorted.iter().map(|e| e.2).collect());
        assert_eq!(a.num_edges(), b.num_edges());
        assert_eq!(a.row_start(), b.row_start());
        for u in a.vertices() { assert_eq!(a.out_degree(u), b.out_degree(u)); }
        assert_eq!(adjacency(&a), adjacency(&b));
        // counting sort is stable, so the stable pre-sort yields the identical layout
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.edge_properties(), b.edge_properties());
    }
}

#[test]
fn edge_enumeration_is_ascending_and_consistent(){
    let edges = [(2usize, 0usize, 'a'), (0, 1, 'b'), (2, 1, 'c'), (0, 2, 'd'), (3, 3, 'e')];
    let g = CsrGraph::from_triples(4, &edges);
    let all: Vec<EdgeDescriptor> = g.edges().collect();
    assert_eq!(all.len(), 5);
    for (i, e) in all.iter().enumerate() {
        assert_eq!(e.position(), i);
        assert_eq!(*e, g.edge(i));
        assert_eq!(e.source(), g.edge(i).source());
        assert!(g.out_edges(e.source()).any(|o| o == *e));
    }
    let props: Vec<char> = all.iter().map(|&e| *g.edge_property(e)).collect();
    assert_eq!(props, vec!['b', 'd', 'a', 'c', 'e']);
    assert_eq!(g.endpoints(all[2]), (v(2), v(0)));
    assert_eq!(g.opposite(all[2], v(0)), v(2));
    assert_eq!(g.opposite(all[2], v(2)), v(0));
    // self-loop
    assert_eq!(g.endpoints(all[4]), (v(3), v(3)));
}

#[test]
fn edges_between_filters_parallel_edges(){
    let edges = [(0usize, 1usize, 5u32), (0, 2, 6), (0, 1, 7), (1, 0, 8)];
    let g = CsrGraph::from_triples(3, &edges);
    let between: Vec<u32> = g.edges_between(v(0), v(1)).map(|e| *g.edge_property(e)).collect();
    assert_eq!(between, vec![5, 7]);
    assert!(g.has_edge(v(1), v(0)));
    assert!(!g.has_edge(v(2), v(0)));
    assert_eq!(g.edges_between(v(2), v(1)).count(), 0);
}

#[test]
fn properties_are_addressed_by_descriptor(){
    let edges = [(0usize, 1usize), (1, 2)];
    let mut g = CsrGraph::from_sorted_edges(3, &edges, vec![1.5f64, 2.5])
        .with_vertex_properties(vec!["a", "b", "c"])
        .with_graph_property(String::from("demo"));
    let e = g.edge(1);
    *g.edge_property_mut(e) *= 2.0;
    assert_eq!(*g.edge_property(e), 5.0);
    assert_eq!(*g.vertex_property(v(2)), "c");
    *g.vertex_property_mut(v(0)) = "z";
    assert_eq!(g.vertex_properties().as_slice(), &["z", "b", "c"]);
    g.graph_property_mut().push('!');
    assert_eq!(g.graph_property(), "demo!");
}

#[test]
fn construction_preconditions_surface_as_errors(){
    let r = CsrGraph::try_from_edges(2, &[(0usize, 2usize)], vec![()]);
    assert_eq!(r.err(), Some(GraphError::VertexOutOfRange { index: 2, num_vertices: 2 }));
    let r = CsrGraph::try_from_edges(3, &[(0usize, 1usize), (1, 2)], vec![1u8]);
    assert!(matches!(r, Err(GraphError::PropertyLengthMismatch { expected: 2, actual: 1, .. })));
    let r = CsrGraph::try_from_sorted_edges(3, &[(2usize, 1usize), (1, 2)], vec![(), ()]);
    assert_eq!(r.err(), Some(GraphError::UnsortedEdges { position: 1 }));
    let g: CsrGraph = CsrGraph::new(2);
    assert!(g.try_with_vertex_properties(vec![0u8; 3]).is_err());
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_vertex_panics(){
    let g: CsrGraph = CsrGraph::new(3);
    g.out_degree(v(3));
}

#[test]
#[should_panic(expected = "edge properties")]
fn mismatched_properties_panic(){
    CsrGraph::from_edges(2, &[(0usize, 1usize)], Vec::<u32>::new());
}

#[test]
fn in_edges_mirror_every_forward_edge(){
    let n = 80;
    let edges = random_int_edges(n, 4.0, 99, 0, 1000);
    let g = BidirectionalCsrGraph::from_triples(n, &edges);

    let mut seen_in = 0;
    for t in g.vertices() {
        assert_eq!(g.in_degree(t), g.in_edges(t).count());
        for e in g.in_edges(t) {
            assert_eq!(g.target(e), t);
            assert!(g.out_edges(e.source()).any(|o| o == e));
            seen_in += 1;
        }
    }
    assert_eq!(seen_in, g.num_edges());

    // each forward edge shows up exactly once among its target's in-edges, with its payload
    for e in g.edges() {
        let t = g.target(e);
        let hits: Vec<EdgeDescriptor> = g.in_edges(t).filter(|i| *i == e).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source(), e.source());
        assert_eq!(g.edge_property(hits[0]), g.edge_property(e));
    }

    // per-vertex in-degree matches a direct count of the input
    let mut expected: HashMap<usize, usize> = HashMap::new();
    for &(_, t, _) in &edges { *expected.entry(t).or_default() += 1; }
    for t in 0..n { assert_eq!(g.in_degree(v(t)), expected.get(&t).copied().unwrap_or(0)); }
}

#[test]
fn bidirectional_graph_keeps_properties_writable(){
    let mut g = BidirectionalCsrGraph::from_edges(3, &[(0usize, 2usize), (1, 2)], vec![10u32, 20])
        .with_vertex_properties(vec![0u8; 3]);
    let incoming: Vec<EdgeDescriptor> = g.in_edges(v(2)).collect();
    *g.edge_property_mut(incoming[1]) += 1;
    *g.vertex_property_mut(v(1)) = 7;
    let sources: Vec<usize> = g.in_edges(v(2)).map(|e| e.source_index()).collect();
    assert_eq!(sources, vec![0, 1]);
    assert_eq!(*g.edge_property(g.edge(1)), 21);
    assert_eq!(*g.vertex_property(v(1)), 7);
    assert_eq!(g.in_degree(v(0)), 0);
    assert_eq!(g.backward().num_edges(), 2);
}
