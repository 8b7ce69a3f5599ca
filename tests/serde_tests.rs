//! Serialization of graphs and algorithm results (`--features serde`)
#![cfg(feature = "serde")]

use rust_mergeable_heaps::fibonacci::FibonacciHeap;
use rust_mergeable_heaps::graph::Graph;
use rust_mergeable_heaps::mst::{prim_mst_with, SpanningForest};
use rust_mergeable_heaps::shortest_path::dijkstra_with;
use rust_mergeable_heaps::{OpStats, PriorityQueue, MAX_WEIGHT};
use serde_json::json;

fn parse(value: serde_json::Value) -> Result<Graph, String> {
    serde_json::from_value(value).map_err(|e| e.to_string())
}

#[test]
fn test_graph_survives_json() {
    let graph = Graph::from_edges(4, false, [(0, 1, 3), (1, 2, 1), (2, 3, 4), (0, 3, 9)]).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let back: Graph = serde_json::from_str(&json).unwrap();

    assert_eq!(back, graph);
    assert_eq!(
        dijkstra_with::<FibonacciHeap<_, _>>(&back, 0).unwrap(),
        dijkstra_with::<FibonacciHeap<_, _>>(&graph, 0).unwrap()
    );
}

#[test]
fn test_undirected_self_loop_survives_json() {
    let graph = Graph::from_edges(3, false, [(2, 0, 4), (1, 1, 6), (0, 1, 1)]).unwrap();
    let back: Graph = serde_json::from_str(&serde_json::to_string(&graph).unwrap()).unwrap();
    assert_eq!(back, graph);
    assert_eq!(back.edge_count(), 3);
}

#[test]
fn test_deserialized_graph_is_validated() {
    let bad_target = json!({
        "directed": true,
        "adjacency": [[{ "to": 7, "weight": 3 }]]
    });
    let err = parse(bad_target).unwrap_err();
    assert!(err.contains("vertex 7 is out of range"), "{err}");

    let negative = json!({
        "directed": true,
        "adjacency": [[{ "to": 0, "weight": -3 }]]
    });
    assert!(parse(negative).unwrap_err().contains("negative weight -3"));

    let too_large = json!({
        "directed": true,
        "adjacency": [[], [{ "to": 0, "weight": MAX_WEIGHT + 1 }]]
    });
    assert!(parse(too_large).unwrap_err().contains("above the maximum"));

    let one_sided = json!({
        "directed": false,
        "adjacency": [[{ "to": 1, "weight": 2 }], []]
    });
    assert!(parse(one_sided).unwrap_err().contains("without its mirror"));

    let unpaired_loop = json!({
        "directed": false,
        "adjacency": [[{ "to": 0, "weight": 2 }]]
    });
    assert!(parse(unpaired_loop).is_err());
}

#[test]
fn test_valid_json_graph_runs() {
    let value = json!({
        "directed": false,
        "adjacency": [[{ "to": 1, "weight": 5 }], [{ "to": 0, "weight": 5 }]]
    });
    let graph = parse(value).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(prim_mst_with::<FibonacciHeap<_, _>>(&graph, 1).unwrap().total_weight, 5);
}

#[test]
fn test_results_and_stats_serialize() {
    let graph = Graph::from_edges(3, false, [(0, 1, 2), (1, 2, 2)]).unwrap();
    let forest = prim_mst_with::<FibonacciHeap<_, _>>(&graph, 0).unwrap();
    let json = serde_json::to_string(&forest).unwrap();
    let back: SpanningForest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, forest);

    let mut heap = FibonacciHeap::new();
    heap.insert(1, ());
    heap.extract_min().unwrap();
    let value = serde_json::to_value(heap.stats()).unwrap();
    assert_eq!(value["inserts"], 1);
    assert_eq!(value["extractions"], 1);
    let stats: OpStats = serde_json::from_value(value).unwrap();
    assert_eq!(stats, heap.stats());
}
