//! Stress tests that push the heaps and algorithms with large workloads
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rust_mergeable_heaps::fibonacci::FibonacciHeap;
use rust_mergeable_heaps::graph::Graph;
use rust_mergeable_heaps::mst::prim_mst_with;
use rust_mergeable_heaps::pairing::PairingHeap;
use rust_mergeable_heaps::shortest_path::dijkstra_with;
use rust_mergeable_heaps::{MergeableQueue, PriorityQueue};

/// Insert then drain a large ascending run
fn test_massive_operations<H: PriorityQueue<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..100_000 {
        heap.insert(i, i);
    }
    assert_eq!(heap.len(), 100_000);

    for i in 0..100_000 {
        assert_eq!(heap.extract_min(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

/// Decrease every key once, in an order that forces many cuts
fn test_many_decrease_keys<H: PriorityQueue<i32, i32>>() {
    let mut heap = H::new();
    let handles: Vec<_> = (0..10_000).map(|i| heap.insert(i + 10_000, i)).collect();
    heap.extract_min().unwrap();

    for (i, handle) in handles.iter().enumerate().skip(1).rev() {
        heap.decrease_key(handle, i as i32 - 10_000).unwrap();
    }
    assert_eq!(heap.stats().decrease_keys, 9_999);

    let mut previous = i32::MIN;
    while let Ok((key, _)) = heap.extract_min() {
        assert!(key >= previous);
        previous = key;
    }
}

/// Alternate inserts and extractions so trees keep being rebuilt
fn test_alternating_ops<H: PriorityQueue<i32, i32>>() {
    let mut heap = H::new();
    let mut extracted = 0usize;

    for round in 0..1_000 {
        for j in 0..10 {
            heap.insert((round * 7 + j * 13) % 1_000, j);
        }
        for _ in 0..5 {
            heap.extract_min().unwrap();
            extracted += 1;
        }
    }
    assert_eq!(heap.len(), 10_000 - extracted);
}

/// Meld many small heaps into one
fn test_large_merge<H: MergeableQueue<i32, i32>>() {
    let mut total = H::new();
    for chunk in 0..100 {
        let mut part = H::new();
        for i in 0..100 {
            part.insert(chunk * 100 + i, i);
        }
        part.extract_min().unwrap();
        total.meld(part);
    }
    assert_eq!(total.len(), 9_900);

    let mut previous = i32::MIN;
    while let Ok((key, _)) = total.extract_min() {
        assert!(key > previous);
        assert_ne!(key % 100, 0);
        previous = key;
    }
}

/// Long descending chain; teardown must not recurse
fn test_deep_structure_drop<H: PriorityQueue<i32, i32>>() {
    let mut heap = H::new();
    for i in (0..200_000).rev() {
        heap.insert(i, i);
    }
    heap.extract_min().unwrap();
    drop(heap);
}

/// Grid graph with a few hundred thousand decrease-key opportunities
fn grid(side: usize, directed: bool) -> Graph {
    let mut graph = Graph::new(side * side, directed);
    for r in 0..side {
        for c in 0..side {
            let v = r * side + c;
            let w = ((r * 31 + c * 17) % 9 + 1) as i64;
            if c + 1 < side {
                graph.add_edge(v, v + 1, w).unwrap();
            }
            if r + 1 < side {
                graph.add_edge(v, v + side, w + 1).unwrap();
            }
        }
    }
    graph
}

#[test]
fn test_fibonacci_massive() {
    test_massive_operations::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_many_decrease_keys() {
    test_many_decrease_keys::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_alternating() {
    test_alternating_ops::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_large_merge() {
    test_large_merge::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_deep_drop() {
    test_deep_structure_drop::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_pairing_massive() {
    test_massive_operations::<PairingHeap<i32, i32>>();
}

#[test]
fn test_pairing_many_decrease_keys() {
    test_many_decrease_keys::<PairingHeap<i32, i32>>();
}

#[test]
fn test_pairing_alternating() {
    test_alternating_ops::<PairingHeap<i32, i32>>();
}

#[test]
fn test_pairing_large_merge() {
    test_large_merge::<PairingHeap<i32, i32>>();
}

#[test]
fn test_pairing_deep_drop() {
    test_deep_structure_drop::<PairingHeap<i32, i32>>();
}

#[test]
fn test_large_grid_algorithms_agree() {
    let directed = grid(150, true);
    let fib = dijkstra_with::<FibonacciHeap<_, _>>(&directed, 0).unwrap();
    let pairing = dijkstra_with::<PairingHeap<_, _>>(&directed, 0).unwrap();
    assert_eq!(fib.distances, pairing.distances);
    assert_eq!(fib.reached_count(), 150 * 150);

    let undirected = grid(150, false);
    let fib = prim_mst_with::<FibonacciHeap<_, _>>(&undirected, 0).unwrap();
    let pairing = prim_mst_with::<PairingHeap<_, _>>(&undirected, 0).unwrap();
    assert!(fib.connected);
    assert_eq!(fib.total_weight, pairing.total_weight);
    assert_eq!(fib.tree_size(), 150 * 150);
}
