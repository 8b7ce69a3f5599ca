//! Mergeable Heaps with Decrease-Key, and the Graph Algorithms that Use Them
//!
//! This crate provides two interchangeable priority queues with handle-based
//! `decrease_key`, and two classical graph algorithms written generically
//! against them.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert and meld; O(1) amortized decrease_key; O(log n) amortized extract_min
//! - **Pairing Heap**: O(1) insert and meld; o(log n) amortized decrease_key; O(log n) amortized extract_min
//! - **Dijkstra**: single-source shortest paths over non-negative weights
//! - **Prim**: minimum spanning tree, or spanning forest of the start component
//!
//! Both heaps store nodes in a generational arena, so a handle to an element
//! that has already been extracted is reported as
//! [`HeapError::InvalidHandle`] instead of touching freed memory.
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_heaps::fibonacci::FibonacciHeap;
//! use rust_mergeable_heaps::pairing::PairingHeap;
//! use rust_mergeable_heaps::graph::Graph;
//! use rust_mergeable_heaps::shortest_path::dijkstra_with;
//! use rust_mergeable_heaps::PriorityQueue;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Ok((&1, &"item1")));
//!
//! let graph = Graph::from_edges(3, true, [(0, 1, 2), (1, 2, 2), (0, 2, 5)]).unwrap();
//! let fib = dijkstra_with::<FibonacciHeap<_, _>>(&graph, 0).unwrap();
//! let pairing = dijkstra_with::<PairingHeap<_, _>>(&graph, 0).unwrap();
//! assert_eq!(fib.distances, pairing.distances);
//! ```

pub mod fibonacci;
pub mod graph;
pub mod mst;
pub mod pairing;
pub mod shortest_path;
pub mod stats;
pub mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use graph::{Graph, GraphError, MAX_WEIGHT, UNREACHABLE};
pub use stats::OpStats;
pub use traits::{Handle, HeapError, MergeableQueue, PriorityQueue};
