//! Weighted adjacency-list graph consumed by the algorithms
//!
//! Vertices are dense indices in `0..vertex_count`. Edge weights are integers
//! in `0..=MAX_WEIGHT`; both properties are checked when edges are added (and
//! when a graph is deserialized), so the algorithms can rely on them without
//! re-validating.

use crate::traits::HeapError;
#[cfg(feature = "serde")]
use std::cmp::Ordering;
use std::ops::Range;
use thiserror::Error;

/// Edge weight type
pub type Weight = i64;

/// Largest accepted edge weight
///
/// Path lengths and tree weights are sums of at most `vertex_count - 1` edges,
/// so with this bound they stay far below [`UNREACHABLE`] for any graph that
/// fits in memory.
pub const MAX_WEIGHT: Weight = i32::MAX as Weight;

/// Sentinel key for "not reached yet"
///
/// A quarter of the representable range, so adding any edge weight to a real
/// distance can never wrap around past it.
pub const UNREACHABLE: Weight = Weight::MAX / 4;

/// Errors raised by graph construction and by the graph algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    IndexOutOfRange { vertex: usize, vertex_count: usize },
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeightRejected { from: usize, to: usize, weight: Weight },
    #[error(
        "edge {from} -> {to} has weight {weight}, above the maximum of {max}",
        max = MAX_WEIGHT
    )]
    WeightTooLarge { from: usize, to: usize, weight: Weight },
    #[error("undirected graph has an edge without its mirror")]
    AsymmetricAdjacency,
    #[error("minimum spanning tree requires an undirected graph")]
    RequiresUndirectedGraph,
    #[error("the priority queue passed to the algorithm must be empty")]
    QueueNotEmpty,
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Outgoing edge stored in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: usize,
    pub weight: Weight,
}

/// Directed or undirected weighted graph
///
/// An undirected edge is stored in both endpoints' adjacency lists.
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::graph::Graph;
///
/// let mut graph = Graph::undirected(3);
/// graph.add_edge(0, 1, 4).unwrap();
/// graph.add_edge(1, 2, 1).unwrap();
///
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbors(1).unwrap().len(), 2);
/// assert!(graph.add_edge(0, 3, 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GraphRepr", into = "GraphRepr")
)]
pub struct Graph {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Graph {
            directed,
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    pub fn directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true)
    }

    pub fn undirected(vertex_count: usize) -> Self {
        Self::new(vertex_count, false)
    }

    /// Builds a graph from `(from, to, weight)` triples, validating each edge
    pub fn from_edges<I>(
        vertex_count: usize,
        directed: bool,
        edges: I,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, Weight)>,
    {
        let mut graph = Self::new(vertex_count, directed);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Adds an edge `from -> to` (and `to -> from` if undirected)
    ///
    /// # Errors
    /// - [`GraphError::IndexOutOfRange`] if either endpoint is not a vertex
    /// - [`GraphError::NegativeWeightRejected`] if `weight < 0`
    /// - [`GraphError::WeightTooLarge`] if `weight > MAX_WEIGHT`
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Weight) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        check_weight(from, to, weight)?;

        self.adjacency[from].push(Edge { to, weight });
        if !self.directed {
            self.adjacency[to].push(Edge { to: from, weight });
        }
        self.edge_count += 1;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges added; an undirected edge counts once
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertices(&self) -> Range<usize> {
        0..self.vertex_count()
    }

    /// Outgoing edges of `vertex`
    pub fn neighbors(&self, vertex: usize) -> Result<&[Edge], GraphError> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    pub fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

fn check_weight(from: usize, to: usize, weight: Weight) -> Result<(), GraphError> {
    if weight < 0 {
        Err(GraphError::NegativeWeightRejected { from, to, weight })
    } else if weight > MAX_WEIGHT {
        Err(GraphError::WeightTooLarge { from, to, weight })
    } else {
        Ok(())
    }
}

/// Wire form of a [`Graph`]; deserialized input is re-validated before use
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GraphRepr {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

#[cfg(feature = "serde")]
impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        GraphRepr {
            directed: graph.directed,
            adjacency: graph.adjacency,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GraphRepr> for Graph {
    type Error = GraphError;

    fn try_from(repr: GraphRepr) -> Result<Self, GraphError> {
        let mut graph = Graph {
            directed: repr.directed,
            adjacency: repr.adjacency,
            edge_count: 0,
        };

        // Undirected edges as (low, high, weight), seen from each endpoint
        let mut forward = Vec::new();
        let mut backward = Vec::new();
        let mut loops = Vec::new();
        let mut entries = 0usize;

        for (from, list) in graph.adjacency.iter().enumerate() {
            for edge in list {
                graph.check_vertex(edge.to)?;
                check_weight(from, edge.to, edge.weight)?;
                entries += 1;
                if graph.directed {
                    continue;
                }
                match from.cmp(&edge.to) {
                    Ordering::Less => forward.push((from, edge.to, edge.weight)),
                    Ordering::Greater => backward.push((edge.to, from, edge.weight)),
                    Ordering::Equal => loops.push((from, edge.weight)),
                }
            }
        }

        if !graph.directed {
            forward.sort_unstable();
            backward.sort_unstable();
            loops.sort_unstable();
            // An undirected self-loop is stored twice in its own list
            let unpaired_loop = loops.chunks(2).any(|pair| pair.len() != 2 || pair[0] != pair[1]);
            if forward != backward || unpaired_loop {
                return Err(GraphError::AsymmetricAdjacency);
            }
        }

        graph.edge_count = if graph.directed { entries } else { entries / 2 };
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_edges_are_one_way() {
        let mut graph = Graph::directed(3);
        graph.add_edge(0, 1, 5).unwrap();

        assert_eq!(graph.neighbors(0).unwrap(), &[Edge { to: 1, weight: 5 }]);
        assert!(graph.neighbors(1).unwrap().is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_undirected_edges_are_mirrored() {
        let mut graph = Graph::undirected(2);
        graph.add_edge(0, 1, 7).unwrap();

        assert_eq!(graph.neighbors(0).unwrap(), &[Edge { to: 1, weight: 7 }]);
        assert_eq!(graph.neighbors(1).unwrap(), &[Edge { to: 0, weight: 7 }]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_vertex() {
        let mut graph = Graph::directed(2);
        assert_eq!(
            graph.add_edge(0, 2, 1),
            Err(GraphError::IndexOutOfRange {
                vertex: 2,
                vertex_count: 2
            })
        );
        assert!(graph.neighbors(5).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = Graph::undirected(2);
        assert_eq!(
            graph.add_edge(0, 1, -3),
            Err(GraphError::NegativeWeightRejected {
                from: 0,
                to: 1,
                weight: -3
            })
        );
        assert!(graph.neighbors(0).unwrap().is_empty());
    }

    #[test]
    fn test_weight_bound() {
        let mut graph = Graph::directed(2);
        graph.add_edge(0, 1, MAX_WEIGHT).unwrap();
        assert_eq!(
            graph.add_edge(1, 0, MAX_WEIGHT + 1),
            Err(GraphError::WeightTooLarge {
                from: 1,
                to: 0,
                weight: MAX_WEIGHT + 1
            })
        );
        assert!(matches!(
            graph.add_edge(0, 1, UNREACHABLE),
            Err(GraphError::WeightTooLarge { .. })
        ));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.neighbors(1).unwrap().is_empty());
    }

    #[test]
    fn test_from_edges_stops_at_first_error() {
        let result = Graph::from_edges(3, true, [(0, 1, 1), (1, 3, 1)]);
        assert!(matches!(result, Err(GraphError::IndexOutOfRange { vertex: 3, .. })));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::undirected(0);
        assert_eq!(graph.vertex_count(), 0);
        assert!(graph.vertices().is_empty());
        assert!(graph.check_vertex(0).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = GraphError::from(HeapError::EmptyQueue);
        assert_eq!(err.to_string(), "priority queue is empty");
        assert_eq!(
            GraphError::RequiresUndirectedGraph.to_string(),
            "minimum spanning tree requires an undirected graph"
        );
        let too_large = GraphError::WeightTooLarge {
            from: 0,
            to: 1,
            weight: MAX_WEIGHT + 1,
        };
        assert_eq!(
            too_large.to_string(),
            "edge 0 -> 1 has weight 2147483648, above the maximum of 2147483647"
        );
    }
}
