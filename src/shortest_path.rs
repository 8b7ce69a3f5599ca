//! Dijkstra's single-source shortest paths over any [`PriorityQueue`]
//!
//! The algorithm is written once against the queue trait; the caller chooses
//! the heap by passing an empty queue in. Every vertex is inserted exactly once
//! with the [`UNREACHABLE`] sentinel and then lowered through `decrease_key`,
//! so the queue never holds duplicate entries for a vertex.
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_heaps::graph::Graph;
//! use rust_mergeable_heaps::pairing::PairingHeap;
//! use rust_mergeable_heaps::shortest_path::dijkstra;
//! use rust_mergeable_heaps::PriorityQueue;
//!
//! let graph = Graph::from_edges(3, true, [(0, 1, 4), (0, 2, 1), (2, 1, 2)]).unwrap();
//! let mut queue = PairingHeap::new();
//!
//! let paths = dijkstra(&graph, 0, &mut queue).unwrap();
//! assert_eq!(paths.distance(1), Some(3));
//! assert_eq!(paths.path_to(1), Some(vec![0, 2, 1]));
//! ```

use crate::graph::{Graph, GraphError, Weight, UNREACHABLE};
use crate::traits::PriorityQueue;
use log::{debug, trace};

/// Path length type; the same integer type as edge weights
pub type Distance = Weight;

/// Result of a shortest-path run
///
/// Unreachable vertices keep the [`UNREACHABLE`] distance and no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPaths {
    pub source: usize,
    pub distances: Vec<Distance>,
    pub predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Shortest distance to `vertex`, or `None` if it is unreachable or not a vertex
    pub fn distance(&self, vertex: usize) -> Option<Distance> {
        self.distances
            .get(vertex)
            .copied()
            .filter(|&d| d < UNREACHABLE)
    }

    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Number of vertices reachable from the source, the source included
    pub fn reached_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d < UNREACHABLE).count()
    }

    /// Vertices on a shortest path from the source to `target`, both inclusive
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessors[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `source` using `queue` as the frontier.
///
/// # Type Parameters
/// - `Q`: any [`PriorityQueue`] keyed by distance carrying vertex indices
///
/// # Arguments
/// - `graph`: the graph; weights are non-negative by construction
/// - `source`: start vertex
/// - `queue`: an empty queue. It is cleared again before returning, on error
///   as well, so its operation counters can be inspected afterwards.
///
/// # Errors
/// - [`GraphError::IndexOutOfRange`] if `source` is not a vertex
/// - [`GraphError::QueueNotEmpty`] if `queue` already holds elements
/// - [`GraphError::Heap`] if the queue fails an operation
pub fn dijkstra<Q>(
    graph: &Graph,
    source: usize,
    queue: &mut Q,
) -> Result<ShortestPaths, GraphError>
where
    Q: PriorityQueue<Distance, usize>,
{
    graph.check_vertex(source)?;
    if !queue.is_empty() {
        return Err(GraphError::QueueNotEmpty);
    }

    let n = graph.vertex_count();
    debug!("dijkstra: {} vertices, {} edges, source {}", n, graph.edge_count(), source);

    let result = relax_from(graph, source, queue);
    queue.clear();
    let paths = result?;

    debug!(
        "dijkstra: reached {} of {} vertices, {:?}",
        paths.reached_count(),
        n,
        queue.stats()
    );
    Ok(paths)
}

fn relax_from<Q>(graph: &Graph, source: usize, queue: &mut Q) -> Result<ShortestPaths, GraphError>
where
    Q: PriorityQueue<Distance, usize>,
{
    let n = graph.vertex_count();
    let mut distances = vec![UNREACHABLE; n];
    let mut predecessors = vec![None; n];
    let handles: Vec<Q::Handle> = graph
        .vertices()
        .map(|v| queue.insert(UNREACHABLE, v))
        .collect();

    distances[source] = 0;
    queue.decrease_key(&handles[source], 0)?;

    while !queue.is_empty() {
        let (du, u) = queue.extract_min()?;
        if du >= UNREACHABLE {
            trace!("dijkstra: {} vertices unreachable", queue.len() + 1);
            break;
        }

        for edge in graph.neighbors(u)? {
            let candidate = du.saturating_add(edge.weight);
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(u);
                queue.decrease_key(&handles[edge.to], candidate)?;
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

/// Runs [`dijkstra`] on a freshly constructed queue of type `Q`
///
/// ```rust
/// use rust_mergeable_heaps::fibonacci::FibonacciHeap;
/// use rust_mergeable_heaps::graph::Graph;
/// use rust_mergeable_heaps::shortest_path::dijkstra_with;
///
/// let graph = Graph::from_edges(2, true, [(0, 1, 9)]).unwrap();
/// let paths = dijkstra_with::<FibonacciHeap<_, _>>(&graph, 0).unwrap();
/// assert_eq!(paths.distances, vec![0, 9]);
/// ```
pub fn dijkstra_with<Q>(graph: &Graph, source: usize) -> Result<ShortestPaths, GraphError>
where
    Q: PriorityQueue<Distance, usize>,
{
    let mut queue = Q::new();
    dijkstra(graph, source, &mut queue)
}
