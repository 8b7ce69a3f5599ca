//! Prim's minimum spanning tree over any [`PriorityQueue`]
//!
//! Grows a tree from a start vertex, always attaching the cheapest edge that
//! leaves the tree. On a disconnected graph the result spans only the start
//! vertex's component and reports `connected == false`.

use crate::graph::{Graph, GraphError, Weight, UNREACHABLE};
use crate::traits::PriorityQueue;
use log::{debug, trace};

/// Result of a Prim run
///
/// `connecting_weights[v]` is the weight of the tree edge joining `v` to its
/// predecessor (0 for the start vertex). Vertices the tree never reached keep
/// the [`UNREACHABLE`] sentinel and no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanningForest {
    pub root: usize,
    pub total_weight: Weight,
    pub predecessors: Vec<Option<usize>>,
    pub connecting_weights: Vec<Weight>,
    pub connected: bool,
}

impl SpanningForest {
    /// Tree edges as `(predecessor, vertex, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        self.predecessors
            .iter()
            .enumerate()
            .filter_map(|(v, pred)| pred.map(|p| (p, v, self.connecting_weights[v])))
    }

    /// Number of vertices in the tree, the start vertex included
    pub fn tree_size(&self) -> usize {
        self.connecting_weights
            .iter()
            .filter(|&&w| w < UNREACHABLE)
            .count()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.connecting_weights
            .get(vertex)
            .is_some_and(|&w| w < UNREACHABLE)
    }
}

/// Runs Prim's algorithm from `start` using `queue` as the frontier.
///
/// # Arguments
/// - `graph`: an undirected graph
/// - `start`: root of the tree
/// - `queue`: an empty queue; cleared again before returning, on error as well
///
/// # Errors
/// - [`GraphError::IndexOutOfRange`] if `start` is not a vertex
/// - [`GraphError::RequiresUndirectedGraph`] if `graph` is directed
/// - [`GraphError::QueueNotEmpty`] if `queue` already holds elements
/// - [`GraphError::Heap`] if the queue fails an operation
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::fibonacci::FibonacciHeap;
/// use rust_mergeable_heaps::graph::Graph;
/// use rust_mergeable_heaps::mst::prim_mst;
/// use rust_mergeable_heaps::PriorityQueue;
///
/// let graph = Graph::from_edges(3, false, [(0, 1, 2), (1, 2, 3), (0, 2, 9)]).unwrap();
/// let mut queue = FibonacciHeap::new();
///
/// let forest = prim_mst(&graph, 0, &mut queue).unwrap();
/// assert_eq!(forest.total_weight, 5);
/// assert!(forest.connected);
/// ```
pub fn prim_mst<Q>(
    graph: &Graph,
    start: usize,
    queue: &mut Q,
) -> Result<SpanningForest, GraphError>
where
    Q: PriorityQueue<Weight, usize>,
{
    graph.check_vertex(start)?;
    if graph.is_directed() {
        return Err(GraphError::RequiresUndirectedGraph);
    }
    if !queue.is_empty() {
        return Err(GraphError::QueueNotEmpty);
    }

    let n = graph.vertex_count();
    debug!("prim: {} vertices, {} edges, start {}", n, graph.edge_count(), start);

    let result = grow_tree(graph, start, queue);
    queue.clear();
    let forest = result?;

    debug!(
        "prim: tree of {} vertices, weight {}, connected {}, {:?}",
        forest.tree_size(),
        forest.total_weight,
        forest.connected,
        queue.stats()
    );
    Ok(forest)
}

fn grow_tree<Q>(graph: &Graph, start: usize, queue: &mut Q) -> Result<SpanningForest, GraphError>
where
    Q: PriorityQueue<Weight, usize>,
{
    let n = graph.vertex_count();
    let mut predecessors = vec![None; n];
    let mut connecting_weights = vec![UNREACHABLE; n];
    let mut in_tree = vec![false; n];
    let handles: Vec<Q::Handle> = graph
        .vertices()
        .map(|v| queue.insert(UNREACHABLE, v))
        .collect();

    connecting_weights[start] = 0;
    queue.decrease_key(&handles[start], 0)?;

    let mut total_weight: Weight = 0;
    let mut picked = 0usize;

    while !queue.is_empty() {
        let (ku, u) = queue.extract_min()?;
        if ku >= UNREACHABLE {
            trace!("prim: {} vertices not connected to start", queue.len() + 1);
            break;
        }
        if in_tree[u] {
            continue;
        }

        in_tree[u] = true;
        picked += 1;
        total_weight += ku;

        for edge in graph.neighbors(u)? {
            let v = edge.to;
            if !in_tree[v] && edge.weight < connecting_weights[v] {
                connecting_weights[v] = edge.weight;
                predecessors[v] = Some(u);
                queue.decrease_key(&handles[v], edge.weight)?;
            }
        }
    }

    Ok(SpanningForest {
        root: start,
        total_weight,
        predecessors,
        connecting_weights,
        connected: picked == n,
    })
}

/// Runs [`prim_mst`] on a freshly constructed queue of type `Q`
pub fn prim_mst_with<Q>(graph: &Graph, start: usize) -> Result<SpanningForest, GraphError>
where
    Q: PriorityQueue<Weight, usize>,
{
    let mut queue = Q::new();
    prim_mst(graph, start, &mut queue)
}
