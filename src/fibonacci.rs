//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and meld
//! - O(1) amortized decrease_key
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the heap keeps a link to the minimum root.
//! Work is deferred to `extract_min`, which consolidates trees of equal degree.
//! `decrease_key` cuts a violating node out to the root list and uses mark bits to
//! cascade cuts upward, which keeps tree degrees logarithmic.
//!
//! Nodes live in an [`Arena`]; all links are arena keys.

use crate::stats::OpStats;
use crate::storage::{remapped, Arena, Linked, NodeKey, Remap};
use crate::traits::{Handle, HeapError, MergeableQueue, PriorityQueue};
use log::trace;
use smallvec::{smallvec, SmallVec};

/// Handle to an element in a Fibonacci heap
///
/// Note: This handle is tied to a specific heap instance. It becomes invalid once
/// its element is extracted or the heap is cleared, and must not be used after
/// its heap has been melded into another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle(NodeKey);

impl Handle for FibonacciHandle {}

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    /// Set once the node has lost a child since it last became a child itself
    marked: bool,
}

impl<K, V> Node<K, V> {
    /// A singleton tree whose sibling ring is just itself
    fn singleton(this: NodeKey, key: K, value: V) -> Self {
        Node {
            key,
            value,
            parent: None,
            child: None,
            left: this,
            right: this,
            degree: 0,
            marked: false,
        }
    }
}

impl<K, V> Linked for Node<K, V> {
    fn relink(&mut self, remap: &Remap) {
        self.parent = self.parent.map(|k| remapped(remap, k));
        self.child = self.child.map(|k| remapped(remap, k));
        self.left = remapped(remap, self.left);
        self.right = remapped(remap, self.right);
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::fibonacci::FibonacciHeap;
/// use rust_mergeable_heaps::PriorityQueue;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok((&1, &"item")));
/// ```
pub struct FibonacciHeap<K, V> {
    nodes: Arena<Node<K, V>>,
    min: Option<NodeKey>,
    stats: OpStats,
}

impl<K: Ord, V> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for FibonacciHeap<K, V> {
    type Handle = FibonacciHandle;

    fn new() -> Self {
        Self {
            nodes: Arena::default(),
            min: None,
            stats: OpStats::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, key: K, value: V) -> FibonacciHandle {
        let node = self
            .nodes
            .insert_with_key(|this| Node::singleton(this, key, value));

        match self.min {
            Some(min) => {
                self.splice(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }

        self.stats.inserts += 1;
        FibonacciHandle(node)
    }

    fn find_min(&self) -> Result<(&K, &V), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyQueue)?;
        let node = &self.nodes[min];
        Ok((&node.key, &node.value))
    }

    fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let z = self.min.ok_or(HeapError::EmptyQueue)?;

        // Promote children to roots
        if let Some(child) = self.nodes[z].child.take() {
            for c in self.ring(child) {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
                self.splice(z, c);
            }
            self.nodes[z].degree = 0;
        }

        let next = self.nodes[z].right;
        if next == z {
            self.min = None;
        } else {
            self.unlink(z);
            self.min = Some(next);
            self.consolidate(next);
        }

        let node = self.nodes.remove(z).ok_or(HeapError::InvalidHandle)?;
        self.stats.extractions += 1;
        Ok((node.key, node.value))
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let x = handle.0;
        let node = self.nodes.node_mut(x)?;
        if new_key > node.key {
            return Err(HeapError::KeyIncreaseRejected);
        }
        node.key = new_key;
        let parent = node.parent;
        self.stats.decrease_keys += 1;

        if let Some(y) = parent {
            if self.nodes[x].key < self.nodes[y].key {
                self.cut(x, y);
                self.cascading_cut(y);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[x].key < self.nodes[min].key {
                self.min = Some(x);
            }
        }

        Ok(())
    }

    fn key_of(&self, handle: &FibonacciHandle) -> Result<&K, HeapError> {
        self.nodes.node(handle.0).map(|node| &node.key)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    fn stats(&self) -> OpStats {
        self.stats
    }
}

impl<K: Ord, V> MergeableQueue<K, V> for FibonacciHeap<K, V> {
    fn meld(&mut self, other: Self) {
        let FibonacciHeap {
            nodes,
            min: other_min,
            stats,
        } = other;
        self.stats += stats;

        let Some(other_min) = other_min else {
            return;
        };
        let remap = self.nodes.absorb(nodes);
        let other_min = remapped(&remap, other_min);

        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                // Concatenate the two root rings
                let min_right = self.nodes[min].right;
                let other_left = self.nodes[other_min].left;
                self.nodes[min].right = other_min;
                self.nodes[other_min].left = min;
                self.nodes[other_left].right = min_right;
                self.nodes[min_right].left = other_left;

                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
        }
    }
}

/// Initial size of the consolidation table for `n` nodes.
///
/// The maximum degree is bounded by log_phi(n) < 1.5 * log2(n); the table still
/// grows on demand so an unexpectedly large degree is never dropped.
fn degree_bound(n: usize) -> usize {
    let bits = (usize::BITS - n.leading_zeros()) as usize;
    bits + bits / 2 + 2
}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Collects the keys of a sibling ring, starting at `start`
    fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut keys = Vec::new();
        let mut current = start;
        loop {
            keys.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }
        keys
    }

    /// Inserts `node` to the right of `anchor` in the anchor's ring
    fn splice(&mut self, anchor: NodeKey, node: NodeKey) {
        let right = self.nodes[anchor].right;
        self.nodes[node].left = anchor;
        self.nodes[node].right = right;
        self.nodes[right].left = node;
        self.nodes[anchor].right = node;
    }

    /// Removes `node` from its ring, leaving it as a one-element ring
    fn unlink(&mut self, node: NodeKey) {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
    }

    /// Links trees of equal degree until every root has a distinct degree,
    /// then rebuilds the root ring and recomputes the minimum.
    fn consolidate(&mut self, start: NodeKey) {
        let roots = self.ring(start);
        let mut by_degree: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; degree_bound(self.nodes.len())];

        for root in roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;

            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut y) = by_degree[degree].take() else {
                    break;
                };
                if self.nodes[y].key < self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }

            by_degree[degree] = Some(x);
        }

        self.min = None;
        let mut root_count = 0usize;
        for root in by_degree.into_iter().flatten() {
            root_count += 1;
            self.nodes[root].left = root;
            self.nodes[root].right = root;
            match self.min {
                None => self.min = Some(root),
                Some(min) => {
                    self.splice(min, root);
                    if self.nodes[root].key < self.nodes[min].key {
                        self.min = Some(root);
                    }
                }
            }
        }
        trace!("consolidated into {} roots ({} nodes)", root_count, self.nodes.len());
    }

    /// Makes root `y` a child of root `x`
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        self.unlink(y);
        {
            let node = &mut self.nodes[y];
            node.parent = Some(x);
            node.marked = false;
        }

        match self.nodes[x].child {
            Some(child) => self.splice(child, y),
            None => self.nodes[x].child = Some(y),
        }
        self.nodes[x].degree += 1;
        self.stats.links += 1;
    }

    /// Detaches `x` from its parent `y` and moves it to the root ring
    fn cut(&mut self, x: NodeKey, y: NodeKey) {
        let right = self.nodes[x].right;
        if right == x {
            self.nodes[y].child = None;
        } else {
            if self.nodes[y].child == Some(x) {
                self.nodes[y].child = Some(right);
            }
            self.unlink(x);
        }
        self.nodes[y].degree -= 1;

        {
            let node = &mut self.nodes[x];
            node.parent = None;
            node.marked = false;
        }
        if let Some(min) = self.min {
            self.splice(min, x);
        }
        self.stats.cuts += 1;
    }

    /// Walks up from `start`: marks the first unmarked non-root and stops,
    /// cutting every marked node on the way.
    fn cascading_cut(&mut self, start: NodeKey) {
        let mut y = start;
        let mut cascade = 0u32;
        while let Some(z) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                break;
            }
            self.cut(y, z);
            self.stats.cascading_cuts += 1;
            cascade += 1;
            y = z;
        }
        if cascade > 0 {
            trace!("cascading cut of depth {}", cascade);
        }
    }

    /// Checks the structural invariants of the heap
    ///
    /// Verifies heap order on every parent-child pair, parent back-links, ring
    /// consistency, degrees, that roots are unmarked, that the minimum link
    /// points at the smallest root, and that every node is reachable.
    pub fn verify_heap_property(&self) -> bool {
        let Some(min) = self.min else {
            return self.nodes.len() == 0;
        };

        let mut stack = Vec::new();
        for root in self.ring(min) {
            let node = &self.nodes[root];
            if node.parent.is_some() || node.marked || node.key < self.nodes[min].key {
                return false;
            }
            if self.nodes[node.right].left != root {
                return false;
            }
            stack.push(root);
        }

        let mut seen = 0usize;
        while let Some(parent) = stack.pop() {
            seen += 1;
            let p = &self.nodes[parent];
            let mut children = 0usize;
            if let Some(child) = p.child {
                for c in self.ring(child) {
                    let node = &self.nodes[c];
                    if node.parent != Some(parent) || node.key < p.key {
                        return false;
                    }
                    if self.nodes[node.right].left != c {
                        return false;
                    }
                    children += 1;
                    stack.push(c);
                }
            }
            if children != p.degree {
                return false;
            }
        }

        seen == self.nodes.len()
    }
}
