//! Pairing Heap implementation
//!
//! A pairing heap is a type of heap-ordered tree with:
//! - O(1) insert and meld
//! - O(log n) amortized extract_min
//! - o(log n) amortized decrease_key (in fact, better than log n)
//!
//! The pairing heap is simpler than Fibonacci heaps while still providing
//! excellent amortized performance for decrease_key operations. It keeps no
//! marks and never cascades; balance is restored by the two-pass merge that
//! runs on every extraction.
//!
//! The multiway tree is stored in child/sibling form. Each node's `prev` link
//! is its parent when it is a first child and its left sibling otherwise.

use crate::stats::OpStats;
use crate::storage::{remapped, Arena, Linked, NodeKey, Remap};
use crate::traits::{Handle, HeapError, MergeableQueue, PriorityQueue};
use smallvec::SmallVec;

/// Handle to an element in a Pairing heap
///
/// Note: This handle is tied to a specific heap instance. It becomes invalid once
/// its element is extracted or the heap is cleared, and must not be used after
/// its heap has been melded into another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PairingHandle(NodeKey);

impl Handle for PairingHandle {}

struct Node<K, V> {
    key: K,
    value: V,
    child: Option<NodeKey>,
    next: Option<NodeKey>,
    prev: Option<NodeKey>, // For decrease_key: parent or previous sibling
}

impl<K, V> Linked for Node<K, V> {
    fn relink(&mut self, remap: &Remap) {
        self.child = self.child.map(|k| remapped(remap, k));
        self.next = self.next.map(|k| remapped(remap, k));
        self.prev = self.prev.map(|k| remapped(remap, k));
    }
}

/// Pairing Heap
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::pairing::PairingHeap;
/// use rust_mergeable_heaps::PriorityQueue;
///
/// let mut heap = PairingHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok((&1, &"item")));
/// ```
pub struct PairingHeap<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<NodeKey>,
    stats: OpStats,
}

impl<K: Ord, V> Default for PairingHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for PairingHeap<K, V> {
    type Handle = PairingHandle;

    fn new() -> Self {
        Self {
            nodes: Arena::default(),
            root: None,
            stats: OpStats::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, key: K, value: V) -> PairingHandle {
        let node = self.nodes.insert_with_key(|_| Node {
            key,
            value,
            child: None,
            next: None,
            prev: None,
        });
        self.meld_with_root(node);
        self.stats.inserts += 1;
        PairingHandle(node)
    }

    fn find_min(&self) -> Result<(&K, &V), HeapError> {
        let root = self.root.ok_or(HeapError::EmptyQueue)?;
        let node = &self.nodes[root];
        Ok((&node.key, &node.value))
    }

    fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let root = self.root.ok_or(HeapError::EmptyQueue)?;
        let node = self.nodes.remove(root).ok_or(HeapError::InvalidHandle)?;

        self.root = match node.child {
            Some(first_child) => {
                self.nodes[first_child].prev = None;
                Some(self.two_pass_merge(first_child))
            }
            None => None,
        };

        self.stats.extractions += 1;
        Ok((node.key, node.value))
    }

    fn decrease_key(&mut self, handle: &PairingHandle, new_key: K) -> Result<(), HeapError> {
        let x = handle.0;
        let node = self.nodes.node_mut(x)?;
        if new_key > node.key {
            return Err(HeapError::KeyIncreaseRejected);
        }
        let lowered = new_key < node.key;
        node.key = new_key;
        self.stats.decrease_keys += 1;

        if lowered && self.root != Some(x) {
            self.cut(x);
            self.meld_with_root(x);
        }
        Ok(())
    }

    fn key_of(&self, handle: &PairingHandle) -> Result<&K, HeapError> {
        self.nodes.node(handle.0).map(|node| &node.key)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn stats(&self) -> OpStats {
        self.stats
    }
}

impl<K: Ord, V> MergeableQueue<K, V> for PairingHeap<K, V> {
    fn meld(&mut self, other: Self) {
        let PairingHeap {
            nodes,
            root: other_root,
            stats,
        } = other;
        self.stats += stats;

        if let Some(other_root) = other_root {
            let remap = self.nodes.absorb(nodes);
            self.meld_with_root(remapped(&remap, other_root));
        }
    }
}

impl<K: Ord, V> PairingHeap<K, V> {
    /// Links a detached tree with the current root
    fn meld_with_root(&mut self, node: NodeKey) {
        self.root = Some(match self.root {
            Some(root) => self.link(root, node),
            None => node,
        });
    }

    /// Links two detached trees, returning the one with the smaller key
    ///
    /// The loser becomes the first child of the winner. On equal keys `a` wins.
    fn link(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        let (parent, child) = if self.nodes[b].key < self.nodes[a].key {
            (b, a)
        } else {
            (a, b)
        };

        let first = self.nodes[parent].child;
        {
            let node = &mut self.nodes[child];
            node.prev = Some(parent);
            node.next = first;
        }
        if let Some(first) = first {
            self.nodes[first].prev = Some(child);
        }
        self.nodes[parent].child = Some(child);
        self.stats.links += 1;
        parent
    }

    /// Clears a node's sibling links, returning its former right sibling
    fn detach(&mut self, node: NodeKey) -> Option<NodeKey> {
        let node = &mut self.nodes[node];
        node.prev = None;
        node.next.take()
    }

    /// Merges a sibling list into one tree
    ///
    /// Pass one links adjacent pairs left to right; pass two folds the results
    /// right to left into a single tree.
    fn two_pass_merge(&mut self, first: NodeKey) -> NodeKey {
        let mut pairs: SmallVec<[NodeKey; 32]> = SmallVec::new();
        let mut current = Some(first);

        while let Some(a) = current {
            match self.detach(a) {
                Some(b) => {
                    current = self.detach(b);
                    pairs.push(self.link(a, b));
                }
                None => {
                    pairs.push(a);
                    current = None;
                }
            }
        }

        let mut result = pairs.pop().unwrap_or(first);
        while let Some(tree) = pairs.pop() {
            result = self.link(tree, result);
        }
        result
    }

    /// Removes a non-root node (with its subtree) from its parent's child list
    fn cut(&mut self, x: NodeKey) {
        let Some(prev) = self.nodes[x].prev else {
            return;
        };
        let next = self.nodes[x].next;

        if self.nodes[prev].child == Some(x) {
            // x is the first child: prev is the parent
            self.nodes[prev].child = next;
        } else {
            self.nodes[prev].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = Some(prev);
        }

        self.detach(x);
        self.stats.cuts += 1;
    }

    /// Checks the structural invariants of the heap
    ///
    /// Verifies heap order on every parent-child pair, that `prev` links point
    /// at the parent (first child) or left sibling, and that every node is
    /// reachable from the root.
    pub fn verify_heap_property(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.len() == 0;
        };
        if self.nodes[root].prev.is_some() || self.nodes[root].next.is_some() {
            return false;
        }

        let mut stack = vec![root];
        let mut seen = 0usize;
        while let Some(parent) = stack.pop() {
            seen += 1;
            let mut expected_prev = parent;
            let mut current = self.nodes[parent].child;
            while let Some(c) = current {
                let node = &self.nodes[c];
                if node.prev != Some(expected_prev) || node.key < self.nodes[parent].key {
                    return false;
                }
                stack.push(c);
                expected_prev = c;
                current = node.next;
            }
        }

        seen == self.nodes.len()
    }
}
