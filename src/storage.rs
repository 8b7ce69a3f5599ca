//! Arena storage for heap nodes
//!
//! Every heap keeps its nodes in an [`Arena`], a thin layer over
//! [`slotmap::SlotMap`]. Tree links (parent, child, sibling) are stored as
//! [`NodeKey`]s rather than pointers, so splicing stays O(1) while the arena
//! owns all node memory.
//!
//! # Stale keys
//!
//! Slotmap keys are generational: once a node is removed its key never
//! resolves again, even if the slot is reused. Handles handed out by the heaps
//! wrap a [`NodeKey`], which is how a handle to an extracted element is
//! detected and reported as [`HeapError::InvalidHandle`].
//!
//! # Teardown
//!
//! Dropping or clearing an arena releases nodes in a flat pass over the slot
//! storage. No tree walk is involved, so arbitrarily deep or skewed trees
//! cannot exhaust the stack.

use crate::traits::HeapError;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational key addressing a node inside an [`Arena`]
    pub struct NodeKey;
}

/// Key translation table produced when one arena absorbs another
pub(crate) type Remap = SecondaryMap<NodeKey, NodeKey>;

/// Nodes whose links point at other nodes of the same arena
///
/// Implemented by each heap's node type so that [`Arena::absorb`] can rewrite
/// links after moving nodes between arenas.
pub(crate) trait Linked {
    /// Rewrites every stored link through `remap`
    fn relink(&mut self, remap: &Remap);
}

/// Translates a single link; every link of an absorbed arena is in the table
#[inline]
pub(crate) fn remapped(remap: &Remap, key: NodeKey) -> NodeKey {
    remap[key]
}

/// Slot arena owning the nodes of one heap
#[derive(Debug, Clone)]
pub(crate) struct Arena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> Arena<N> {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a node that needs its own key at construction (self-links)
    #[inline]
    pub fn insert_with_key(&mut self, f: impl FnOnce(NodeKey) -> N) -> NodeKey {
        self.nodes.insert_with_key(f)
    }

    #[inline]
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    /// Resolves a caller-supplied key
    #[inline]
    pub fn node(&self, key: NodeKey) -> Result<&N, HeapError> {
        self.nodes.get(key).ok_or(HeapError::InvalidHandle)
    }

    /// Resolves a caller-supplied key for mutation
    #[inline]
    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut N, HeapError> {
        self.nodes.get_mut(key).ok_or(HeapError::InvalidHandle)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<N: Linked> Arena<N> {
    /// Moves every node of `other` into this arena
    ///
    /// Returns the old-key to new-key table so the caller can translate its
    /// entry points (root, minimum) into this arena.
    pub fn absorb(&mut self, other: Arena<N>) -> Remap {
        let mut remap = Remap::with_capacity(other.len());
        let mut moved = Vec::with_capacity(other.len());

        for (old, node) in other.nodes {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }

        for key in moved {
            self.nodes[key].relink(&remap);
        }

        remap
    }
}

/// Indexing is for keys the heap structure maintains itself; caller-supplied
/// keys go through [`Arena::node`] / [`Arena::node_mut`].
impl<N> Index<NodeKey> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}
