//! Common traits for mergeable priority queues
//!
//! This module provides the contract both heap variants satisfy:
//!
//! - [`PriorityQueue`]: insert, find-min, extract-min, decrease-key, emptiness
//! - [`MergeableQueue`]: extends [`PriorityQueue`] with `meld`
//!
//! Graph algorithms in this crate are written against [`PriorityQueue`] only,
//! so the caller picks the heap implementation when constructing the queue.

use crate::stats::OpStats;
use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `find_min` or `extract_min` on a queue with no elements
    #[error("priority queue is empty")]
    EmptyQueue,
    /// `decrease_key` was asked to raise a key
    #[error("new key is greater than the current key")]
    KeyIncreaseRejected,
    /// The handle's node has been extracted, cleared, or melded away
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// Handles are small `Copy` tokens. They do not own the node they refer to
/// and are only meaningful for the heap instance that issued them.
pub trait Handle: Copy + Eq + std::fmt::Debug {}

/// Priority queue with handle-based `decrease_key`
///
/// Elements are `(key, value)` pairs ordered by key; the smallest key is at
/// the front. Every `insert` returns a [`Handle`] that can later be passed to
/// [`decrease_key`](PriorityQueue::decrease_key).
///
/// # Handle validity
///
/// A handle stays valid until its element is extracted or the heap is cleared,
/// dropped or melded into another heap. Using a stale handle is reported as
/// [`HeapError::InvalidHandle`]. Passing a handle to a heap other than the one
/// that issued it is a programming error: it is not detected and may address an
/// unrelated element.
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::fibonacci::FibonacciHeap;
/// use rust_mergeable_heaps::PriorityQueue;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(10, "item");
/// heap.insert(7, "other");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.find_min(), Ok((&5, &"item")));
/// ```
pub trait PriorityQueue<K: Ord, V> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given key, returning a handle
    ///
    /// # Time Complexity
    /// - Fibonacci Heap: O(1) worst case
    /// - Pairing Heap: O(1) worst case
    fn insert(&mut self, key: K, value: V) -> Self::Handle;

    /// Returns the minimum key and its value without removing them
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the heap has no elements.
    fn find_min(&self) -> Result<(&K, &V), HeapError>;

    /// Removes and returns the element with the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized for both implementations.
    fn extract_min(&mut self) -> Result<(K, V), HeapError>;

    /// Lowers the key of the element identified by `handle`
    ///
    /// A key equal to the current one is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::KeyIncreaseRejected`] if `new_key` is greater than the
    ///   current key. The heap is left untouched.
    /// - [`HeapError::InvalidHandle`] if the element is no longer in the heap.
    ///
    /// # Time Complexity
    /// - Fibonacci Heap: O(1) amortized
    /// - Pairing Heap: o(log n) amortized
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;

    /// Returns the current key of a live element
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is no longer in the heap.
    fn key_of(&self, handle: &Self::Handle) -> Result<&K, HeapError>;

    /// Removes every element; all outstanding handles become invalid
    fn clear(&mut self);

    /// Returns a snapshot of the operation counters
    fn stats(&self) -> OpStats;
}

/// Heaps that can absorb another heap of the same type
///
/// # Example
///
/// ```rust
/// use rust_mergeable_heaps::pairing::PairingHeap;
/// use rust_mergeable_heaps::{MergeableQueue, PriorityQueue};
///
/// let mut a = PairingHeap::new();
/// a.insert(5, "a");
/// let mut b = PairingHeap::new();
/// b.insert(3, "b");
///
/// a.meld(b);
/// assert_eq!(a.len(), 2);
/// assert_eq!(a.extract_min(), Ok((3, "b")));
/// ```
pub trait MergeableQueue<K: Ord, V>: PriorityQueue<K, V> {
    /// Moves every element of `other` into this heap
    ///
    /// Handles issued by `self` remain valid. Handles issued by `other` must
    /// not be used afterwards: they are not guaranteed to be rejected, and may
    /// resolve to an unrelated element of `self`. Operation counters of both
    /// heaps are summed.
    ///
    /// # Time Complexity
    /// O(1) structural work plus O(m) to re-key the m nodes of `other` into
    /// this heap's arena.
    fn meld(&mut self, other: Self);
}
