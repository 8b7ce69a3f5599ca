//! Operation counters shared by the heap implementations
//!
//! Both heaps answer the same queries with the same results; what differs is
//! how much restructuring they do. [`OpStats`] records that work so callers
//! comparing implementations can look at more than wall-clock time.

use std::ops::AddAssign;

/// Per-heap operation counters
///
/// `links` counts tree links (one tree becoming a child of another), `cuts`
/// counts subtrees detached during `decrease_key`, and `cascading_cuts` counts
/// the subset of Fibonacci-heap cuts triggered by a marked parent. The pairing
/// heap never cascades, so its `cascading_cuts` is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpStats {
    pub inserts: u64,
    pub extractions: u64,
    pub decrease_keys: u64,
    pub links: u64,
    pub cuts: u64,
    pub cascading_cuts: u64,
}

impl OpStats {
    /// Total number of public queue operations performed
    pub fn operations(&self) -> u64 {
        self.inserts + self.extractions + self.decrease_keys
    }
}

impl AddAssign for OpStats {
    fn add_assign(&mut self, other: Self) {
        self.inserts += other.inserts;
        self.extractions += other.extractions;
        self.decrease_keys += other.decrease_keys;
        self.links += other.links;
        self.cuts += other.cuts;
        self.cascading_cuts += other.cascading_cuts;
    }
}
