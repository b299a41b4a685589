// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Lightweight operation counters for the k-mer trie.
//!
//! No logging or tracing dependency sits behind this; observability is a
//! small atomic-counter collector, scoped to the handful of counters this
//! core actually produces.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of accumulated counters, returned by [`TrieStats::snapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub splits: u64,
    pub searches: u64,
    pub nodes_visited: u64,
    pub leaves_pruned: u64,
}

/// Atomic counters recording trie activity.
///
/// Cheap to share: every counter is an independent `AtomicU64`, so
/// incrementing one never blocks on another (there is no cross-counter
/// invariant to protect).
#[derive(Debug, Default)]
pub struct TrieStats {
    inserts: AtomicU64,
    splits: AtomicU64,
    searches: AtomicU64,
    nodes_visited: AtomicU64,
    leaves_pruned: AtomicU64,
}

impl TrieStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_split(&self) {
        self.splits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_nodes_visited(&self, count: u64) {
        self.nodes_visited.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_leaf_pruned(&self) {
        self.leaves_pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            nodes_visited: self.nodes_visited.load(Ordering::Relaxed),
            leaves_pruned: self.leaves_pruned.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = TrieStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn counters_accumulate() {
        let stats = TrieStats::new();
        stats.record_insert();
        stats.record_insert();
        stats.record_split();
        stats.record_search();
        stats.record_nodes_visited(4);
        stats.record_leaf_pruned();

        let snap = stats.snapshot();
        assert_eq!(snap.inserts, 2);
        assert_eq!(snap.splits, 1);
        assert_eq!(snap.searches, 1);
        assert_eq!(snap.nodes_visited, 4);
        assert_eq!(snap.leaves_pruned, 1);
    }
}
