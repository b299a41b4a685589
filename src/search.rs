// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Search engine: `inner_consistent`/`leaf_consistent` traversal driver.
//!
//! The walk is append-only: each step pushes onto a borrowed
//! reconstruction buffer and pops on the way back out, rather than
//! cloning a key at every level.

use crate::node::{Node, NodeId};
use crate::predicate::Predicate;
use crate::stats::TrieStats;

/// Read-only access to the node arena, independent of how nodes are
/// actually stored (in-memory slab, paged file, ...). `KmerTrie` is the
/// only implementor in this crate.
pub trait NodeStore<R> {
    fn get(&self, id: NodeId) -> Option<&Node<R>>;
}

/// One matched key plus the row reference its leaf carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<R> {
    pub key: Vec<u8>,
    pub row_ref: R,
}

/// Walk the subtree rooted at `root` collecting every leaf whose
/// reconstructed key satisfies `predicate`, pruning subtrees that fail
/// `inner_consistent` along the way.
pub fn search<R: Clone>(
    store: &impl NodeStore<R>,
    root: NodeId,
    predicate: &Predicate,
    stats: &TrieStats,
) -> Vec<SearchHit<R>> {
    let mut hits = Vec::new();
    let mut reconstructed = Vec::new();
    walk(store, root, predicate, &mut reconstructed, &mut hits, stats);
    hits
}

fn walk<R: Clone>(
    store: &impl NodeStore<R>,
    node_id: NodeId,
    predicate: &Predicate,
    reconstructed: &mut Vec<u8>,
    hits: &mut Vec<SearchHit<R>>,
    stats: &TrieStats,
) {
    stats.record_nodes_visited(1);
    let Some(node) = store.get(node_id) else {
        return;
    };

    match node {
        Node::Inner(inner) => {
            let before_prefix = reconstructed.len();
            reconstructed.extend_from_slice(inner.prefix.as_bytes());

            // Every child sits at least one byte (or zero, for a
            // sentinel) past the prefix; there is no cheap upper bound on
            // how many more bytes remain, so `inner_consistent` is asked
            // with a lower bound of 0 and relies on its own prefix check.
            if predicate.inner_consistent(reconstructed, 0) {
                for slot in &inner.children {
                    let before_label = reconstructed.len();
                    if let Some(byte) = slot.label.byte() {
                        reconstructed.push(byte);
                    }
                    walk(store, slot.child, predicate, reconstructed, hits, stats);
                    reconstructed.truncate(before_label);
                }
            } else {
                stats.record_leaf_pruned();
            }

            reconstructed.truncate(before_prefix);
        }
        Node::Leaf(leaf) => {
            let before = reconstructed.len();
            reconstructed.extend_from_slice(leaf.residual.as_bytes());
            if predicate.leaf_consistent(reconstructed) {
                hits.extend(leaf.row_refs.iter().cloned().map(|row_ref| SearchHit {
                    key: reconstructed.clone(),
                    row_ref,
                }));
            } else {
                stats.record_leaf_pruned();
            }
            reconstructed.truncate(before);
        }
    }
}
