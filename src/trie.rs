// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! `KmerTrie`: the in-memory arena driver tying `insert`/`search`/`node`
//! together.
//!
//! The arena is a flat `Vec<Option<Node<R>>>` indexed by `NodeId`: an
//! addressable store of nodes a caller never has to walk by pointer
//! chasing through Rust references. Splitting a node never requires
//! rewriting a parent's child slot: the node being split keeps its
//! `NodeId` and its *content* is replaced in place, with any new node it
//! now points to getting a freshly allocated id.

use crate::error::TrieResult;
use crate::insert::{choose, picksplit, DescentContext, Decision};
use crate::key::Key;
use crate::label::Label;
use crate::node::{ChildSlot, InnerNode, LeafNode, Node, NodeId};
use crate::predicate::Predicate;
use crate::search::{self, NodeStore, SearchHit};
use crate::stats::{StatsSnapshot, TrieStats};

/// Space-partitioned radix trie over DNA k-mers.
pub struct KmerTrie<R> {
    arena: Vec<Option<Node<R>>>,
    root: NodeId,
    stats: TrieStats,
}

impl<R: Clone> KmerTrie<R> {
    /// A fresh, empty trie: a single inner node with no prefix and no
    /// children.
    pub fn new() -> Self {
        let root_node = Node::Inner(InnerNode::new(Key::empty(), Vec::new()).expect("empty inner node is always valid"));
        Self {
            arena: vec![Some(root_node)],
            root: 0,
            stats: TrieStats::new(),
        }
    }

    /// Number of live node slots in the arena (inner and leaf combined).
    pub fn node_count(&self) -> usize {
        self.arena.iter().filter(|slot| slot.is_some()).count()
    }

    fn allocate(&mut self, node: Node<R>) -> NodeId {
        let id = self.arena.len() as NodeId;
        self.arena.push(Some(node));
        id
    }

    /// Insert `key` with an opaque `row_ref` supplied by the caller.
    /// Duplicate keys are permitted; both row references are retained.
    pub fn insert(&mut self, key: Key, row_ref: R) -> TrieResult<()> {
        self.stats.record_insert();
        let mut current = self.root;
        let mut remainder: Vec<u8> = key.as_bytes().to_vec();

        loop {
            let node = self.arena[current as usize]
                .clone()
                .expect("descent never visits a freed node id");

            match node {
                Node::Leaf(leaf) => {
                    if leaf.residual.as_bytes() == remainder.as_slice() {
                        let mut updated = leaf;
                        updated.push(row_ref);
                        self.arena[current as usize] = Some(Node::Leaf(updated));
                    } else {
                        let mut batch: Vec<(Key, R)> = leaf
                            .row_refs
                            .into_iter()
                            .map(|r| (leaf.residual.clone(), r))
                            .collect();
                        batch.push((Key::unbounded(remainder), row_ref));
                        let new_node = self.materialize(batch)?;
                        self.arena[current as usize] = Some(new_node);
                    }
                    return Ok(());
                }
                Node::Inner(inner) => {
                    let ctx = DescentContext {
                        remainder: &remainder,
                        prefix: inner.prefix.as_bytes(),
                        children: &inner.children,
                        all_the_same: inner.is_all_the_same(),
                    };
                    match choose(&ctx) {
                        Decision::Descend {
                            slot_index,
                            residual,
                            ..
                        } => {
                            current = inner.children[slot_index].child;
                            remainder = residual.as_bytes().to_vec();
                        }
                        Decision::AddChild { label, position } => {
                            let leaf_residual =
                                Key::unbounded(remainder[label.level_advance()..].to_vec());
                            let leaf_id =
                                self.allocate(Node::Leaf(LeafNode::new(leaf_residual, row_ref)));
                            let mut new_children = inner.children.clone();
                            new_children.insert(position, ChildSlot { label, child: leaf_id });
                            let new_inner = InnerNode::new(inner.prefix.clone(), new_children)?;
                            self.arena[current as usize] = Some(Node::Inner(new_inner));
                            return Ok(());
                        }
                        Decision::SplitUpward {
                            new_prefix,
                            upper_label,
                            old_new_prefix,
                        } => {
                            let shrunk = InnerNode::new(old_new_prefix, inner.children.clone())?;
                            let old_id = self.allocate(Node::Inner(shrunk));
                            let upper = InnerNode::new(
                                new_prefix,
                                vec![ChildSlot { label: upper_label, child: old_id }],
                            )?;
                            self.arena[current as usize] = Some(Node::Inner(upper));
                            self.stats.record_split();
                            // Reissue: `current` and `remainder` are untouched, so
                            // the next loop iteration re-reads the freshly built
                            // upper node and (per spec) now takes the add-child path.
                        }
                    }
                }
            }
        }
    }

    /// Build a node (leaf or inner, recursively) from a batch of (full
    /// remaining key, row reference) pairs produced at one tree position.
    /// `batch` must be non-empty.
    fn materialize(&mut self, batch: Vec<(Key, R)>) -> TrieResult<Node<R>> {
        if batch.len() == 1 {
            let (key, row_ref) = batch.into_iter().next().expect("length checked above");
            return Ok(Node::Leaf(LeafNode::new(key, row_ref)));
        }

        let outcome = picksplit(&batch)?;
        let mut children = Vec::with_capacity(outcome.groups.len());
        for group in outcome.groups {
            let child_node = if group.leaves.len() == 1 {
                Node::Leaf(group.leaves.into_iter().next().expect("length checked above"))
            } else {
                let mut sub_batch = Vec::new();
                for leaf in group.leaves {
                    for row_ref in leaf.row_refs {
                        sub_batch.push((leaf.residual.clone(), row_ref));
                    }
                }
                self.materialize(sub_batch)?
            };
            let child_id = self.allocate(child_node);
            children.push(ChildSlot { label: group.label, child: child_id });
        }
        self.stats.record_split();
        Ok(Node::Inner(InnerNode::new(outcome.prefix, children)?))
    }

    /// Run `predicate` against the whole trie.
    pub fn search(&self, predicate: &Predicate) -> Vec<SearchHit<R>> {
        self.stats.record_search();
        search::search(self, self.root, predicate, &self.stats)
    }

    /// Snapshot of accumulated operation counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Root-level child labels, for tests and diagnostics.
    pub fn root_labels(&self) -> Vec<Label> {
        match &self.arena[self.root as usize] {
            Some(Node::Inner(inner)) => inner.children.iter().map(|slot| slot.label).collect(),
            _ => Vec::new(),
        }
    }
}

impl<R: Clone> Default for KmerTrie<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> NodeStore<R> for KmerTrie<R> {
    fn get(&self, id: NodeId) -> Option<&Node<R>> {
        self.arena.get(id as usize).and_then(|slot| slot.as_ref())
    }
}
