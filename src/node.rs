// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Trie node model: inner nodes and leaf nodes.
//!
//! Two node kinds form a tagged variant (`Node<R>`); a match on the
//! discriminant replaces dynamic dispatch. No node here ever reaches
//! across the arena boundary — downlinks are opaque `NodeId`s, never a
//! direct reference to another node.

use crate::error::{TrieError, TrieResult};
use crate::key::Key;
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Identifier for a node inside the arena. Opaque outside `trie`.
pub type NodeId = u32;

/// One entry in an inner node's child-slot array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSlot {
    pub label: Label,
    pub child: NodeId,
}

/// Inner (branch) node: an optional common prefix plus a sorted,
/// label-unique array of child slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerNode {
    /// Bytes shared by every key reachable through this node, or empty.
    pub prefix: Key,
    /// Child slots sorted ascending by `label` (see `Label`'s `Ord`).
    pub children: Vec<ChildSlot>,
}

impl InnerNode {
    /// Build an inner node, validating the label-array invariants:
    /// unique, ascending, at most one of {`Terminator`,
    /// `AllTheSame`}.
    pub fn new(prefix: Key, mut children: Vec<ChildSlot>) -> TrieResult<Self> {
        children.sort_by_key(|slot| slot.label);

        for pair in children.windows(2) {
            if pair[0].label == pair[1].label {
                return Err(TrieError::TreeInvariantViolated {
                    reason: format!("duplicate label {:?} in inner node", pair[0].label),
                });
            }
        }

        let sentinel_count = children
            .iter()
            .filter(|slot| matches!(slot.label, Label::Terminator | Label::AllTheSame))
            .count();
        if sentinel_count > 1 {
            return Err(TrieError::TreeInvariantViolated {
                reason: "inner node carries more than one sentinel label".to_string(),
            });
        }

        if prefix.len() > crate::config::MAX_PREFIX {
            return Err(TrieError::TreeInvariantViolated {
                reason: format!("prefix length {} exceeds MAX_PREFIX", prefix.len()),
            });
        }

        Ok(Self { prefix, children })
    }

    /// `true` if every child slot carries the same downlink — the
    /// "all-the-same" shape that forces the reserved sentinel on split.
    pub fn is_all_the_same(&self) -> bool {
        if self.children.len() < 2 {
            return false;
        }
        match self.children.split_first() {
            None => false,
            Some((first, rest)) => rest.iter().all(|slot| slot.child == first.child),
        }
    }

    /// Binary-search the sorted child array for `label`.
    pub fn find_label(&self, label: Label) -> Option<usize> {
        self.children
            .binary_search_by_key(&label, |slot| slot.label)
            .ok()
    }

    /// Position where `label` would be inserted to keep the array sorted.
    pub fn insertion_point(&self, label: Label) -> usize {
        self.children
            .binary_search_by_key(&label, |slot| slot.label)
            .unwrap_or_else(|pos| pos)
    }

    /// Approximate on-disk size, used to check the single-page invariant.
    /// Mirrors the header-plus-payload accounting done explicitly in
    /// `page::Page`.
    pub fn serialized_len(&self) -> usize {
        let prefix_len = crate::key::SHORT_HDR + self.prefix.len();
        // 16-bit child count, then (label: i16, downlink: u32) pairs.
        let children_len = 2 + self.children.len() * (2 + 4);
        crate::config::BOOKKEEPING + prefix_len + children_len
    }
}

/// Leaf node: the residual suffix of one indexed key plus the opaque row
/// references supplied by the external store. A leaf carries more than
/// one row reference only when two or more identical keys were inserted
/// (duplicates are permitted and not deduplicated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode<R> {
    pub residual: Key,
    pub row_refs: Vec<R>,
}

impl<R> LeafNode<R> {
    pub fn new(residual: Key, row_ref: R) -> Self {
        Self {
            residual,
            row_refs: vec![row_ref],
        }
    }

    /// Record another row reference at this same key position.
    pub fn push(&mut self, row_ref: R) {
        self.row_refs.push(row_ref);
    }
}

/// A trie node: either an inner branch or a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node<R> {
    Inner(InnerNode),
    Leaf(LeafNode<R>),
}

impl<R> Node<R> {
    pub fn as_inner(&self) -> Option<&InnerNode> {
        match self {
            Node::Inner(n) => Some(n),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_inner_mut(&mut self) -> Option<&mut InnerNode> {
        match self {
            Node::Inner(n) => Some(n),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<R>> {
        match self {
            Node::Leaf(n) => Some(n),
            Node::Inner(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}
