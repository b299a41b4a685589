// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Insertion engine: the single-node `choose` decision and the
//! batch-to-inner-node `picksplit` routine.
//!
//! Both functions are pure: they never touch more than the one node (or
//! batch of leaves) passed in, and return a typed command for the caller
//! (here, `trie::KmerTrie`) to execute. Node surgery stays separate from
//! the arena allocation and bookkeeping that actually carries it out.

use crate::config::MAX_PREFIX;
use crate::error::{TrieError, TrieResult};
use crate::key::Key;
use crate::label::Label;
use crate::node::{ChildSlot, LeafNode};

/// Everything `choose` needs to know about the node it is descending
/// into.
pub struct DescentContext<'a> {
    /// Key bytes not yet consumed at the *start* of this node (i.e.
    /// before the node's own prefix is accounted for).
    pub remainder: &'a [u8],
    /// Node's optional common prefix.
    pub prefix: &'a [u8],
    /// Sorted, label-unique child slots.
    pub children: &'a [ChildSlot],
    /// `true` if every child slot shares the same downlink.
    pub all_the_same: bool,
}

/// Outcome of `choose` at one inner node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The remainder's first byte (after the node's prefix) matches an
    /// existing label; descend into that child.
    Descend {
        slot_index: usize,
        level_advance: usize,
        residual: Key,
    },
    /// The node's prefix matches but no existing label matches the next
    /// byte; add a new child slot at `position` to keep labels sorted.
    AddChild { label: Label, position: usize },
    /// The node's prefix does not match (or the node is an all-the-same
    /// node that must make room for a genuinely different key). The node
    /// is replaced by a fresh upper inner node; the caller reissues
    /// insertion on it.
    SplitUpward {
        /// Common prefix of the old prefix and the incoming remainder.
        new_prefix: Key,
        /// Label under which the old node survives, as the upper node's
        /// sole child.
        upper_label: Label,
        /// The old node's prefix after this split (remainder of its
        /// original prefix past the shared bytes and the label byte).
        old_new_prefix: Key,
    },
}

/// Run the `choose` decision for one inner node.
pub fn choose(ctx: &DescentContext<'_>) -> Decision {
    let common = Key::common_prefix_len(ctx.prefix, ctx.remainder);

    if common < ctx.prefix.len() {
        return split_upward(ctx.prefix, common, ctx.all_the_same);
    }

    // Prefix matches in full; the node has no prefix at all when
    // `ctx.prefix` is empty, which this handles without special-casing
    // since `common == 0 == ctx.prefix.len()`.
    let after_prefix = &ctx.remainder[common..];
    let label = match after_prefix.first() {
        Some(&byte) => Label::Byte(byte),
        None => Label::Terminator,
    };

    if let Ok(idx) = ctx.children.binary_search_by_key(&label, |slot| slot.label) {
        let residual = Key::unbounded(after_prefix[label.level_advance()..].to_vec());
        return Decision::Descend {
            slot_index: idx,
            level_advance: common + label.level_advance(),
            residual,
        };
    }

    if ctx.all_the_same {
        return split_upward(ctx.prefix, common, true);
    }

    let position = ctx
        .children
        .binary_search_by_key(&label, |slot| slot.label)
        .unwrap_or_else(|pos| pos);
    Decision::AddChild { label, position }
}

/// Build the `SplitUpward` decision shared by both trigger paths
/// (prefix divergence, and "no label matches but the node is
/// all-the-same"). `common` is how many prefix bytes are shared; the
/// all-the-same rule always wins the sentinel-vs-byte choice.
fn split_upward(prefix: &[u8], common: usize, all_the_same: bool) -> Decision {
    let upper_label = if all_the_same {
        Label::AllTheSame
    } else {
        Label::Byte(prefix[common])
    };
    let old_new_prefix = Key::unbounded(prefix[common + upper_label.level_advance()..].to_vec());
    Decision::SplitUpward {
        new_prefix: Key::unbounded(prefix[..common].to_vec()),
        upper_label,
        old_new_prefix,
    }
}

/// One bucket of leaves produced by `picksplit`, sharing a discriminator.
pub struct SplitGroup<R> {
    pub label: Label,
    pub leaves: Vec<LeafNode<R>>,
    /// Indices into the original batch, in group order — the mapping
    /// a fresh inner node requires from input leaf to child slot.
    pub input_indices: Vec<usize>,
}

/// Result of `picksplit`: a fresh inner node's prefix plus its grouped
/// children, still unattached to any `NodeId`s.
pub struct SplitOutcome<R> {
    pub prefix: Key,
    pub groups: Vec<SplitGroup<R>>,
}

/// Build an inner node from a batch of (full key, row reference) pairs
/// . The batch must be non-empty.
pub fn picksplit<R: Clone>(batch: &[(Key, R)]) -> TrieResult<SplitOutcome<R>> {
    let first = batch.first().ok_or_else(|| TrieError::TreeInvariantViolated {
        reason: "picksplit requires a non-empty batch".to_string(),
    })?;

    let mut common = first.0.len();
    for (key, _) in &batch[1..] {
        common = common.min(Key::common_prefix_len(first.0.as_bytes(), key.as_bytes()));
    }
    common = common.min(MAX_PREFIX);

    let mut discriminated: Vec<(usize, Label, Key)> = Vec::with_capacity(batch.len());
    for (index, (key, _)) in batch.iter().enumerate() {
        let bytes = key.as_bytes();
        let label = match bytes.get(common) {
            Some(&byte) => Label::Byte(byte),
            None => Label::Terminator,
        };
        let residual = Key::unbounded(bytes[common + label.level_advance()..].to_vec());
        discriminated.push((index, label, residual));
    }
    discriminated.sort_by_key(|(_, label, _)| *label);

    let mut groups: Vec<SplitGroup<R>> = Vec::new();
    for (index, label, residual) in discriminated {
        let row_ref = batch[index].1.clone();
        match groups.last_mut() {
            Some(group) if group.label == label => {
                match group.leaves.iter_mut().find(|leaf| leaf.residual == residual) {
                    Some(leaf) => leaf.push(row_ref),
                    None => group.leaves.push(LeafNode::new(residual, row_ref)),
                }
                group.input_indices.push(index);
            }
            _ => groups.push(SplitGroup {
                label,
                leaves: vec![LeafNode::new(residual, row_ref)],
                input_indices: vec![index],
            }),
        }
    }

    Ok(SplitOutcome {
        prefix: Key::unbounded(first.0.as_bytes()[..common].to_vec()),
        groups,
    })
}
