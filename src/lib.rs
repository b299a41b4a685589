// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Space-partitioned radix-trie index over DNA k-mers.
//!
//! `KmerTrie<R>` indexes short nucleotide sequences (≤32 letters) and
//! answers three kinds of query: exact equality, prefix match, and
//! IUPAC-ambiguity-code containment. `R` is an opaque row reference
//! supplied by whatever external store owns the indexed rows — the trie
//! itself never interprets it.
//!
//! ```
//! use kmer_trie::{KmerTrie, Key, Predicate};
//!
//! let mut trie = KmerTrie::new();
//! trie.insert(Key::from("ACGT"), 101u64).unwrap();
//! trie.insert(Key::from("ACGA"), 102u64).unwrap();
//!
//! let hits = trie.search(&Predicate::prefix(Key::from("AC")));
//! assert_eq!(hits.len(), 2);
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod insert;
pub mod key;
pub mod label;
pub mod node;
pub mod page;
pub mod predicate;
pub mod search;
pub mod stats;
pub mod trie;

pub use error::{TrieError, TrieResult};
pub use key::Key;
pub use label::Label;
pub use node::{ChildSlot, InnerNode, LeafNode, Node, NodeId};
pub use predicate::Predicate;
pub use search::SearchHit;
pub use stats::StatsSnapshot;
pub use trie::KmerTrie;
