// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Property-based fuzz tests over random key batches and predicates.

use kmer_trie::{Key, KmerTrie, Predicate};
use proptest::prelude::*;
use std::collections::HashSet;

const NUCLEOTIDES: [char; 4] = ['A', 'C', 'G', 'T'];
const IUPAC: [char; 15] = [
    'A', 'C', 'G', 'T', 'R', 'Y', 'S', 'W', 'K', 'M', 'B', 'D', 'H', 'V', 'N',
];

fn key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(&NUCLEOTIDES[..]), 1..=12)
        .prop_map(|chars| chars.into_iter().collect())
}

fn batch_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(key_strategy(), 1..200)
}

fn build_trie(batch: &[String]) -> KmerTrie<usize> {
    let mut trie = KmerTrie::new();
    for (i, k) in batch.iter().enumerate() {
        trie.insert(Key::from(k.as_str()), i).unwrap();
    }
    trie
}

fn brute_force_hits<'a>(batch: &'a [String], predicate: &Predicate) -> HashSet<(String, usize)> {
    batch
        .iter()
        .enumerate()
        .filter(|(_, key)| predicate.leaf_consistent(key.as_bytes()))
        .map(|(i, key)| (key.clone(), i))
        .collect()
}

fn trie_hits(trie: &KmerTrie<usize>, predicate: &Predicate) -> HashSet<(String, usize)> {
    trie.search(predicate)
        .into_iter()
        .map(|hit| (String::from_utf8(hit.key).unwrap(), hit.row_ref))
        .collect()
}

proptest! {
    /// Round-trip: every inserted key is found by `equal`, with its own
    /// row reference, regardless of insertion order.
    #[test]
    fn round_trip_equal_finds_every_inserted_key(batch in batch_strategy()) {
        let trie = build_trie(&batch);
        for (i, key) in batch.iter().enumerate() {
            let predicate = Predicate::equal(Key::from(key.as_str()));
            let hits = trie.search(&predicate);
            prop_assert!(hits.iter().any(|h| h.row_ref == i && h.key == key.as_bytes()));
        }
    }

    /// `equal` via the trie agrees with a brute-force scan, for every
    /// inserted key used as its own query.
    #[test]
    fn equal_search_matches_brute_force_scan(batch in batch_strategy()) {
        let trie = build_trie(&batch);
        let unique: HashSet<&String> = batch.iter().collect();
        for key in unique {
            let predicate = Predicate::equal(Key::from(key.as_str()));
            prop_assert_eq!(trie_hits(&trie, &predicate), brute_force_hits(&batch, &predicate));
        }
    }

    /// `prefix` via the trie agrees with a brute-force scan, using a
    /// random prefix of a random batch member as the query.
    #[test]
    fn prefix_search_matches_brute_force_scan(
        batch in batch_strategy(),
        pick in 0usize..200,
        cut in 0usize..13,
    ) {
        prop_assume!(!batch.is_empty());
        let sample = &batch[pick % batch.len()];
        let cut = cut.min(sample.len());
        let prefix = &sample[..cut];

        let trie = build_trie(&batch);
        let predicate = Predicate::prefix(Key::from(prefix));
        prop_assert_eq!(trie_hits(&trie, &predicate), brute_force_hits(&batch, &predicate));
    }

    /// `iupac_contains` via the trie agrees with a brute-force scan for a
    /// random ambiguity pattern whose length equals a random batch
    /// member's length (exercising both the equal-length match path and
    /// the length-mismatch empty-result path).
    #[test]
    fn iupac_search_matches_brute_force_scan(
        batch in batch_strategy(),
        pick in 0usize..200,
        pattern_chars in prop::collection::vec(prop::sample::select(&IUPAC[..]), 1..=12),
    ) {
        prop_assume!(!batch.is_empty());
        let sample = &batch[pick % batch.len()];
        let pattern_len = sample.len().min(pattern_chars.len()).max(1);
        let pattern: String = pattern_chars.into_iter().take(pattern_len).collect();

        let trie = build_trie(&batch);
        let predicate = Predicate::iupac_contains(Key::from(pattern.as_str())).unwrap();
        prop_assert_eq!(trie_hits(&trie, &predicate), brute_force_hits(&batch, &predicate));
    }

    /// A key longer than every batch member never matches `prefix` (S3's
    /// shape, generalized).
    #[test]
    fn overlong_prefix_query_never_matches(batch in batch_strategy()) {
        let longest = batch.iter().map(|k| k.len()).max().unwrap_or(0);
        let mut overlong = "A".repeat(longest + 1);
        overlong.push('C');

        let trie = build_trie(&batch);
        let predicate = Predicate::prefix(Key::from(overlong.as_str()));
        prop_assert!(trie.search(&predicate).is_empty());
    }
}
