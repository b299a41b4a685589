// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core trie operation benchmarks.
//!
//! Measures:
//! - insert() - building a trie from scratch
//! - search() with Equal - single-key point lookup
//! - search() with Prefix - small-to-large fan-out scan
//! - search() with IupacContains - ambiguity-pattern scan

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmer_trie::{Key, KmerTrie, Predicate};

const ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Deterministic pseudo-random 16-mer, varied by `seed`.
fn generate_key(seed: u64) -> Vec<u8> {
    let mut x = seed.wrapping_mul(2_862_933_555_777_941_757).wrapping_add(1);
    (0..16)
        .map(|_| {
            x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            ALPHABET[(x >> 60) as usize % 4]
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter_batched(
                || (0..count).map(generate_key).collect::<Vec<_>>(),
                |keys| {
                    let mut trie = KmerTrie::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        trie.insert(Key::unbounded(key), i as u64).unwrap();
                    }
                    black_box(trie);
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn build_trie(count: u64) -> KmerTrie<u64> {
    let mut trie = KmerTrie::new();
    for i in 0..count {
        trie.insert(Key::unbounded(generate_key(i)), i).unwrap();
    }
    trie
}

fn bench_equal_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_equal");

    for count in [1_000, 10_000].iter() {
        let trie = build_trie(*count);
        let target = Key::unbounded(generate_key(count / 2));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                black_box(trie.search(&Predicate::equal(target.clone())));
            });
        });
    }

    group.finish();
}

fn bench_prefix_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_prefix");

    for count in [1_000, 10_000].iter() {
        let trie = build_trie(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                black_box(trie.search(&Predicate::prefix(Key::from("ACGT"))));
            });
        });
    }

    group.finish();
}

fn bench_iupac_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iupac");
    let pattern = Predicate::iupac_contains(Key::from("NNNNNNNNNNNNNNNN")).unwrap();

    for count in [1_000, 10_000].iter() {
        let trie = build_trie(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                black_box(trie.search(&pattern));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_equal_search,
    bench_prefix_search,
    bench_iupac_search
);
criterion_main!(benches);
