// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! k-mer trie CLI demo.
//!
//! Reads whitespace-separated `key` or `key<TAB>row_ref` lines from a file,
//! builds a trie, then runs one query against it. A small, throwaway
//! harness for exercising the library from the command line — not a
//! persistence layer.

use clap::{Parser, Subcommand};
use kmer_trie::{Key, KmerTrie, Predicate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kmer-trie")]
#[command(about = "Build a k-mer trie from a key file and run one query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exact-match a key.
    Equal { keys_file: PathBuf, target: String },
    /// Find every indexed key starting with `target`.
    Prefix { keys_file: PathBuf, target: String },
    /// Find every indexed key admitted by an IUPAC ambiguity pattern.
    Iupac { keys_file: PathBuf, pattern: String },
    /// Print operation counters after loading the key file.
    Stats { keys_file: PathBuf },
}

fn load_trie(keys_file: &PathBuf) -> anyhow::Result<KmerTrie<u64>> {
    let contents = std::fs::read_to_string(keys_file)?;
    let mut trie = KmerTrie::new();
    for (row_ref, line) in contents.lines().enumerate() {
        let key = line.split_whitespace().next().unwrap_or("");
        if key.is_empty() {
            continue;
        }
        trie.insert(Key::from(key), row_ref as u64)?;
    }
    Ok(trie)
}

fn print_hits(trie: &KmerTrie<u64>, predicate: &Predicate) {
    let mut hits = trie.search(predicate);
    hits.sort_by(|a, b| a.key.cmp(&b.key).then(a.row_ref.cmp(&b.row_ref)));
    for hit in hits {
        println!("{}\t{}", String::from_utf8_lossy(&hit.key), hit.row_ref);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Equal { keys_file, target } => {
            let trie = load_trie(&keys_file)?;
            print_hits(&trie, &Predicate::equal(Key::from(target.as_str())));
        }
        Commands::Prefix { keys_file, target } => {
            let trie = load_trie(&keys_file)?;
            print_hits(&trie, &Predicate::prefix(Key::from(target.as_str())));
        }
        Commands::Iupac { keys_file, pattern } => {
            let trie = load_trie(&keys_file)?;
            let predicate = Predicate::iupac_contains(Key::from(pattern.as_str()))?;
            print_hits(&trie, &predicate);
        }
        Commands::Stats { keys_file } => {
            let trie = load_trie(&keys_file)?;
            let snap = trie.stats();
            println!("nodes:         {}", trie.node_count());
            println!("inserts:       {}", snap.inserts);
            println!("splits:        {}", snap.splits);
            println!("searches:      {}", snap.searches);
            println!("nodes_visited: {}", snap.nodes_visited);
            println!("leaves_pruned: {}", snap.leaves_pruned);
        }
    }

    Ok(())
}
