// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the k-mer trie core.
//!
//! One flat enum, matched exhaustively in `Display`, with no hidden
//! `From` conversions obscuring where an error actually came from.

use std::fmt;

/// Standard `Result` type for all trie operations.
pub type TrieResult<T> = Result<T, TrieError>;

/// Error types surfaced by the k-mer trie core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// Character outside {A,C,G,T} found in a key.
    InvalidNucleotide { byte: u8 },

    /// Character outside the 15-letter IUPAC set found in a pattern.
    InvalidIupac { byte: u8 },

    /// Key length exceeds `config::MAX_KEY_LEN`.
    KeyTooLong { len: usize },

    /// Pattern length exceeds `config::MAX_PATTERN_LEN`.
    PatternTooLong { len: usize },

    /// External driver invoked with an unrecognised strategy number.
    UnsupportedStrategy { strategy: i16 },

    /// Internal inconsistency: unsorted/duplicate labels, prefix over
    /// `MAX_PREFIX`, or a label array that cannot take another entry.
    TreeInvariantViolated { reason: String },

    /// A node page failed structural validation at read time.
    CorruptNode { reason: String },

    /// Page payload could not be encoded.
    SerializationError { reason: String },

    /// Page payload could not be decoded.
    DeserializationError { reason: String },

    /// I/O failure from the arena's optional dump/load helpers.
    IoError { operation: String, reason: String },
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNucleotide { byte } => {
                write!(f, "invalid nucleotide byte: 0x{byte:02X}")
            }
            Self::InvalidIupac { byte } => {
                write!(f, "invalid IUPAC byte: 0x{byte:02X}")
            }
            Self::KeyTooLong { len } => {
                write!(f, "key length {len} exceeds maximum of {}", crate::config::MAX_KEY_LEN)
            }
            Self::PatternTooLong { len } => {
                write!(f, "pattern length {len} exceeds maximum of {}", crate::config::MAX_PATTERN_LEN)
            }
            Self::UnsupportedStrategy { strategy } => {
                write!(f, "unsupported strategy number: {strategy}")
            }
            Self::TreeInvariantViolated { reason } => {
                write!(f, "trie invariant violated: {reason}")
            }
            Self::CorruptNode { reason } => {
                write!(f, "corrupt node: {reason}")
            }
            Self::SerializationError { reason } => {
                write!(f, "serialization error: {reason}")
            }
            Self::DeserializationError { reason } => {
                write!(f, "deserialization error: {reason}")
            }
            Self::IoError { operation, reason } => {
                write!(f, "I/O error during '{operation}': {reason}")
            }
        }
    }
}

impl std::error::Error for TrieError {}
