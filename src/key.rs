// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Variable-length key buffer with short/long header encoding.
//!
//! `Key` is the owning byte-string value shared by every layer above it:
//! indexed keys, node prefixes, and leaf residuals are all `Key`s. The
//! header encoding uses a small tag byte to decide how much follows,
//! applied here to length prefixes instead of whole pages.

use crate::config::MAX_KEY_LEN;
use crate::error::{TrieError, TrieResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes consumed by the short-header length prefix.
pub const SHORT_HDR: usize = 1;

/// Largest length a short header can represent directly. Values at or
/// above this use the long-header encoding (a `0xFF` marker followed by
/// a little-endian `u16`).
pub const SHORT_MAX: usize = 0xFF;

/// Owning variable-length byte string, canonically upper-case for keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(Vec<u8>);

impl Key {
    /// Build a key from raw bytes, enforcing the indexed-key length bound.
    ///
    /// Alphabet validation is the I/O boundary's job;
    /// this only enforces the length invariant the trie core depends on.
    pub fn new(bytes: Vec<u8>) -> TrieResult<Self> {
        if bytes.len() > MAX_KEY_LEN {
            return Err(TrieError::KeyTooLong { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    /// Build a key without enforcing `MAX_KEY_LEN`, for reconstruction
    /// buffers during traversal that temporarily concatenate residuals
    /// longer than one indexed key ever is (see `search::Reconstruction`).
    pub fn unbounded(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the longest shared prefix of `a` and `b`.
    pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
        a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
    }

    /// Owning copy of `self[start..]`.
    pub fn suffix(&self, start: usize) -> Key {
        Key::unbounded(self.0[start.min(self.0.len())..].to_vec())
    }

    /// Owning copy of `a ++ b`.
    pub fn concat(a: &[u8], b: &[u8]) -> Key {
        let mut out = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a);
        out.extend_from_slice(b);
        Key::unbounded(out)
    }

    /// Append one byte, returning a new owning key (used when
    /// reconstructing a partial key with a label byte).
    pub fn push_byte(&self, byte: u8) -> Key {
        let mut out = self.0.clone();
        out.push(byte);
        Key::unbounded(out)
    }

    /// Encode `self` using the short/long header scheme and append to
    /// `out`. The choice is invisible to callers of `decode_from`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        if SHORT_HDR + self.0.len() <= SHORT_MAX {
            out.push(self.0.len() as u8);
        } else {
            out.push(0xFF);
            out.extend_from_slice(&(self.0.len() as u16).to_le_bytes());
        }
        out.extend_from_slice(&self.0);
    }

    /// Decode a key previously written by `encode_into`. Returns the key
    /// and the number of bytes consumed from `bytes`.
    pub fn decode_from(bytes: &[u8]) -> TrieResult<(Key, usize)> {
        if bytes.is_empty() {
            return Err(TrieError::CorruptNode {
                reason: "key header truncated".to_string(),
            });
        }
        let (len, header_len) = if bytes[0] == 0xFF {
            if bytes.len() < 3 {
                return Err(TrieError::CorruptNode {
                    reason: "long key header truncated".to_string(),
                });
            }
            let len = u16::from_le_bytes([bytes[1], bytes[2]]) as usize;
            (len, 3)
        } else {
            (bytes[0] as usize, 1)
        };
        if bytes.len() < header_len + len {
            return Err(TrieError::CorruptNode {
                reason: "key payload truncated".to_string(),
            });
        }
        let payload = bytes[header_len..header_len + len].to_vec();
        Ok((Key::unbounded(payload), header_len + len))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::unbounded(s.as_bytes().to_vec())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
