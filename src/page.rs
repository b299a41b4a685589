// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size page encoding for node payloads.
//!
//! Every node, inner or leaf, is serialized into one `config::PAGE_SIZE`
//! page: a small header (magic, node-kind flag, payload length, CRC32)
//! followed by a `bincode`-encoded payload, split header-plus-checksummed-
//! data. The arena in `trie` holds nodes in memory, so a page here is a
//! pure in-memory encode/decode unit used to enforce the
//! single-page-per-node invariant and to give callers a stable byte
//! format if they want to persist the arena themselves.

use crate::config::PAGE_SIZE;
use crate::error::{TrieError, TrieResult};
use crate::node::{InnerNode, LeafNode};
use serde::de::DeserializeOwned;
use serde::Serialize;

const MAGIC: u32 = 0x4B4D_5254; // "KMRT"
const HEADER_SIZE: usize = 11; // magic(4) + flag(1) + len(2) + checksum(4)
const DATA_SIZE: usize = PAGE_SIZE - HEADER_SIZE;

const FLAG_LEAF: u8 = 1;
const FLAG_INNER: u8 = 0;

/// One encoded node page.
#[derive(Debug, Clone)]
pub struct Page {
    is_leaf: bool,
    payload: Vec<u8>,
}

impl Page {
    /// Encode an inner node into a page.
    pub fn encode_inner(node: &InnerNode) -> TrieResult<Self> {
        Self::encode(false, node)
    }

    /// Encode a leaf node into a page.
    pub fn encode_leaf<R: Serialize>(leaf: &LeafNode<R>) -> TrieResult<Self> {
        Self::encode(true, leaf)
    }

    fn encode<T: Serialize>(is_leaf: bool, value: &T) -> TrieResult<Self> {
        let payload = bincode::serialize(value).map_err(|e| TrieError::SerializationError {
            reason: e.to_string(),
        })?;
        if HEADER_SIZE + payload.len() > PAGE_SIZE {
            return Err(TrieError::TreeInvariantViolated {
                reason: format!(
                    "encoded node is {} bytes, exceeds page capacity of {DATA_SIZE}",
                    payload.len()
                ),
            });
        }
        Ok(Self { is_leaf, payload })
    }

    /// Decode an inner node previously produced by `encode_inner`.
    pub fn decode_inner(&self) -> TrieResult<InnerNode> {
        if self.is_leaf {
            return Err(TrieError::CorruptNode {
                reason: "expected inner page, found leaf page".to_string(),
            });
        }
        bincode::deserialize(&self.payload).map_err(|e| TrieError::DeserializationError {
            reason: e.to_string(),
        })
    }

    /// Decode a leaf node previously produced by `encode_leaf`.
    pub fn decode_leaf<R: DeserializeOwned>(&self) -> TrieResult<LeafNode<R>> {
        if !self.is_leaf {
            return Err(TrieError::CorruptNode {
                reason: "expected leaf page, found inner page".to_string(),
            });
        }
        bincode::deserialize(&self.payload).map_err(|e| TrieError::DeserializationError {
            reason: e.to_string(),
        })
    }

    /// Serialize this page to its fixed-size on-wire form: header then
    /// payload, zero-padded to `PAGE_SIZE`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let checksum = crc32fast::hash(&self.payload);
        let mut out = Vec::with_capacity(PAGE_SIZE);
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.push(if self.is_leaf { FLAG_LEAF } else { FLAG_INNER });
        out.extend_from_slice(&(self.payload.len() as u16).to_le_bytes());
        out.extend_from_slice(&checksum.to_le_bytes());
        out.extend_from_slice(&self.payload);
        out.resize(PAGE_SIZE, 0);
        out
    }

    /// Parse a page from exactly `PAGE_SIZE` bytes, validating the magic
    /// number and the CRC32 checksum over the payload.
    pub fn from_bytes(bytes: &[u8]) -> TrieResult<Self> {
        if bytes.len() != PAGE_SIZE {
            return Err(TrieError::CorruptNode {
                reason: format!("page must be {PAGE_SIZE} bytes, got {}", bytes.len()),
            });
        }

        let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        if magic != MAGIC {
            return Err(TrieError::CorruptNode {
                reason: format!("bad page magic: 0x{magic:08X}"),
            });
        }

        let is_leaf = match bytes[4] {
            FLAG_LEAF => true,
            FLAG_INNER => false,
            other => {
                return Err(TrieError::CorruptNode {
                    reason: format!("unrecognised page flag byte: {other}"),
                })
            }
        };

        let payload_len = u16::from_le_bytes(bytes[5..7].try_into().unwrap()) as usize;
        let checksum = u32::from_le_bytes(bytes[7..11].try_into().unwrap());

        if HEADER_SIZE + payload_len > bytes.len() {
            return Err(TrieError::CorruptNode {
                reason: "page payload length exceeds page bounds".to_string(),
            });
        }
        let payload = bytes[HEADER_SIZE..HEADER_SIZE + payload_len].to_vec();

        if crc32fast::hash(&payload) != checksum {
            return Err(TrieError::CorruptNode {
                reason: "CRC32 mismatch on page payload".to_string(),
            });
        }

        Ok(Self { is_leaf, payload })
    }
}
