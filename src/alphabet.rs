// Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Nucleotide and IUPAC alphabet codec.
//!
//! Maps single-byte nucleotide/ambiguity characters to 4-bit masks over
//! {A,C,G,T} and reduces pattern matching to one bitwise AND. This is the
//! leaf dependency of every other module in the crate — nothing here
//! reaches into `node`/`insert`/`search`.
//!
//! ## Bit layout
//! ```text
//! bit 0 (0001) = A
//! bit 1 (0010) = C
//! bit 2 (0100) = G
//! bit 3 (1000) = T
//! ```

use crate::error::{TrieError, TrieResult};

/// Bit for adenine.
pub const A: u8 = 0b0001;
/// Bit for cytosine.
pub const C: u8 = 0b0010;
/// Bit for guanine.
pub const G: u8 = 0b0100;
/// Bit for thymine.
pub const T: u8 = 0b1000;

/// Every nucleotide bit set; the mask for IUPAC `N`.
pub const ANY: u8 = A | C | G | T;

/// Map a key byte to its 4-bit nucleotide mask.
///
/// ## Error Conditions
/// - `byte` is anything other than upper- or lower-case A/C/G/T.
pub fn nuc_bits(byte: u8) -> TrieResult<u8> {
    match byte.to_ascii_uppercase() {
        b'A' => Ok(A),
        b'C' => Ok(C),
        b'G' => Ok(G),
        b'T' => Ok(T),
        _ => Err(TrieError::InvalidNucleotide { byte }),
    }
}

/// Map an IUPAC pattern byte to the union of its constituent nucleotide
/// bits.
///
/// ## Error Conditions
/// - `byte` is outside the 15-letter IUPAC ambiguity alphabet.
pub fn iupac_bits(byte: u8) -> TrieResult<u8> {
    match byte.to_ascii_uppercase() {
        b'A' => Ok(A),
        b'C' => Ok(C),
        b'G' => Ok(G),
        b'T' => Ok(T),
        b'R' => Ok(A | G),
        b'Y' => Ok(C | T),
        b'S' => Ok(C | G),
        b'W' => Ok(A | T),
        b'K' => Ok(G | T),
        b'M' => Ok(A | C),
        b'B' => Ok(C | G | T),
        b'D' => Ok(A | G | T),
        b'H' => Ok(A | C | T),
        b'V' => Ok(A | C | G),
        b'N' => Ok(ANY),
        _ => Err(TrieError::InvalidIupac { byte }),
    }
}

/// Does pattern byte `p` admit key byte `k`?
///
/// `pattern_matches(p, k) == (iupac_bits(p) & nuc_bits(k) != 0)`. Both
/// bytes must already be valid in their respective alphabets; this
/// function never itself returns an error so inner-node pruning stays
/// branch-free on the hot path (callers validate once, at the I/O
/// boundary, where alphabet errors are assigned to construction).
pub fn pattern_matches(p_bits: u8, k_bits: u8) -> bool {
    p_bits & k_bits != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nuc_bits_maps_all_four_letters() {
        assert_eq!(nuc_bits(b'A').unwrap(), A);
        assert_eq!(nuc_bits(b'C').unwrap(), C);
        assert_eq!(nuc_bits(b'G').unwrap(), G);
        assert_eq!(nuc_bits(b'T').unwrap(), T);
    }

    #[test]
    fn nuc_bits_is_case_insensitive() {
        assert_eq!(nuc_bits(b'a').unwrap(), A);
        assert_eq!(nuc_bits(b't').unwrap(), T);
    }

    #[test]
    fn nuc_bits_rejects_non_nucleotide() {
        assert_eq!(nuc_bits(b'N'), Err(TrieError::InvalidNucleotide { byte: b'N' }));
        assert!(nuc_bits(b'x').is_err());
    }

    #[test]
    fn iupac_bits_covers_all_fifteen_letters() {
        let expected: &[(u8, u8)] = &[
            (b'A', A),
            (b'C', C),
            (b'G', G),
            (b'T', T),
            (b'R', A | G),
            (b'Y', C | T),
            (b'S', C | G),
            (b'W', A | T),
            (b'K', G | T),
            (b'M', A | C),
            (b'B', C | G | T),
            (b'D', A | G | T),
            (b'H', A | C | T),
            (b'V', A | C | G),
            (b'N', ANY),
        ];
        for (letter, bits) in expected {
            assert_eq!(iupac_bits(*letter).unwrap(), *bits, "letter {}", *letter as char);
        }
    }

    #[test]
    fn iupac_bits_rejects_unknown_letter() {
        assert!(iupac_bits(b'Z').is_err());
    }

    #[test]
    fn pattern_matches_is_bitwise_and_nonzero() {
        for k in [A, C, G, T] {
            for p in 0u8..16 {
                assert_eq!(pattern_matches(p, k), (p & k) != 0);
            }
        }
    }

    #[test]
    fn n_matches_every_nucleotide() {
        let n = iupac_bits(b'N').unwrap();
        for k in [b'A', b'C', b'G', b'T'] {
            assert!(pattern_matches(n, nuc_bits(k).unwrap()));
        }
    }

    #[test]
    fn pattern_matches_holds_for_all_k_iff_p_is_n() {
        // pattern_matches(p, k) holds for all k iff p == 'N'.
        for p_byte in 0u8..=255 {
            let Ok(p) = iupac_bits(p_byte) else { continue };
            let matches_all = [A, C, G, T].iter().all(|&k| pattern_matches(p, k));
            assert_eq!(matches_all, p_byte.to_ascii_uppercase() == b'N');
        }
    }
}
