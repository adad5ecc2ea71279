//! Parent-chain proof-of-work checking
//!
//! The validator delegates the final gate to a [`ParentPowChecker`]: does
//! the parent block header satisfy the parent chain's own difficulty rule?
//! [`BitsChecker`] is the standard implementation, expanding the header's
//! compact `bits` field into a 256-bit target and comparing the header hash
//! against it. Test code and callers with out-of-band knowledge can supply
//! a closure instead.

use crate::{BlockHeader, Hash256};
use byteorder::{ByteOrder, LittleEndian};

/// Difficulty target as a 256-bit threshold
///
/// Stored as 4 little-endian 64-bit words; a header hash, read as a
/// little-endian 256-bit integer, must be at or below the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    words: [u64; 4],
}

impl Target {
    /// Create a target from its 64-bit words, least significant first
    pub fn new(words: [u64; 4]) -> Self {
        Self { words }
    }

    /// Maximum possible target (easiest difficulty)
    pub fn max() -> Self {
        Self::new([u64::MAX; 4])
    }

    /// Expand a compact `bits` representation.
    ///
    /// Returns `None` for the invalid encodings consensus rejects: zero or
    /// sign-flagged mantissa, or a value overflowing 256 bits.
    pub fn from_compact(bits: u32) -> Option<Self> {
        let exponent = (bits >> 24) as u32;
        let mantissa = bits & 0x00ff_ffff;
        if mantissa == 0 || mantissa & 0x0080_0000 != 0 {
            return None;
        }

        let mut words = [0u64; 4];
        if exponent <= 3 {
            words[0] = u64::from(mantissa >> (8 * (3 - exponent)));
        } else {
            let shift = 8 * (exponent - 3);
            let mantissa_bits = 32 - mantissa.leading_zeros();
            // Anything shifted past bit 255 overflows 256 bits
            if shift + mantissa_bits > 256 {
                return None;
            }
            let word = (shift / 64) as usize;
            let rem = shift % 64;
            words[word] |= u64::from(mantissa) << rem;
            if rem > 40 && word + 1 < 4 {
                words[word + 1] = u64::from(mantissa) >> (64 - rem);
            }
        }

        Some(Self { words })
    }

    /// Check whether a hash meets this target (hash <= target)
    pub fn meets(&self, hash: &Hash256) -> bool {
        let bytes = hash.as_bytes();
        for i in (0..4).rev() {
            let hash_word = LittleEndian::read_u64(&bytes[i * 8..(i + 1) * 8]);
            if hash_word < self.words[i] {
                return true;
            }
            if hash_word > self.words[i] {
                return false;
            }
        }
        true
    }
}

/// The parent chain's difficulty rule, consulted as the final gate of
/// AuxPow verification
pub trait ParentPowChecker {
    /// Whether the header satisfies the parent chain's proof-of-work
    fn check(&self, header: &BlockHeader) -> bool;
}

impl<F> ParentPowChecker for F
where
    F: Fn(&BlockHeader) -> bool,
{
    fn check(&self, header: &BlockHeader) -> bool {
        self(header)
    }
}

/// Standard checker: header hash against the target expanded from the
/// header's own `bits` field
#[derive(Debug, Clone, Copy, Default)]
pub struct BitsChecker;

impl ParentPowChecker for BitsChecker {
    fn check(&self, header: &BlockHeader) -> bool {
        match Target::from_compact(header.bits) {
            Some(target) => target.meets(&header.block_hash()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::double_sha256;

    #[test]
    fn test_from_compact_mainnet_limit() {
        // 0x1d00ffff: mantissa 0xffff at byte offset 26
        let target = Target::from_compact(0x1d00ffff).unwrap();
        assert_eq!(target.words, [0, 0, 0, 0x0000_0000_ffff_0000]);

        let zero = Hash256::ZERO;
        assert!(target.meets(&zero));

        let huge = Hash256::new([0xff; 32]);
        assert!(!target.meets(&huge));
    }

    #[test]
    fn test_from_compact_small_exponent() {
        let target = Target::from_compact(0x03123456).unwrap();
        assert_eq!(target.words, [0x123456, 0, 0, 0]);

        let target = Target::from_compact(0x02123456).unwrap();
        assert_eq!(target.words, [0x1234, 0, 0, 0]);

        let target = Target::from_compact(0x01120000).unwrap();
        assert_eq!(target.words, [0x12, 0, 0, 0]);
    }

    #[test]
    fn test_from_compact_invalid() {
        // Zero mantissa
        assert!(Target::from_compact(0x1d000000).is_none());
        // Sign bit set
        assert!(Target::from_compact(0x1d800000).is_none());
        // Overflows 256 bits
        assert!(Target::from_compact(0xff123456).is_none());
    }

    #[test]
    fn test_meets_boundary() {
        let target = Target::new([5, 0, 0, 0]);

        let mut at = [0u8; 32];
        at[0] = 5;
        assert!(target.meets(&Hash256::new(at)));

        let mut above = [0u8; 32];
        above[0] = 6;
        assert!(!target.meets(&Hash256::new(above)));
    }

    #[test]
    fn test_bits_checker_rejects_unmined_header() {
        // A throwaway header will not hash below a hard target
        let header = BlockHeader {
            version: 2,
            prev_block: double_sha256(b"prev"),
            merkle_root: double_sha256(b"root"),
            timestamp: 1_400_000_000,
            bits: 0x1d00ffff,
            nonce: 0,
        };
        assert!(!BitsChecker.check(&header));
    }

    #[test]
    fn test_bits_checker_accepts_mined_header() {
        // bits = 0x207fffff is the easiest valid target; roughly every
        // second nonce hashes below it
        let mut header = BlockHeader {
            version: 2,
            prev_block: double_sha256(b"prev"),
            merkle_root: double_sha256(b"root"),
            timestamp: 1_400_000_000,
            bits: 0x207fffff,
            nonce: 0,
        };
        let mined = (0..1000).any(|nonce| {
            header.nonce = nonce;
            BitsChecker.check(&header)
        });
        assert!(mined);
    }

    #[test]
    fn test_closure_checker() {
        let header = BlockHeader {
            version: 2,
            prev_block: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            timestamp: 0,
            bits: 0,
            nonce: 0,
        };
        let accept = |_: &BlockHeader| true;
        let reject = |_: &BlockHeader| false;
        assert!(accept.check(&header));
        assert!(!reject.check(&header));
    }
}
