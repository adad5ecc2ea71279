//! Merkle inclusion branches
//!
//! A branch is the ordered list of sibling hashes from a leaf up to the
//! root, plus a side mask selecting which side each sibling combines on.
//! Bit *i* of the mask is 0 when the sibling at level *i* goes on the right
//! of the accumulated hash and 1 when it goes on the left; read as an
//! integer, the low bits of the mask are therefore the leaf's index.

use crate::{codec, crypto, Error, Hash256, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// A merkle inclusion proof, leaf-to-root order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleBranch {
    /// Sibling hashes, one per tree level
    pub hashes: Vec<Hash256>,
    /// Per-level side selector; bit i = 1 puts the level-i sibling on the left
    pub side_mask: i32,
}

impl MerkleBranch {
    /// Create a new branch
    pub fn new(hashes: Vec<Hash256>, side_mask: i32) -> Self {
        Self { hashes, side_mask }
    }

    /// Number of tree levels the branch spans
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the branch is a trivial single-leaf proof
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Reduce a leaf hash through the branch to the implied root.
    ///
    /// Pure: the caller compares the result against the expected root.
    pub fn compute_root(&self, leaf: &Hash256) -> Hash256 {
        let mut accumulated = *leaf;
        for (level, sibling) in self.hashes.iter().enumerate() {
            accumulated = if (self.side_mask >> level) & 1 == 0 {
                crypto::hash_nodes(&accumulated, sibling)
            } else {
                crypto::hash_nodes(sibling, &accumulated)
            };
        }
        accumulated
    }

    /// The leaf index encoded by the side mask's low bits
    pub fn implied_index(&self) -> u32 {
        let mask = match self.hashes.len() {
            n if n >= 32 => u32::MAX,
            n => (1u32 << n) - 1,
        };
        (self.side_mask as u32) & mask
    }

    /// Decode a branch, rejecting depths above `max_depth`.
    ///
    /// The cap bounds both worst-case verification cost and the range of
    /// representable leaf positions; an over-deep branch is a malformed
    /// proof, never silently truncated.
    pub fn decode<R: Read + ?Sized>(r: &mut R, max_depth: usize) -> Result<Self> {
        let count = codec::read_varint(r)?;
        if count > max_depth as u64 {
            return Err(Error::malformed(format!(
                "merkle branch of {} levels exceeds maximum depth {}",
                count, max_depth
            )));
        }
        let mut hashes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            hashes.push(codec::read_hash(r)?);
        }
        let side_mask = r.read_i32::<LittleEndian>()?;
        Ok(Self { hashes, side_mask })
    }

    /// Encode the branch to its wire representation
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        codec::write_varint(w, self.hashes.len() as u64)?;
        for hash in &self.hashes {
            codec::write_hash(w, hash)?;
        }
        w.write_i32::<LittleEndian>(self.side_mask)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{double_sha256, hash_nodes};
    use proptest::prelude::*;
    use std::io::Cursor;

    fn h(tag: &[u8]) -> Hash256 {
        double_sha256(tag)
    }

    #[test]
    fn test_empty_branch_is_identity() {
        let leaf = h(b"leaf");
        let branch = MerkleBranch::new(vec![], 0);
        assert_eq!(branch.compute_root(&leaf), leaf);
        assert_eq!(branch.implied_index(), 0);
    }

    #[test]
    fn test_single_level_sides() {
        let leaf = h(b"leaf");
        let sibling = h(b"sibling");

        let right = MerkleBranch::new(vec![sibling], 0);
        assert_eq!(right.compute_root(&leaf), hash_nodes(&leaf, &sibling));
        assert_eq!(right.implied_index(), 0);

        let left = MerkleBranch::new(vec![sibling], 1);
        assert_eq!(left.compute_root(&leaf), hash_nodes(&sibling, &leaf));
        assert_eq!(left.implied_index(), 1);
    }

    #[test]
    fn test_two_level_path() {
        // Leaf at index 2 of a four-leaf tree: right child at level 0,
        // left child at level 1, so mask = 0b10.
        let leaves: Vec<Hash256> = (0u8..4).map(|i| h(&[i])).collect();
        let n01 = hash_nodes(&leaves[0], &leaves[1]);
        let n23 = hash_nodes(&leaves[2], &leaves[3]);
        let root = hash_nodes(&n01, &n23);

        let branch = MerkleBranch::new(vec![leaves[3], n01], 0b10);
        assert_eq!(branch.compute_root(&leaves[2]), root);
        assert_eq!(branch.implied_index(), 2);
    }

    #[test]
    fn test_implied_index_uses_only_low_bits() {
        let branch = MerkleBranch::new(vec![h(b"a"), h(b"b")], 0b111);
        assert_eq!(branch.implied_index(), 0b11);
    }

    #[test]
    fn test_decode_rejects_over_deep_branch() {
        let hashes: Vec<Hash256> = (0u8..5).map(|i| h(&[i])).collect();
        let branch = MerkleBranch::new(hashes, 0);
        let mut buf = Vec::new();
        branch.encode(&mut buf).unwrap();

        assert!(MerkleBranch::decode(&mut Cursor::new(&buf), 4).is_err());
        assert!(MerkleBranch::decode(&mut Cursor::new(&buf), 5).is_ok());
    }

    #[test]
    fn test_decode_truncated_sibling_list() {
        let branch = MerkleBranch::new(vec![h(b"a"), h(b"b")], 0);
        let mut buf = Vec::new();
        branch.encode(&mut buf).unwrap();
        buf.truncate(1 + 32 + 10);

        assert!(MerkleBranch::decode(&mut Cursor::new(&buf), 30).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            levels in proptest::collection::vec(any::<[u8; 32]>(), 0..12),
            side_mask in any::<i32>(),
        ) {
            let hashes: Vec<Hash256> = levels.into_iter().map(Hash256::new).collect();
            let branch = MerkleBranch::new(hashes, side_mask);
            let mut buf = Vec::new();
            branch.encode(&mut buf).unwrap();

            let decoded = MerkleBranch::decode(&mut Cursor::new(&buf), 12).unwrap();
            prop_assert_eq!(decoded, branch);
        }

        #[test]
        fn prop_root_deterministic_and_order_sensitive(
            leaf in any::<[u8; 32]>(),
            levels in proptest::collection::vec(any::<[u8; 32]>(), 2..8),
            side_mask in any::<i32>(),
        ) {
            let leaf = Hash256::new(leaf);
            let hashes: Vec<Hash256> = levels.into_iter().map(Hash256::new).collect();
            let branch = MerkleBranch::new(hashes.clone(), side_mask);

            let root = branch.compute_root(&leaf);
            prop_assert_eq!(root, branch.compute_root(&leaf));

            // Swapping two distinct siblings must change the result
            if hashes[0] != hashes[1] {
                let mut swapped = hashes;
                swapped.swap(0, 1);
                let permuted = MerkleBranch::new(swapped, side_mask);
                prop_assert_ne!(root, permuted.compute_root(&leaf));
            }
        }
    }
}
