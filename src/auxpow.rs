//! The auxiliary proof-of-work object
//!
//! Wire layout: coinbase transaction, 32-byte parent block hash, coinbase
//! merkle branch, blockchain merkle branch, 80-byte parent block header.
//! An AuxPow is meaningful only together with the auxiliary block hash it
//! claims to prove; that hash is supplied by the caller at verification
//! time and is never part of the object itself.

use crate::{codec, BlockHeader, Hash256, MerkleBranch, Result, Transaction};
use std::io::{Cursor, Read, Write};

/// Default cap on merkle branch depth accepted from the wire.
///
/// Bounds per-proof verification cost and keeps every representable leaf
/// index inside an i32 side mask.
pub const DEFAULT_MAX_BRANCH_DEPTH: usize = 30;

/// An auxiliary proof-of-work: parent-chain evidence that work was
/// performed on behalf of an auxiliary block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxPow {
    /// The parent block's coinbase transaction carrying the commitment
    pub coinbase_tx: Transaction,
    /// Hash of the parent block header, used as a fallback commitment anchor
    pub parent_block_hash: Hash256,
    /// Proves the coinbase is included in the parent block's tx tree
    pub coinbase_branch: MerkleBranch,
    /// Proves the auxiliary block hash is included in the merge-mining tree
    pub blockchain_branch: MerkleBranch,
    /// The parent header whose proof-of-work backs the auxiliary block
    pub parent_block_header: BlockHeader,
}

impl AuxPow {
    /// Decode an AuxPow from a byte stream
    pub fn decode<R: Read + ?Sized>(r: &mut R, max_branch_depth: usize) -> Result<Self> {
        let coinbase_tx = Transaction::decode(r)?;
        let parent_block_hash = codec::read_hash(r)?;
        let coinbase_branch = MerkleBranch::decode(r, max_branch_depth)?;
        let blockchain_branch = MerkleBranch::decode(r, max_branch_depth)?;
        let parent_block_header = BlockHeader::decode(r)?;

        Ok(Self {
            coinbase_tx,
            parent_block_hash,
            coinbase_branch,
            blockchain_branch,
            parent_block_header,
        })
    }

    /// Encode the AuxPow to a byte stream
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.coinbase_tx.encode(w)?;
        codec::write_hash(w, &self.parent_block_hash)?;
        self.coinbase_branch.encode(w)?;
        self.blockchain_branch.encode(w)?;
        self.parent_block_header.encode(w)?;
        Ok(())
    }

    /// Decode an AuxPow from a byte slice
    pub fn from_bytes(bytes: &[u8], max_branch_depth: usize) -> Result<Self> {
        Self::decode(&mut Cursor::new(bytes), max_branch_depth)
    }

    /// Encode the AuxPow to a byte vector
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        self.encode(&mut buf).unwrap();
        buf
    }
}
