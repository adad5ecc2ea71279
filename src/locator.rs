//! Merge-mining commitment locator
//!
//! Finds the 40-byte commitment payload embedded in a parent coinbase
//! signature script. The documented convention anchors the payload with the
//! magic bytes `FA BE 6D 6D` ("mm"), but historical parent-chain miners
//! produced scripts without them, so two raw-byte fallback searches are
//! needed to stay compatible with blocks those miners actually mined.
//!
//! Those miners embedded hashes in display byte order (the reverse of wire
//! order, matching the hex strings their tooling printed): the commitment
//! root is read back reversed, and the fallback needles are the display-order
//! bytes of the hashes being searched for.

use crate::{Error, Hash256, Result};

/// The merged-mining magic byte anchor, `0xfabe` followed by ASCII "mm"
pub const MERGED_MINING_MAGIC: [u8; 4] = [0xfa, 0xbe, 0x6d, 0x6d];

/// Commitment payload length: 32-byte root + i32 size + i32 nonce
pub const COMMITMENT_PAYLOAD_LEN: usize = 40;

/// The commitment a parent coinbase makes to an auxiliary chain's
/// merge-mining tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeMiningCommitment {
    /// Root of the merge-mining merkle tree
    pub root: Hash256,
    /// Declared number of leaves in the merge-mining tree
    pub merkle_size: i32,
    /// Salt mixed into each chain's expected leaf index
    pub merkle_nonce: i32,
}

/// Locate and extract the merge-mining commitment from a coinbase
/// signature script.
///
/// Search strategies, first match wins:
/// 1. the magic anchor; the payload starts right after it,
/// 2. the display-order bytes of `parent_block_hash`; the payload starts at
///    the match,
/// 3. the display-order bytes of `aux_root`, when the caller can supply its
///    chain's candidate tree root to disambiguate multi-chain coinbases.
pub fn locate_commitment(
    script: &[u8],
    parent_block_hash: &Hash256,
    aux_root: Option<&Hash256>,
    magic: &[u8; 4],
) -> Result<MergeMiningCommitment> {
    if let Some(pos) = find(script, magic) {
        return extract(script, pos + magic.len());
    }

    if let Some(pos) = find(script, &parent_block_hash.to_display_bytes()) {
        return extract(script, pos);
    }

    if let Some(root) = aux_root {
        if let Some(pos) = find(script, &root.to_display_bytes()) {
            return extract(script, pos);
        }
    }

    Err(Error::CommitmentNotFound)
}

/// First occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Parse the 40-byte payload starting at `offset`
fn extract(script: &[u8], offset: usize) -> Result<MergeMiningCommitment> {
    let end = offset
        .checked_add(COMMITMENT_PAYLOAD_LEN)
        .filter(|&end| end <= script.len())
        .ok_or_else(|| Error::malformed("merge-mining commitment payload truncated"))?;
    let payload = &script[offset..end];

    // The embedded root is in display byte order
    let mut root_bytes = [0u8; 32];
    root_bytes.copy_from_slice(&payload[..32]);
    root_bytes.reverse();
    let root = Hash256::new(root_bytes);
    let mut word = [0u8; 4];
    word.copy_from_slice(&payload[32..36]);
    let merkle_size = i32::from_le_bytes(word);
    word.copy_from_slice(&payload[36..40]);
    let merkle_nonce = i32::from_le_bytes(word);

    Ok(MergeMiningCommitment {
        root,
        merkle_size,
        merkle_nonce,
    })
}
