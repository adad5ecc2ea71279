//! Hashing primitives for AuxPow verification
//!
//! The parent chain's digest is a double round of SHA-256, applied both to
//! serialized transactions/headers and to concatenated merkle node pairs.

use crate::Hash256;
use sha2::{Digest, Sha256};

/// Compute the chain's standard double SHA-256 digest
pub fn double_sha256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash256::new(second.into())
}

/// Hash two merkle nodes into their parent, left-to-right
pub fn hash_nodes(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    double_sha256(&buf)
}
