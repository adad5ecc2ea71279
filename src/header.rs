//! Parent-chain block header wire type
//!
//! The fixed 80-byte header carried at the tail of every AuxPow proof. The
//! header's own proof-of-work is what the auxiliary chain ultimately accepts
//! as work for its block.

use crate::{codec, crypto, Hash256, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Version bit set on auxiliary-chain headers that carry an AuxPow payload
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// First version bit of the embedded auxiliary chain id
pub const VERSION_CHAIN_START: i32 = 1 << 16;

/// One past the last version bit of the embedded auxiliary chain id
pub const VERSION_CHAIN_END: i32 = 1 << 30;

/// An 80-byte block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block: Hash256,
    pub merkle_root: Hash256,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialized header size in bytes
    pub const SIZE: usize = 80;

    /// Decode a header from its wire representation
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let version = r.read_i32::<LittleEndian>()?;
        let prev_block = codec::read_hash(r)?;
        let merkle_root = codec::read_hash(r)?;
        let timestamp = r.read_u32::<LittleEndian>()?;
        let bits = r.read_u32::<LittleEndian>()?;
        let nonce = r.read_u32::<LittleEndian>()?;

        Ok(Self {
            version,
            prev_block,
            merkle_root,
            timestamp,
            bits,
            nonce,
        })
    }

    /// Encode the header to its wire representation
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_i32::<LittleEndian>(self.version)?;
        codec::write_hash(w, &self.prev_block)?;
        codec::write_hash(w, &self.merkle_root)?;
        w.write_u32::<LittleEndian>(self.timestamp)?;
        w.write_u32::<LittleEndian>(self.bits)?;
        w.write_u32::<LittleEndian>(self.nonce)?;
        Ok(())
    }

    /// Compute the block hash: double SHA-256 of the 80 header bytes
    pub fn block_hash(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(Self::SIZE);
        self.encode(&mut buf).unwrap();
        crypto::double_sha256(&buf)
    }

    /// Whether the version signals an attached AuxPow payload
    pub fn has_auxpow(&self) -> bool {
        self.version & VERSION_AUXPOW != 0
    }

    /// The auxiliary chain id embedded in the high version bits
    pub fn version_chain_id(&self) -> u32 {
        ((self.version >> 16) & 0x3fff) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 2,
            prev_block: crypto::double_sha256(b"prev"),
            merkle_root: crypto::double_sha256(b"root"),
            timestamp: 1_395_000_000,
            bits: 0x1d00ffff,
            nonce: 0x9a8b7c6d,
        }
    }

    #[test]
    fn test_round_trip_is_80_bytes() {
        let header = sample_header();
        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), BlockHeader::SIZE);

        let decoded = BlockHeader::decode(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_decode_truncated() {
        let mut buf = Vec::new();
        sample_header().encode(&mut buf).unwrap();
        buf.truncate(79);
        assert!(BlockHeader::decode(&mut Cursor::new(&buf)).is_err());
    }

    #[test]
    fn test_block_hash_depends_on_nonce() {
        let header = sample_header();
        let mut other = header;
        other.nonce += 1;
        assert_ne!(header.block_hash(), other.block_hash());
    }

    #[test]
    fn test_version_flags() {
        let mut header = sample_header();
        assert!(!header.has_auxpow());

        header.version = 1 | VERSION_AUXPOW | (9 * VERSION_CHAIN_START);
        assert!(header.has_auxpow());
        assert_eq!(header.version_chain_id(), 9);
    }
}
