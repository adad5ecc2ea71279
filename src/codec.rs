//! Wire codec primitives
//!
//! Little-endian integer and CompactSize varint read/write helpers shared by
//! the transaction, header, and AuxPow codecs. All reads are bounds-checked;
//! truncated streams surface as typed errors, never panics.

use crate::{Error, Hash256, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Upper bound on any single variable-length byte field (scripts).
///
/// Far above anything a real coinbase carries, but low enough that a lying
/// length prefix cannot drive a large allocation.
pub const MAX_VAR_BYTES: usize = 1 << 20;

/// Read a 32-byte hash in internal byte order
pub fn read_hash<R: Read + ?Sized>(r: &mut R) -> Result<Hash256> {
    let mut buf = [0u8; 32];
    r.read_exact(&mut buf)?;
    Ok(Hash256::new(buf))
}

/// Write a 32-byte hash in internal byte order
pub fn write_hash<W: Write + ?Sized>(w: &mut W, hash: &Hash256) -> Result<()> {
    w.write_all(hash.as_bytes())?;
    Ok(())
}

/// Read a Bitcoin CompactSize varint, enforcing canonical encoding
pub fn read_varint<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    let tag = r.read_u8()?;
    match tag {
        0xfd => {
            let value = u64::from(r.read_u16::<LittleEndian>()?);
            if value < 0xfd {
                return Err(Error::malformed("non-canonical varint encoding"));
            }
            Ok(value)
        }
        0xfe => {
            let value = u64::from(r.read_u32::<LittleEndian>()?);
            if value <= u64::from(u16::MAX) {
                return Err(Error::malformed("non-canonical varint encoding"));
            }
            Ok(value)
        }
        0xff => {
            let value = r.read_u64::<LittleEndian>()?;
            if value <= u64::from(u32::MAX) {
                return Err(Error::malformed("non-canonical varint encoding"));
            }
            Ok(value)
        }
        n => Ok(u64::from(n)),
    }
}

/// Write a Bitcoin CompactSize varint
pub fn write_varint<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<()> {
    if value < 0xfd {
        w.write_u8(value as u8)?;
    } else if value <= u64::from(u16::MAX) {
        w.write_u8(0xfd)?;
        w.write_u16::<LittleEndian>(value as u16)?;
    } else if value <= u64::from(u32::MAX) {
        w.write_u8(0xfe)?;
        w.write_u32::<LittleEndian>(value as u32)?;
    } else {
        w.write_u8(0xff)?;
        w.write_u64::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Read a varint-prefixed byte vector (script payloads)
pub fn read_var_bytes<R: Read + ?Sized>(r: &mut R) -> Result<Vec<u8>> {
    let len = read_varint(r)?;
    if len > MAX_VAR_BYTES as u64 {
        return Err(Error::malformed(format!(
            "variable-length field of {} bytes exceeds maximum {}",
            len, MAX_VAR_BYTES
        )));
    }
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Write a varint-prefixed byte vector
pub fn write_var_bytes<W: Write + ?Sized>(w: &mut W, bytes: &[u8]) -> Result<()> {
    write_varint(w, bytes.len() as u64)?;
    w.write_all(bytes)?;
    Ok(())
}
