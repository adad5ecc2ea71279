//! Core types for AuxPow verification
//!
//! Fundamental value types shared by the codec, locator, and validator,
//! with hex display and JSON serialization.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte chain hash (block hash, transaction id, or merkle node).
///
/// Stored in internal (wire) byte order; displayed as reversed hex, the
/// convention parent-chain tooling uses for block and transaction hashes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// Hash size in bytes
    pub const SIZE: usize = 32;

    /// The all-zero hash
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Create a hash from its internal byte order representation
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a hash from a byte slice in internal byte order
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SIZE {
            return Err(Error::malformed(format!(
                "invalid hash length: expected {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(bytes);
        Ok(Self(array))
    }

    /// Get the hash bytes in internal byte order
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Get the hash bytes in display byte order (reversed)
    pub fn to_display_bytes(&self) -> [u8; 32] {
        let mut reversed = self.0;
        reversed.reverse();
        reversed
    }

    /// Convert to reversed-hex string (display byte order)
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_display_bytes())
    }
}

impl FromStr for Hash256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 64 {
            return Err(Error::malformed(format!(
                "invalid hash hex length: expected 64 chars, got {}",
                s.len()
            )));
        }
        let mut bytes = hex::decode(s)
            .map_err(|e| Error::malformed(format!("invalid hex in hash: {}", e)))?;
        bytes.reverse();
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash256::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Auxiliary chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId(pub u32);

impl ChainId {
    /// Create a new chain ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the chain ID value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Ok(ChainId::new(id))
    }
}
