//! Parent-chain transaction wire type
//!
//! A minimal transaction codec covering what an AuxPow proof carries: the
//! parent block's coinbase transaction, whose signature script embeds the
//! merge-mining commitment. Layout follows the parent chain's standard
//! pre-witness transaction format.

use crate::{codec, crypto, Error, Hash256, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Upper bound on declared input/output counts before reading them.
///
/// Each entry costs at least 9 wire bytes, so a truthful count above this
/// would exceed any sane block size anyway.
const MAX_TX_ITEMS: u64 = 100_000;

/// Reference to an output of a previous transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The null outpoint used by coinbase inputs
    pub fn null() -> Self {
        Self {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub previous_output: OutPoint,
    /// For a coinbase input this is miner-controlled free-form data,
    /// which is where the merge-mining commitment lives.
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: i64,
    pub pk_script: Vec<u8>,
}

/// A parent-chain transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Decode a transaction from its wire representation
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
        let version = r.read_i32::<LittleEndian>()?;

        let input_count = codec::read_varint(r)?;
        if input_count > MAX_TX_ITEMS {
            return Err(Error::malformed(format!(
                "transaction declares {} inputs, maximum is {}",
                input_count, MAX_TX_ITEMS
            )));
        }
        let mut inputs = Vec::with_capacity(input_count.min(1024) as usize);
        for _ in 0..input_count {
            let txid = codec::read_hash(r)?;
            let vout = r.read_u32::<LittleEndian>()?;
            let signature_script = codec::read_var_bytes(r)?;
            let sequence = r.read_u32::<LittleEndian>()?;
            inputs.push(TxIn {
                previous_output: OutPoint { txid, vout },
                signature_script,
                sequence,
            });
        }

        let output_count = codec::read_varint(r)?;
        if output_count > MAX_TX_ITEMS {
            return Err(Error::malformed(format!(
                "transaction declares {} outputs, maximum is {}",
                output_count, MAX_TX_ITEMS
            )));
        }
        let mut outputs = Vec::with_capacity(output_count.min(1024) as usize);
        for _ in 0..output_count {
            let value = r.read_i64::<LittleEndian>()?;
            let pk_script = codec::read_var_bytes(r)?;
            outputs.push(TxOut { value, pk_script });
        }

        let lock_time = r.read_u32::<LittleEndian>()?;

        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Encode the transaction to its wire representation
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_i32::<LittleEndian>(self.version)?;

        codec::write_varint(w, self.inputs.len() as u64)?;
        for input in &self.inputs {
            codec::write_hash(w, &input.previous_output.txid)?;
            w.write_u32::<LittleEndian>(input.previous_output.vout)?;
            codec::write_var_bytes(w, &input.signature_script)?;
            w.write_u32::<LittleEndian>(input.sequence)?;
        }

        codec::write_varint(w, self.outputs.len() as u64)?;
        for output in &self.outputs {
            w.write_i64::<LittleEndian>(output.value)?;
            codec::write_var_bytes(w, &output.pk_script)?;
        }

        w.write_u32::<LittleEndian>(self.lock_time)?;
        Ok(())
    }

    /// Compute the transaction id: double SHA-256 of the wire encoding
    pub fn txid(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(256);
        self.encode(&mut buf).unwrap();
        crypto::double_sha256(&buf)
    }

    /// Whether this is a coinbase transaction (single null-outpoint input)
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output == OutPoint::null()
    }
}
