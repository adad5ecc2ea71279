//! AuxPow Verification Engine
//!
//! Merged-mining proof verification for auxiliary proof-of-work chains:
//! - locating the merge-mining commitment in a parent coinbase script
//! - generic merkle branch verification with side-mask semantics
//! - the chain-index anti-forgery rule for multi-chain merged mining
//! - wire codecs for the AuxPow object and its nested structures
//! - delegation to the parent chain's own difficulty rule
//!
//! Everything is a pure function over its inputs; independent proofs can
//! be verified in parallel with no shared state.

pub mod auxpow;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod header;
pub mod locator;
pub mod merkle;
pub mod pow;
pub mod tx;
pub mod types;
pub mod validator;

pub use auxpow::{AuxPow, DEFAULT_MAX_BRANCH_DEPTH};
pub use error::{Error, Result};
pub use header::BlockHeader;
pub use locator::{MergeMiningCommitment, MERGED_MINING_MAGIC};
pub use merkle::MerkleBranch;
pub use pow::{BitsChecker, ParentPowChecker, Target};
pub use tx::Transaction;
pub use types::{ChainId, Hash256};
pub use validator::{AuxPowValidator, ValidatorConfig};

/// Application information
pub const APP_NAME: &str = "auxpow-engine";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
