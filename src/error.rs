//! Error handling for the AuxPow verification engine.
//!
//! Every failure is a typed rejection. A malicious peer supplying a bad
//! proof must only ever cause that proof to be rejected; malformed input
//! is never a panic and never a partial result.

use thiserror::Error;

/// Result type alias for AuxPow verification operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the AuxPow verification engine
#[derive(Error, Debug)]
pub enum Error {
    /// Truncated or structurally invalid wire bytes
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// None of the commitment locator strategies matched
    #[error("merge-mining commitment not found in coinbase")]
    CommitmentNotFound,

    /// Declared merge-mining tree size inconsistent with the branch depth
    #[error("invalid merkle tree size: {message}")]
    InvalidTreeSize { message: String },

    /// Expected chain leaf index disagrees with the branch's encoded path
    #[error("chain merkle index mismatch: expected {expected}, branch encodes {actual}")]
    ChainIndexMismatch { expected: u32, actual: u32 },

    /// A merkle branch does not reduce to the expected root
    #[error("branch verification failed: {message}")]
    BranchVerificationFailed { message: String },

    /// The parent block header fails its own difficulty check
    #[error("parent block does not meet its own proof-of-work target")]
    ParentPowInsufficient,

    /// I/O errors surfaced by the codec layer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed-input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an invalid-tree-size error
    pub fn tree_size(message: impl Into<String>) -> Self {
        Self::InvalidTreeSize {
            message: message.into(),
        }
    }

    /// Create a branch-verification error
    pub fn branch(message: impl Into<String>) -> Self {
        Self::BranchVerificationFailed {
            message: message.into(),
        }
    }

    /// Get error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::MalformedInput { .. } => "malformed_input",
            Error::CommitmentNotFound => "commitment_not_found",
            Error::InvalidTreeSize { .. } => "invalid_tree_size",
            Error::ChainIndexMismatch { .. } => "chain_index_mismatch",
            Error::BranchVerificationFailed { .. } => "branch_verification_failed",
            Error::ParentPowInsufficient => "parent_pow_insufficient",
            Error::Io(_) => "io",
        }
    }
}
