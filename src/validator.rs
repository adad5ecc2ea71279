//! AuxPow verification pipeline
//!
//! Combines the commitment locator, the merkle branch verifier, and the
//! parent-chain proof-of-work rule into a single accept/reject decision for
//! a claimed auxiliary proof-of-work. Each gate is hard: the first failure
//! aborts with its specific error and nothing is mutated, so independent
//! proofs can be verified concurrently without coordination.

use crate::auxpow::DEFAULT_MAX_BRANCH_DEPTH;
use crate::locator::{locate_commitment, MERGED_MINING_MAGIC};
use crate::pow::ParentPowChecker;
use crate::{AuxPow, ChainId, Error, Hash256, Result};
use tracing::debug;

/// Multiplier of the linear-congruential step assigning each auxiliary
/// chain its leaf slot in the merge-mining tree
const INDEX_LCG_MULTIPLIER: i64 = 1103515245;

/// Static configuration of an [`AuxPowValidator`]
///
/// Explicit configuration in place of process-wide chain parameter tables:
/// the validator itself stays a pure function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// This auxiliary chain's identifier
    pub chain_id: ChainId,
    /// Magic byte anchor expected in the coinbase script
    pub magic: [u8; 4],
    /// Maximum accepted merkle branch depth
    pub max_branch_depth: usize,
}

impl ValidatorConfig {
    /// Configuration with the conventional magic bytes and depth cap
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            magic: MERGED_MINING_MAGIC,
            max_branch_depth: DEFAULT_MAX_BRANCH_DEPTH,
        }
    }
}

/// Verifies claimed auxiliary proofs-of-work for one auxiliary chain
#[derive(Debug, Clone)]
pub struct AuxPowValidator {
    config: ValidatorConfig,
}

impl AuxPowValidator {
    /// Create a validator for the given chain configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The validator's configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Verify that `proof` is genuine parent-chain work committed to
    /// `aux_block_hash` for this chain.
    ///
    /// Gates, in order, each aborting on failure:
    /// 1. locate the merge-mining commitment in the coinbase script;
    /// 2. the coinbase is included in the parent block's tx tree;
    /// 3. the declared tree size matches the blockchain branch depth;
    /// 4. the branch path equals this chain's assigned leaf index;
    /// 5. the auxiliary hash is included in the merge-mining tree;
    /// 6. the parent header meets its own proof-of-work target.
    pub fn verify<P: ParentPowChecker>(
        &self,
        aux_block_hash: &Hash256,
        proof: &AuxPow,
        parent_pow: &P,
    ) -> Result<()> {
        if proof.coinbase_branch.len() > self.config.max_branch_depth
            || proof.blockchain_branch.len() > self.config.max_branch_depth
        {
            return Err(Error::malformed(format!(
                "merkle branch exceeds maximum depth {}",
                self.config.max_branch_depth
            )));
        }

        let coinbase_input = proof
            .coinbase_tx
            .inputs
            .first()
            .ok_or_else(|| Error::malformed("coinbase transaction has no inputs"))?;

        // The candidate tree root doubles as the locator's disambiguation
        // hint and as the expected value for gate 5.
        let aux_root = proof.blockchain_branch.compute_root(aux_block_hash);
        let commitment = locate_commitment(
            &coinbase_input.signature_script,
            &proof.parent_block_hash,
            Some(&aux_root),
            &self.config.magic,
        )?;
        debug!(
            root = %commitment.root,
            merkle_size = commitment.merkle_size,
            merkle_nonce = commitment.merkle_nonce,
            "located merge-mining commitment"
        );

        let coinbase_root = proof
            .coinbase_branch
            .compute_root(&proof.coinbase_tx.txid());
        if coinbase_root != proof.parent_block_header.merkle_root {
            return Err(Error::branch("coinbase not included in parent block"));
        }

        check_tree_size(proof.blockchain_branch.len(), commitment.merkle_size)?;

        // Anti-forgery gate: the chain's slot in the merge-mining tree is
        // fixed by (chain id, nonce, size). A miner mining several
        // auxiliary chains at once cannot reuse one chain's branch for
        // another's claim.
        let expected = expected_chain_index(
            self.config.chain_id,
            commitment.merkle_nonce,
            commitment.merkle_size,
        );
        let actual = proof.blockchain_branch.implied_index();
        if expected != actual {
            return Err(Error::ChainIndexMismatch { expected, actual });
        }

        if aux_root != commitment.root {
            return Err(Error::branch(
                "auxiliary block hash not included in merge-mining tree",
            ));
        }

        if !parent_pow.check(&proof.parent_block_header) {
            return Err(Error::ParentPowInsufficient);
        }

        debug!(
            aux_hash = %aux_block_hash,
            parent_hash = %proof.parent_block_header.block_hash(),
            "auxpow accepted"
        );
        Ok(())
    }

    /// Decode and verify a proof straight from its wire bytes
    pub fn verify_bytes<P: ParentPowChecker>(
        &self,
        aux_block_hash: &Hash256,
        proof_bytes: &[u8],
        parent_pow: &P,
    ) -> Result<AuxPow> {
        let proof = AuxPow::from_bytes(proof_bytes, self.config.max_branch_depth)?;
        self.verify(aux_block_hash, &proof, parent_pow)?;
        Ok(proof)
    }
}

/// The leaf index assigned to `chain_id` in a merge-mining tree of
/// `merkle_size` leaves salted with `merkle_nonce`.
///
/// Pseudo-random and miner-unselectable: the nonce is committed in the
/// coinbase, so a miner cannot steer a chain into a chosen slot.
pub fn expected_chain_index(chain_id: ChainId, merkle_nonce: i32, merkle_size: i32) -> u32 {
    debug_assert!(merkle_size > 0);
    let mixed = i64::from(chain_id.value()) * INDEX_LCG_MULTIPLIER + i64::from(merkle_nonce);
    mixed.rem_euclid(i64::from(merkle_size)) as u32
}

/// The branch depth must be exactly enough for the declared leaf count:
/// `2^depth` is the smallest power of two at or above `merkle_size`.
fn check_tree_size(depth: usize, merkle_size: i32) -> Result<()> {
    if merkle_size < 1 {
        return Err(Error::tree_size(format!(
            "declared size {} is not positive",
            merkle_size
        )));
    }
    if depth >= 63 {
        return Err(Error::tree_size(format!("branch depth {} out of range", depth)));
    }
    let size = i64::from(merkle_size);
    if (1i64 << depth) < size {
        return Err(Error::tree_size(format!(
            "branch of {} levels too shallow for {} leaves",
            depth, merkle_size
        )));
    }
    if depth > 0 && (1i64 << (depth - 1)) >= size {
        return Err(Error::tree_size(format!(
            "branch of {} levels too deep for {} leaves",
            depth, merkle_size
        )));
    }
    Ok(())
}
