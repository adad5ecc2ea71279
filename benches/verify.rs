//! Verification performance benchmarks

use auxpow_engine::crypto::{double_sha256, hash_nodes};
use auxpow_engine::tx::{OutPoint, TxIn, TxOut};
use auxpow_engine::{
    AuxPow, AuxPowValidator, BlockHeader, ChainId, Hash256, MerkleBranch, Transaction,
    ValidatorConfig, MERGED_MINING_MAGIC,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn deep_branch(depth: usize) -> MerkleBranch {
    let hashes = (0..depth).map(|i| double_sha256(&[i as u8])).collect();
    MerkleBranch::new(hashes, 0b1010_1010_1010)
}

/// A minimal single-chain proof (tree of one leaf)
fn single_chain_proof(aux_hash: &Hash256) -> AuxPow {
    let mut script = MERGED_MINING_MAGIC.to_vec();
    script.extend_from_slice(&aux_hash.to_display_bytes());
    script.extend_from_slice(&1i32.to_le_bytes());
    script.extend_from_slice(&0i32.to_le_bytes());

    let coinbase = Transaction {
        version: 1,
        inputs: vec![TxIn {
            previous_output: OutPoint::null(),
            signature_script: script,
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut {
            value: 50_0000_0000,
            pk_script: vec![0x51],
        }],
        lock_time: 0,
    };

    let parent_block_header = BlockHeader {
        version: 2,
        prev_block: double_sha256(b"tip"),
        merkle_root: hash_nodes(&coinbase.txid(), &double_sha256(b"other")),
        timestamp: 1_400_000_000,
        bits: 0x207fffff,
        nonce: 0,
    };

    AuxPow {
        coinbase_tx: coinbase,
        parent_block_hash: parent_block_header.block_hash(),
        coinbase_branch: MerkleBranch::new(vec![double_sha256(b"other")], 0),
        blockchain_branch: MerkleBranch::new(vec![], 0),
        parent_block_header,
    }
}

fn bench_compute_root(c: &mut Criterion) {
    let leaf = double_sha256(b"leaf");
    let branch = deep_branch(12);

    c.bench_function("merkle_compute_root_depth_12", |b| {
        b.iter(|| black_box(&branch).compute_root(black_box(&leaf)))
    });
}

fn bench_verify(c: &mut Criterion) {
    // Chain id 0 with nonce 0 maps to index 0 of the single-leaf tree
    let aux_hash = double_sha256(b"aux block");
    let proof = single_chain_proof(&aux_hash);
    let validator = AuxPowValidator::new(ValidatorConfig::new(ChainId::new(0)));
    let accept = |_: &BlockHeader| true;

    c.bench_function("verify_single_chain_proof", |b| {
        b.iter(|| validator.verify(black_box(&aux_hash), black_box(&proof), &accept))
    });

    let bytes = proof.to_bytes();
    c.bench_function("decode_and_verify_from_wire", |b| {
        b.iter(|| validator.verify_bytes(black_box(&aux_hash), black_box(&bytes), &accept))
    });
}

criterion_group!(benches, bench_compute_root, bench_verify);
criterion_main!(benches);
