//! AuxPow Engine - offline proof verifier
//!
//! Decodes a hex-encoded auxiliary proof-of-work and runs the full
//! verification pipeline against a claimed auxiliary block hash, printing
//! the verdict as text or JSON.

use anyhow::{bail, Context};
use auxpow_engine::{
    AuxPowValidator, BitsChecker, BlockHeader, ChainId, Hash256, ValidatorConfig, APP_NAME,
    APP_VERSION, DEFAULT_MAX_BRANCH_DEPTH,
};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "auxpow-engine",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merged-mining (AuxPow) proof verifier",
    long_about = "Verifies an auxiliary proof-of-work against a claimed auxiliary \
                  block hash: commitment location, both merkle branches, the \
                  chain-index rule, and the parent header's own proof-of-work."
)]
struct Cli {
    /// Hex-encoded AuxPow wire bytes
    #[arg(long, conflicts_with = "proof_file")]
    proof_hex: Option<String>,

    /// File containing the hex-encoded AuxPow wire bytes
    #[arg(long)]
    proof_file: Option<PathBuf>,

    /// Claimed auxiliary block hash (reversed hex, as displayed by nodes)
    #[arg(long)]
    aux_hash: String,

    /// Auxiliary chain identifier
    #[arg(long)]
    chain_id: u32,

    /// Maximum accepted merkle branch depth
    #[arg(long, default_value_t = DEFAULT_MAX_BRANCH_DEPTH)]
    max_branch_depth: usize,

    /// Skip the parent-header proof-of-work gate (offline inspection of
    /// proofs for chains whose difficulty rule lives elsewhere)
    #[arg(long)]
    skip_parent_pow: bool,

    /// Emit the verdict as JSON
    #[arg(long)]
    json: bool,
}

/// Machine-readable verification outcome
#[derive(Debug, Serialize)]
struct Verdict {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    aux_hash: Hash256,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_block_hash: Option<Hash256>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let cli = Cli::parse();

    let proof_hex = match (&cli.proof_hex, &cli.proof_file) {
        (Some(hex), None) => hex.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading proof file {}", path.display()))?,
        _ => bail!("exactly one of --proof-hex or --proof-file is required"),
    };
    let proof_bytes =
        hex::decode(proof_hex.trim()).context("proof is not valid hex")?;

    let aux_hash =
        Hash256::from_str(&cli.aux_hash).context("invalid auxiliary block hash")?;

    info!("{} v{}", APP_NAME, APP_VERSION);
    info!(
        "verifying {} byte proof for chain {}",
        proof_bytes.len(),
        cli.chain_id
    );

    let mut config = ValidatorConfig::new(ChainId::new(cli.chain_id));
    config.max_branch_depth = cli.max_branch_depth;
    let validator = AuxPowValidator::new(config);

    let result = if cli.skip_parent_pow {
        let accept_any = |_: &BlockHeader| true;
        validator.verify_bytes(&aux_hash, &proof_bytes, &accept_any)
    } else {
        validator.verify_bytes(&aux_hash, &proof_bytes, &BitsChecker)
    };

    let verdict = match &result {
        Ok(proof) => Verdict {
            accepted: true,
            error_category: None,
            error: None,
            aux_hash,
            parent_block_hash: Some(proof.parent_block_header.block_hash()),
        },
        Err(err) => Verdict {
            accepted: false,
            error_category: Some(err.category()),
            error: Some(err.to_string()),
            aux_hash,
            parent_block_hash: None,
        },
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else if verdict.accepted {
        println!("accepted: auxiliary block {}", verdict.aux_hash);
    } else {
        println!(
            "rejected ({}): {}",
            verdict.error_category.unwrap_or("unknown"),
            verdict.error.as_deref().unwrap_or("")
        );
    }

    if !verdict.accepted {
        std::process::exit(1);
    }
    Ok(())
}
