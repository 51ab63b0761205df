// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledgerline CLI
//!
//! Entry point for the `ledgerline` binary. Parses CLI arguments,
//! initializes logging, and runs one of:
//!
//! - `keygen`  generate a keypair and its address
//! - `hash`    derive the identity hash of a transport-form record
//! - `verify`  full verification of a rich transaction
//! - `sign`    sign a transaction hash and build the unlock script
//! - `version` print build version information

mod cli;
mod logging;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use ledgerline_protocol::config::{ScriptLimits, PROTOCOL_VERSION, SIGNING_ALGORITHM};
use ledgerline_protocol::crypto::keys::LedgerKeypair;
use ledgerline_protocol::crypto::signatures::Ed25519Signer;
use ledgerline_protocol::script::{pay_to_address_unlock, PayToAddressEngine};
use ledgerline_protocol::transaction::{
    sign_transaction, verify_transaction, OutputDto, Transaction, TransactionDto,
};

use cli::{Commands, LedgerlineCli};

fn main() -> Result<()> {
    let cli = LedgerlineCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Keygen => keygen(),
        Commands::Hash(args) => hash(args),
        Commands::Verify(args) => verify(args),
        Commands::Sign(args) => sign(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn keygen() -> Result<()> {
    let keypair = LedgerKeypair::generate();
    tracing::info!(address = %keypair.address(), "generated keypair");
    emit(&json!({
        "algorithm": SIGNING_ALGORITHM,
        "private_key": keypair.private_key_hex(),
        "public_key": keypair.public_key_hex(),
        "address": keypair.address(),
    }))
}

fn hash(args: cli::HashArgs) -> Result<()> {
    let hash = if args.output {
        let timestamp = args
            .timestamp
            .context("--timestamp is required with --output")?;
        let dto: OutputDto = read_json(&args.file)?;
        dto.compute_hash(timestamp)
            .with_context(|| format!("cannot hash output in {}", args.file.display()))?
    } else {
        let dto: TransactionDto = read_json(&args.file)?;
        dto.compute_hash()
            .with_context(|| format!("cannot hash transaction in {}", args.file.display()))?
    };
    emit(&json!({ "hash": hash }))
}

fn verify(args: cli::VerifyArgs) -> Result<()> {
    let tx: Transaction = read_json(&args.file)?;
    let engine = PayToAddressEngine::new().limits(ScriptLimits {
        max_ops: args.max_ops,
        max_stack: args.max_stack,
    });

    let outcome = verify_transaction(&engine, &tx);
    let fee = tx.fee().map(|f| f.to_string());
    match &outcome {
        Ok(()) => tracing::info!(tx = %tx.hash(), "transaction valid"),
        Err(e) => tracing::warn!(tx = %tx.hash(), error = %e, "transaction rejected"),
    }

    emit(&json!({
        "hash": tx.hash(),
        "valid": outcome.is_ok(),
        "error": outcome.as_ref().err().map(ToString::to_string),
        "inputs_value": tx.inputs_value().to_string(),
        "outputs_value": tx.outputs_value().to_string(),
        "fee": fee,
    }))?;

    if let Err(e) = outcome {
        bail!("verification failed: {}", e);
    }
    Ok(())
}

fn sign(args: cli::SignArgs) -> Result<()> {
    let tx: Transaction = read_json(&args.file)?;
    if !tx.verify_hash() {
        bail!("transaction hash in {} does not match its content", args.file.display());
    }

    let keypair = LedgerKeypair::from_hex(&args.private_key).context("invalid private key")?;
    let signature = sign_transaction(&Ed25519Signer, &args.private_key, &tx)
        .with_context(|| format!("cannot sign transaction {}", tx.hash()))?;
    let unlock = pay_to_address_unlock(&signature, &keypair.public_key_hex());

    tracing::info!(tx = %tx.hash(), address = %keypair.address(), "transaction signed");
    emit(&json!({
        "hash": tx.hash(),
        "signature": signature,
        "public_key": keypair.public_key_hex(),
        "unlock_script": unlock,
    }))
}

fn print_version() {
    println!("ledgerline {}", env!("CARGO_PKG_VERSION"));
    println!("protocol   {}", PROTOCOL_VERSION);
    println!("signing    {}", SIGNING_ALGORITHM);
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to render result")?;
    println!("{}", out);
    Ok(())
}
