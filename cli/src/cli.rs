//! # CLI Interface
//!
//! Defines the command-line argument structure for `ledgerline` using
//! `clap` derive. Five subcommands: `keygen`, `hash`, `verify`, `sign`,
//! and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ledgerline_protocol::config::{MAX_SCRIPT_OPS, MAX_STACK_SIZE};

use crate::logging::LogFormat;

/// Ledgerline record tools.
///
/// Derives identity hashes, signs transaction hashes and runs full
/// verification over JSON records. Results go to stdout as JSON; logs go
/// to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "ledgerline",
    about = "Ledgerline record tools",
    version,
    propagate_version = true
)]
pub struct LedgerlineCli {
    /// Log output format.
    #[arg(long, global = true, env = "LEDGERLINE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log directive when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "LEDGERLINE_LOG", default_value = "ledgerline=info,ledgerline_protocol=warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh Ed25519 keypair and its address.
    Keygen,
    /// Derive the identity hash of a transport-form record.
    Hash(HashArgs),
    /// Verify a rich transaction: hashes, references and scripts.
    Verify(VerifyArgs),
    /// Sign a rich transaction's hash and emit the pay-to-address unlock script.
    Sign(SignArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `hash` subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// JSON file holding a transport-form transaction (or output with `--output`).
    pub file: PathBuf,

    /// Treat the file as a single output instead of a transaction.
    #[arg(long)]
    pub output: bool,

    /// Creation time of the enclosing transaction, required with `--output`.
    #[arg(long, requires = "output")]
    pub timestamp: Option<u64>,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// JSON file holding a rich transaction with resolved inputs.
    pub file: PathBuf,

    /// Maximum opcodes executed per input.
    #[arg(long, env = "LEDGERLINE_MAX_SCRIPT_OPS", default_value_t = MAX_SCRIPT_OPS)]
    pub max_ops: usize,

    /// Maximum evaluation stack depth.
    #[arg(long, env = "LEDGERLINE_MAX_STACK", default_value_t = MAX_STACK_SIZE)]
    pub max_stack: usize,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// JSON file holding a rich transaction.
    pub file: PathBuf,

    /// Hex-encoded Ed25519 private key.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, env = "LEDGERLINE_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        LedgerlineCli::command().debug_assert();
    }

    #[test]
    fn verify_defaults_to_protocol_limits() {
        let cli = LedgerlineCli::try_parse_from(["ledgerline", "verify", "tx.json"]).unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.max_ops, MAX_SCRIPT_OPS);
                assert_eq!(args.max_stack, MAX_STACK_SIZE);
            }
            other => panic!("expected verify, got {:?}", other),
        }
    }

    #[test]
    fn output_hash_takes_transaction_timestamp() {
        let cli =
            LedgerlineCli::try_parse_from(["ledgerline", "hash", "out.json", "--output", "--timestamp", "2000"])
                .unwrap();
        match cli.command {
            Commands::Hash(args) => {
                assert!(args.output);
                assert_eq!(args.timestamp, Some(2000));
            }
            other => panic!("expected hash, got {:?}", other),
        }
        assert!(LedgerlineCli::try_parse_from(["ledgerline", "hash", "tx.json", "--timestamp", "2000"]).is_err());
    }

    #[test]
    fn log_format_is_global() {
        let cli = LedgerlineCli::try_parse_from(["ledgerline", "keygen", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
