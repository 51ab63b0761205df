// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledgerline Protocol: Core Library
//!
//! The integrity core of an unspent-output ledger: how outputs and
//! transactions get their identity hashes, how those hashes are checked, how
//! value is summed, and how a transaction proves it may spend what it
//! references.
//!
//! ## Architecture
//!
//! - **config**: Protocol constants: delimiters, alphabets, type codes, limits.
//! - **crypto**: SHA-256 identifiers, Ed25519 keys, the signing primitive.
//! - **script**: Script tokens, the engine seam, and the pay-to-address engine.
//! - **transaction**: Outputs, transactions, identity, transport, verification.
//!
//! ## Quick tour
//!
//! ```
//! use ledgerline_protocol::crypto::keys::LedgerKeypair;
//! use ledgerline_protocol::crypto::signatures::Ed25519Signer;
//! use ledgerline_protocol::script::{pay_to_address_lock, PayToAddressEngine};
//! use ledgerline_protocol::transaction::{
//!     sign_transaction, verify_transaction, TransactionBuilder, TransactionType,
//! };
//!
//! let miner = LedgerKeypair::generate();
//! let reward = TransactionBuilder::new(TransactionType::Reward)
//!     .output(miner.address(), "50".parse().unwrap(), pay_to_address_lock(&miner.address()))
//!     .build()
//!     .unwrap();
//!
//! assert!(verify_transaction(&PayToAddressEngine::new(), &reward).is_ok());
//! let sig = sign_transaction(&Ed25519Signer, &miner.private_key_hex(), &reward).unwrap();
//! assert_eq!(sig.len(), 128);
//! ```
//!
//! Nothing here does I/O or holds state; every function is pure over its
//! inputs.

pub mod config;
pub mod crypto;
pub mod script;
pub mod transaction;
