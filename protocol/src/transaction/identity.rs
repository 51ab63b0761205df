//! Output and transaction identity hashes.
//!
//! Both the rich types ([`Output`], [`Transaction`]) and the flat transport
//! types convert into one small canonical record of primitive fields before
//! anything is hashed. There is exactly one hashing path per record kind, so
//! two representations of the same content cannot disagree.
//!
//! ## Output identity
//!
//! Fields, in order: `timestamp`, `address`, `amount` (canonical plain
//! decimal), lock-script tokens joined by one space. Encoded in Base58 with
//! the timestamp appended.
//!
//! ## Transaction identity
//!
//! Fields, in order: the type code, then one comma-joined field for each
//! *non-empty* list among referenced output hashes, produced output hashes
//! and messages. An empty list contributes no field at all, so a reward
//! transaction with no inputs hashes a structurally shorter string than a
//! transfer. Encoded in standard Base64 with the timestamp appended; the
//! timestamp is the suffix only, never a hashed field.
//!
//! Because every referenced output hash embeds that output's timestamp,
//! address, amount and lock script, editing a spent output after the fact
//! changes the spending transaction's hash too.

use thiserror::Error;
use tracing::debug;

use super::builder::Transaction;
use super::output::Output;
use super::types::{Amount, AmountError, UnknownTransactionType};
use crate::config::{LIST_DELIMITER, OUTPUT_HASH_ALPHABET, TRANSACTION_HASH_ALPHABET};
use crate::crypto::hash::Identifier;
use crate::script::Script;

/// Errors that prevent an identity hash from being derived at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// An input has no resolved output, so there is no hash to chain.
    #[error("input {index} references no resolved output")]
    UnresolvedInput { index: usize },

    /// A resolver returned an output whose hash differs from the one asked for.
    #[error("resolved output for {requested} carries hash {resolved}")]
    ResolvedHashMismatch { requested: String, resolved: String },

    /// An output is stamped differently from the transaction creating it.
    #[error("output {index} has timestamp {output}, transaction has {transaction}")]
    OutputTimestampMismatch {
        index: usize,
        output: u64,
        transaction: u64,
    },

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    UnknownType(#[from] UnknownTransactionType),
}

// ---------------------------------------------------------------------------
// OutputRecord
// ---------------------------------------------------------------------------

/// The canonical field set an output identity is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    timestamp: u64,
    address: String,
    amount: String,
    lock_script: String,
}

impl OutputRecord {
    pub fn new(timestamp: u64, address: &str, amount: &Amount, lock_script: &Script) -> Self {
        Self {
            timestamp,
            address: address.to_string(),
            amount: amount.to_plain_string(),
            lock_script: lock_script.joined(),
        }
    }

    /// Build from transport scalars. The amount string is hashed as given,
    /// so it must already be canonical.
    pub fn from_plain(
        timestamp: u64,
        address: &str,
        amount: &str,
        lock_script: &[String],
    ) -> Result<Self, AmountError> {
        amount.parse::<Amount>()?;
        Ok(Self {
            timestamp,
            address: address.to_string(),
            amount: amount.to_string(),
            lock_script: Script::new(lock_script.to_vec()).joined(),
        })
    }

    pub fn from_output(output: &Output) -> Self {
        Self::new(
            output.timestamp(),
            output.address(),
            output.amount(),
            output.lock_script(),
        )
    }

    pub fn fields(&self) -> [String; 4] {
        [
            self.timestamp.to_string(),
            self.address.clone(),
            self.amount.clone(),
            self.lock_script.clone(),
        ]
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::derive(self.timestamp, &self.fields(), OUTPUT_HASH_ALPHABET)
    }

    pub fn hash(&self) -> String {
        self.identifier().to_string()
    }
}

// ---------------------------------------------------------------------------
// TransactionRecord
// ---------------------------------------------------------------------------

/// The canonical field set a transaction identity is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    timestamp: u64,
    type_code: i32,
    referenced_output_hashes: Vec<String>,
    produced_output_hashes: Vec<String>,
    messages: Vec<String>,
}

impl TransactionRecord {
    pub fn new(
        timestamp: u64,
        type_code: i32,
        referenced_output_hashes: Vec<String>,
        produced_output_hashes: Vec<String>,
        messages: Vec<String>,
    ) -> Self {
        Self {
            timestamp,
            type_code,
            referenced_output_hashes,
            produced_output_hashes,
            messages,
        }
    }

    /// Canonical record of a rich transaction.
    ///
    /// Every referenced and produced output hash is recomputed from the
    /// output's own fields rather than read from its stored hash.
    pub fn from_transaction(transaction: &Transaction) -> Result<Self, IdentityError> {
        let referenced = transaction
            .inputs()
            .iter()
            .enumerate()
            .map(|(index, input)| {
                input
                    .spent_output()
                    .map(Output::compute_hash)
                    .ok_or(IdentityError::UnresolvedInput { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let produced = transaction
            .outputs()
            .iter()
            .map(Output::compute_hash)
            .collect();

        Ok(Self::new(
            transaction.timestamp(),
            transaction.tx_type().code(),
            referenced,
            produced,
            transaction.messages().to_vec(),
        ))
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(4);
        fields.push(self.type_code.to_string());
        for list in [
            &self.referenced_output_hashes,
            &self.produced_output_hashes,
            &self.messages,
        ] {
            if !list.is_empty() {
                fields.push(list.join(LIST_DELIMITER));
            }
        }
        fields
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::derive(self.timestamp, &self.fields(), TRANSACTION_HASH_ALPHABET)
    }

    pub fn hash(&self) -> String {
        self.identifier().to_string()
    }
}

// ---------------------------------------------------------------------------
// Derivation & verification
// ---------------------------------------------------------------------------

/// Identity hash of an output.
pub fn derive_output_hash(timestamp: u64, address: &str, amount: &Amount, lock_script: &Script) -> String {
    OutputRecord::new(timestamp, address, amount, lock_script).hash()
}

/// Exact string comparison of the stored hash against a fresh derivation.
pub fn verify_output_hash(output: &Output) -> bool {
    let expected = output.compute_hash();
    let ok = expected == output.hash();
    if !ok {
        debug!(expected = %expected, actual = %output.hash(), "output hash mismatch");
    }
    ok
}

/// Identity hash of a transaction from already-known output hashes.
pub fn derive_transaction_hash(
    timestamp: u64,
    type_code: i32,
    referenced_output_hashes: &[String],
    produced_output_hashes: &[String],
    messages: &[String],
) -> String {
    TransactionRecord::new(
        timestamp,
        type_code,
        referenced_output_hashes.to_vec(),
        produced_output_hashes.to_vec(),
        messages.to_vec(),
    )
    .hash()
}

/// Recompute a transaction's hash from its content and compare.
///
/// A transaction with an unresolved input cannot be re-derived and is
/// reported as not matching.
pub fn verify_transaction_hash(transaction: &Transaction) -> bool {
    match TransactionRecord::from_transaction(transaction) {
        Ok(record) => {
            let expected = record.hash();
            let ok = expected == transaction.hash();
            if !ok {
                debug!(expected = %expected, actual = %transaction.hash(), "transaction hash mismatch");
            }
            ok
        }
        Err(err) => {
            debug!(error = %err, "transaction hash cannot be derived");
            false
        }
    }
}
