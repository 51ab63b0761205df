//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] collects inputs, outputs and messages, then
//! `.build()` hashes every produced output and the transaction itself in one
//! go. The result is a finished, immutable [`Transaction`]: the hash is
//! computed once at assembly time and never again.
//!
//! The builder does not sign; that happens in [`super::signing`] over the
//! finished hash.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::aggregate::{sum_inputs, sum_outputs};
use super::identity::{verify_transaction_hash, IdentityError, TransactionRecord};
use super::output::{Input, Output};
use super::types::{Amount, TransactionType};
use crate::script::Script;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An atomic set of spends and creations.
///
/// Fields are private: a transaction is read-only once assembled. Records
/// that arrive from elsewhere come in through [`Transaction::from_parts`]
/// with whatever hash they claim, and are checked with
/// [`Transaction::verify_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    timestamp: u64,
    tx_type: TransactionType,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    #[serde(default)]
    messages: Vec<String>,
    hash: String,
}

impl Transaction {
    /// Reassemble a transaction keeping the hash it claims.
    pub fn from_parts(
        timestamp: u64,
        tx_type: TransactionType,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        messages: Vec<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            tx_type,
            inputs,
            outputs,
            messages,
            hash: hash.into(),
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The stored identity hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Derive the identity hash from the current content.
    pub fn compute_hash(&self) -> Result<String, IdentityError> {
        Ok(TransactionRecord::from_transaction(self)?.hash())
    }

    /// Replace the stored hash with one derived from the content.
    pub(crate) fn rehash(mut self) -> Result<Self, IdentityError> {
        self.hash = self.compute_hash()?;
        Ok(self)
    }

    /// Whether the stored hash matches the content, including every
    /// referenced output's fields.
    pub fn verify_hash(&self) -> bool {
        verify_transaction_hash(self)
    }

    /// Total value of resolved inputs.
    pub fn inputs_value(&self) -> Amount {
        sum_inputs(Some(&self.inputs))
    }

    pub fn outputs_value(&self) -> Amount {
        sum_outputs(Some(&self.outputs))
    }

    /// Inputs minus outputs, or `None` when outputs exceed inputs.
    pub fn fee(&self) -> Option<Amount> {
        self.inputs_value().checked_sub(&self.outputs_value())
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// # Example
///
/// ```
/// use ledgerline_protocol::script::Script;
/// use ledgerline_protocol::transaction::{TransactionBuilder, TransactionType};
///
/// let reward = TransactionBuilder::new(TransactionType::Reward)
///     .timestamp(1_700_000_000_000)
///     .output("addrA", "50".parse().unwrap(), Script::from_tokens(["OP_PUSH", "addrA"]))
///     .build()
///     .unwrap();
///
/// assert!(reward.verify_hash());
/// assert_eq!(reward.outputs()[0].timestamp(), 1_700_000_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx_type: TransactionType,
    timestamp: Option<u64>,
    inputs: Vec<Input>,
    outputs: Vec<(String, Amount, Script)>,
    messages: Vec<String>,
}

impl TransactionBuilder {
    pub fn new(tx_type: TransactionType) -> Self {
        Self {
            tx_type,
            timestamp: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Creation time in milliseconds. Defaults to now at `build()`.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Spend `spent_output` with `unlock_script`.
    pub fn input(mut self, spent_output: Output, unlock_script: Script) -> Self {
        self.inputs.push(Input::new(spent_output, unlock_script));
        self
    }

    /// Add a pre-built input. Unresolved inputs make `build()` fail.
    pub fn raw_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    /// Create an output. Its timestamp is the transaction's.
    pub fn output(mut self, address: impl Into<String>, amount: Amount, lock_script: Script) -> Self {
        self.outputs.push((address.into(), amount, lock_script));
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Hash every output, then the transaction.
    pub fn build(self) -> Result<Transaction, IdentityError> {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis() as u64);

        let outputs = self
            .outputs
            .into_iter()
            .map(|(address, amount, lock_script)| Output::new(timestamp, address, amount, lock_script))
            .collect();

        Transaction::from_parts(
            timestamp,
            self.tx_type,
            self.inputs,
            outputs,
            self.messages,
            String::new(),
        )
        .rehash()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
