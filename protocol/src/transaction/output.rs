//! Outputs and inputs, the two halves of a value transfer.
//!
//! An [`Output`] is created once, hashed once, and never mutated: its fields
//! are private and only readable. An [`Input`] points at the output it spends
//! and carries the unlock script for it.

use serde::{Deserialize, Serialize};

use super::identity::{derive_output_hash, verify_output_hash};
use super::types::Amount;
use crate::script::Script;

/// One unit of value created by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    timestamp: u64,
    address: String,
    amount: Amount,
    lock_script: Script,
    hash: String,
}

impl Output {
    /// Create an output and derive its identity hash.
    ///
    /// # Example
    ///
    /// ```
    /// use ledgerline_protocol::script::Script;
    /// use ledgerline_protocol::transaction::Output;
    ///
    /// let out = Output::new(
    ///     1_000,
    ///     "addrA",
    ///     "10.00".parse().unwrap(),
    ///     Script::from_tokens(["OP_PUSH", "addrA"]),
    /// );
    /// assert!(out.verify_hash());
    /// assert!(out.hash().ends_with("1000"));
    /// ```
    pub fn new(timestamp: u64, address: impl Into<String>, amount: Amount, lock_script: Script) -> Self {
        let address = address.into();
        let hash = derive_output_hash(timestamp, &address, &amount, &lock_script);
        Self {
            timestamp,
            address,
            amount,
            lock_script,
            hash,
        }
    }

    /// Reassemble an output received from elsewhere, keeping the hash it
    /// claims. Nothing is checked here; call [`Output::verify_hash`].
    pub fn from_parts(
        timestamp: u64,
        address: impl Into<String>,
        amount: Amount,
        lock_script: Script,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            address: address.into(),
            amount,
            lock_script,
            hash: hash.into(),
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn lock_script(&self) -> &Script {
        &self.lock_script
    }

    /// The stored identity hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Recompute the identity hash from the other four fields.
    pub fn compute_hash(&self) -> String {
        derive_output_hash(self.timestamp, &self.address, &self.amount, &self.lock_script)
    }

    /// Whether the stored hash matches the fields.
    pub fn verify_hash(&self) -> bool {
        verify_output_hash(self)
    }
}

/// A spend of one prior output.
///
/// The spent output is optional so that unresolved references can still be
/// represented; such an input adds nothing to value sums and can never be
/// hashed or authorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    spent_output: Option<Output>,
    unlock_script: Script,
}

impl Input {
    pub fn new(spent_output: Output, unlock_script: Script) -> Self {
        Self {
            spent_output: Some(spent_output),
            unlock_script,
        }
    }

    /// An input whose referenced output could not be resolved.
    pub fn unresolved(unlock_script: Script) -> Self {
        Self {
            spent_output: None,
            unlock_script,
        }
    }

    pub fn spent_output(&self) -> Option<&Output> {
        self.spent_output.as_ref()
    }

    pub fn unlock_script(&self) -> &Script {
        &self.unlock_script
    }
}
