//! Flat transport representation.
//!
//! What travels between nodes is not a graph of resolved outputs but plain
//! scalars: amounts as decimal strings, referenced outputs by hash only.
//! These records hash through the same [`OutputRecord`] and
//! [`TransactionRecord`] as the rich types, so a transaction and its DTO
//! always agree on identity.
//!
//! An output has no timestamp of its own on the wire: it is always stamped
//! with the transaction that creates it.
//!
//! Converting a DTO back into a rich [`Transaction`] needs a resolver that
//! looks up referenced outputs by hash, typically the caller's unspent-output
//! index.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::builder::Transaction;
use super::identity::{IdentityError, OutputRecord, TransactionRecord};
use super::output::{Input, Output};
use super::types::{Amount, TransactionType};
use crate::script::Script;

/// An output as plain scalars, stamped by its enclosing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDto {
    pub address: String,
    /// Canonical plain decimal string.
    pub value: String,
    #[serde(default)]
    pub lock_script: Vec<String>,
}

impl OutputDto {
    /// Canonical record of this output as created at `timestamp`.
    pub fn to_record(&self, timestamp: u64) -> Result<OutputRecord, IdentityError> {
        Ok(OutputRecord::from_plain(
            timestamp,
            &self.address,
            &self.value,
            &self.lock_script,
        )?)
    }

    /// Identity hash. Fails only on a non-canonical `value`.
    pub fn compute_hash(&self, timestamp: u64) -> Result<String, IdentityError> {
        Ok(self.to_record(timestamp)?.hash())
    }
}

impl From<&Output> for OutputDto {
    fn from(output: &Output) -> Self {
        Self {
            address: output.address().to_string(),
            value: output.amount().to_plain_string(),
            lock_script: output.lock_script().tokens().to_vec(),
        }
    }
}

/// An input as the hash of the output it spends plus its unlock script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDto {
    pub spent_output_hash: String,
    #[serde(default)]
    pub unlock_script: Vec<String>,
}

/// A transaction as plain scalars.
///
/// The type is carried as its raw code. Hashing uses the code as given, so
/// an unknown code still has an identity; only conversion to the rich form
/// rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub timestamp: u64,
    pub transaction_type_code: i32,
    #[serde(default)]
    pub inputs: Vec<InputDto>,
    #[serde(default)]
    pub outputs: Vec<OutputDto>,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl TransactionDto {
    pub fn to_record(&self) -> Result<TransactionRecord, IdentityError> {
        let referenced = self
            .inputs
            .iter()
            .map(|input| input.spent_output_hash.clone())
            .collect();
        let produced = self
            .outputs
            .iter()
            .map(|output| output.compute_hash(self.timestamp))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TransactionRecord::new(
            self.timestamp,
            self.transaction_type_code,
            referenced,
            produced,
            self.messages.clone(),
        ))
    }

    pub fn compute_hash(&self) -> Result<String, IdentityError> {
        Ok(self.to_record()?.hash())
    }
}

impl Transaction {
    /// Flatten into the transport form.
    ///
    /// Referenced outputs are identified by their stored hash. Fails if a
    /// produced output carries a timestamp other than the transaction's,
    /// since the transport form cannot express one.
    pub fn to_dto(&self) -> Result<TransactionDto, IdentityError> {
        let inputs = self
            .inputs()
            .iter()
            .enumerate()
            .map(|(index, input)| -> Result<InputDto, IdentityError> {
                let spent = input
                    .spent_output()
                    .ok_or(IdentityError::UnresolvedInput { index })?;
                Ok(InputDto {
                    spent_output_hash: spent.hash().to_string(),
                    unlock_script: input.unlock_script().tokens().to_vec(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, output) in self.outputs().iter().enumerate() {
            if output.timestamp() != self.timestamp() {
                return Err(IdentityError::OutputTimestampMismatch {
                    index,
                    output: output.timestamp(),
                    transaction: self.timestamp(),
                });
            }
        }

        Ok(TransactionDto {
            timestamp: self.timestamp(),
            transaction_type_code: self.tx_type().code(),
            inputs,
            outputs: self.outputs().iter().map(OutputDto::from).collect(),
            messages: self.messages().to_vec(),
        })
    }

    /// Rebuild a rich transaction from its transport form.
    ///
    /// `resolver` maps a referenced output hash to the output it names. The
    /// resolved output must carry exactly the requested hash. Every hash on
    /// the result is derived, none is copied from the DTO.
    pub fn from_dto<R>(dto: &TransactionDto, mut resolver: R) -> Result<Transaction, IdentityError>
    where
        R: FnMut(&str) -> Option<Output>,
    {
        let tx_type = TransactionType::try_from(dto.transaction_type_code)?;

        let inputs = dto
            .inputs
            .iter()
            .enumerate()
            .map(|(index, input)| -> Result<Input, IdentityError> {
                let spent = resolver(&input.spent_output_hash).ok_or_else(|| {
                    warn!(index, hash = %input.spent_output_hash, "referenced output not found");
                    IdentityError::UnresolvedInput { index }
                })?;
                if spent.hash() != input.spent_output_hash {
                    return Err(IdentityError::ResolvedHashMismatch {
                        requested: input.spent_output_hash.clone(),
                        resolved: spent.hash().to_string(),
                    });
                }
                Ok(Input::new(spent, Script::new(input.unlock_script.clone())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let outputs = dto
            .outputs
            .iter()
            .map(|out| -> Result<Output, IdentityError> {
                let amount: Amount = out.value.parse()?;
                Ok(Output::new(
                    dto.timestamp,
                    out.address.clone(),
                    amount,
                    Script::new(out.lock_script.clone()),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Transaction::from_parts(
            dto.timestamp,
            tx_type,
            inputs,
            outputs,
            dto.messages.clone(),
            String::new(),
        )
        .rehash()
    }
}
