//! Full verification of a received transaction.
//!
//! [`verify_transaction`] runs the checks a verifier needs before accepting
//! a transaction, cheapest first:
//!
//! 1. Every produced output carries the transaction's timestamp and its
//!    stored hash matches its fields.
//! 2. Every input is resolved and the spent output's stored hash matches
//!    its fields.
//! 3. The transaction's stored hash matches its content.
//! 4. Every input is authorized by its scripts.
//!
//! Double-spend detection against ledger state is out of scope; that belongs
//! to whatever owns the unspent-output index.

use thiserror::Error;

use super::authorization::{authorize, AuthorizationError};
use super::builder::Transaction;
use super::identity::IdentityError;
use crate::script::ScriptEngine;

/// The first check a transaction failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// A produced output is stamped differently from its transaction.
    #[error("output {index} has timestamp {actual}, transaction has {expected}")]
    OutputTimestampMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },

    /// A produced output's hash does not match its fields.
    #[error("output {index} hash mismatch: expected {expected}, got {actual}")]
    OutputHashMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Input references nothing.
    #[error("input {index} references no resolved output")]
    UnresolvedInput { index: usize },

    /// A spent output's hash does not match its fields.
    #[error("spent output of input {index} hash mismatch: expected {expected}, got {actual}")]
    SpentOutputHashMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// The transaction hash does not match its content.
    #[error("transaction hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    /// Some input's script evaluated to false.
    #[error("transaction {hash} is not authorized to spend its inputs")]
    Unauthorized { hash: String },

    /// The transaction hash could not be derived.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Some input's script could not be evaluated.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

/// Verify integrity and authorization of `transaction`.
///
/// # Errors
///
/// Returns the first failing check as a [`TransactionError`].
pub fn verify_transaction<E: ScriptEngine + ?Sized>(
    engine: &E,
    transaction: &Transaction,
) -> Result<(), TransactionError> {
    for (index, output) in transaction.outputs().iter().enumerate() {
        if output.timestamp() != transaction.timestamp() {
            return Err(TransactionError::OutputTimestampMismatch {
                index,
                expected: transaction.timestamp(),
                actual: output.timestamp(),
            });
        }
        let expected = output.compute_hash();
        if expected != output.hash() {
            return Err(TransactionError::OutputHashMismatch {
                index,
                expected,
                actual: output.hash().to_string(),
            });
        }
    }

    for (index, input) in transaction.inputs().iter().enumerate() {
        let spent = input
            .spent_output()
            .ok_or(TransactionError::UnresolvedInput { index })?;
        let expected = spent.compute_hash();
        if expected != spent.hash() {
            return Err(TransactionError::SpentOutputHashMismatch {
                index,
                expected,
                actual: spent.hash().to_string(),
            });
        }
    }

    // Every input is resolved by now, so derivation cannot fail on one.
    let expected = transaction.compute_hash()?;
    if expected != transaction.hash() {
        return Err(TransactionError::HashMismatch {
            expected,
            actual: transaction.hash().to_string(),
        });
    }

    if !authorize(engine, transaction)? {
        return Err(TransactionError::Unauthorized {
            hash: transaction.hash().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::LedgerKeypair;
    use crate::script::{pay_to_address_lock, pay_to_address_unlock, PayToAddressEngine, Script};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::identity::derive_transaction_hash;
    use crate::transaction::output::{Input, Output};
    use crate::transaction::types::TransactionType;

    /// Funds `owner` with a reward output, then spends it to `dest` with a
    /// valid pay-to-address unlock.
    fn signed_spend(owner: &LedgerKeypair) -> Transaction {
        let funding = Output::new(
            1_000,
            owner.address(),
            "10.00".parse().unwrap(),
            pay_to_address_lock(&owner.address()),
        );

        // The unlock script signs the transaction hash, which does not
        // depend on unlock scripts, so hash first and attach after.
        let unsigned = TransactionBuilder::new(TransactionType::Transfer)
            .timestamp(2_000)
            .input(funding.clone(), Script::default())
            .output("dest", "10.00".parse().unwrap(), pay_to_address_lock("dest"))
            .build()
            .unwrap();

        let sig = owner.sign(unsigned.hash().as_bytes()).to_hex();
        Transaction::from_parts(
            unsigned.timestamp(),
            unsigned.tx_type(),
            vec![Input::new(funding, pay_to_address_unlock(&sig, &owner.public_key_hex()))],
            unsigned.outputs().to_vec(),
            unsigned.messages().to_vec(),
            unsigned.hash(),
        )
    }

    #[test]
    fn valid_transaction_passes() {
        let owner = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        assert_eq!(verify_transaction(&PayToAddressEngine::new(), &tx), Ok(()));
    }

    #[test]
    fn rejects_tampered_transaction_hash() {
        let owner = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        let forged = Transaction::from_parts(
            tx.timestamp(),
            tx.tx_type(),
            tx.inputs().to_vec(),
            tx.outputs().to_vec(),
            vec!["extra".into()],
            tx.hash(),
        );
        match verify_transaction(&PayToAddressEngine::new(), &forged) {
            Err(TransactionError::HashMismatch { .. }) => {}
            other => panic!("expected HashMismatch, got {:?}", other),
        }
    }

    #[test]
    fn rejects_tampered_spent_output() {
        let owner = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        let spent = tx.inputs()[0].spent_output().unwrap();
        let inflated = Output::from_parts(
            spent.timestamp(),
            spent.address(),
            "1000.00".parse().unwrap(),
            spent.lock_script().clone(),
            spent.hash(),
        );
        let forged = Transaction::from_parts(
            tx.timestamp(),
            tx.tx_type(),
            vec![Input::new(inflated, tx.inputs()[0].unlock_script().clone())],
            tx.outputs().to_vec(),
            vec![],
            tx.hash(),
        );
        match verify_transaction(&PayToAddressEngine::new(), &forged) {
            Err(TransactionError::SpentOutputHashMismatch { index: 0, .. }) => {}
            other => panic!("expected SpentOutputHashMismatch, got {:?}", other),
        }
    }

    #[test]
    fn rejects_tampered_output() {
        let owner = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        let out = &tx.outputs()[0];
        let redirected = Output::from_parts(
            out.timestamp(),
            "thief",
            out.amount().clone(),
            out.lock_script().clone(),
            out.hash(),
        );
        let forged = Transaction::from_parts(
            tx.timestamp(),
            tx.tx_type(),
            tx.inputs().to_vec(),
            vec![redirected],
            vec![],
            tx.hash(),
        );
        match verify_transaction(&PayToAddressEngine::new(), &forged) {
            Err(TransactionError::OutputHashMismatch { index: 0, .. }) => {}
            other => panic!("expected OutputHashMismatch, got {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_signer() {
        let owner = LedgerKeypair::generate();
        let thief = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        let sig = thief.sign(tx.hash().as_bytes()).to_hex();
        let stolen = Transaction::from_parts(
            tx.timestamp(),
            tx.tx_type(),
            vec![Input::new(
                tx.inputs()[0].spent_output().unwrap().clone(),
                pay_to_address_unlock(&sig, &thief.public_key_hex()),
            )],
            tx.outputs().to_vec(),
            vec![],
            tx.hash(),
        );
        match verify_transaction(&PayToAddressEngine::new(), &stolen) {
            Err(TransactionError::Unauthorized { .. }) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unresolved_input() {
        let tx = Transaction::from_parts(
            1,
            TransactionType::Transfer,
            vec![Input::unresolved(Script::default())],
            vec![],
            vec![],
            "h",
        );
        assert_eq!(
            verify_transaction(&PayToAddressEngine::new(), &tx),
            Err(TransactionError::UnresolvedInput { index: 0 })
        );
    }

    #[test]
    fn malformed_unlock_is_fault() {
        let owner = LedgerKeypair::generate();
        let tx = signed_spend(&owner);
        let broken = Transaction::from_parts(
            tx.timestamp(),
            tx.tx_type(),
            vec![Input::new(
                tx.inputs()[0].spent_output().unwrap().clone(),
                Script::from_tokens(["OP_BOGUS"]),
            )],
            tx.outputs().to_vec(),
            vec![],
            tx.hash(),
        );
        match verify_transaction(&PayToAddressEngine::new(), &broken) {
            Err(TransactionError::Authorization(AuthorizationError::Script { index: 0, .. })) => {}
            other => panic!("expected Script fault, got {:?}", other),
        }
    }

    #[test]
    fn rejects_output_stamped_apart_from_transaction() {
        let backdated = Output::new(5, "miner", "50".parse().unwrap(), pay_to_address_lock("miner"));
        let hash = derive_transaction_hash(2000, 0, &[], &[backdated.hash().to_string()], &[]);
        let reward =
            Transaction::from_parts(2000, TransactionType::Reward, vec![], vec![backdated], vec![], hash);

        // Hash and scripts alone would accept it.
        assert!(reward.verify_hash());
        assert_eq!(
            verify_transaction(&PayToAddressEngine::new(), &reward),
            Err(TransactionError::OutputTimestampMismatch {
                index: 0,
                expected: 2000,
                actual: 5,
            })
        );
    }

    #[test]
    fn reward_with_no_inputs_passes() {
        let reward = TransactionBuilder::new(TransactionType::Reward)
            .timestamp(10)
            .output("miner", "50".parse().unwrap(), pay_to_address_lock("miner"))
            .build()
            .unwrap();
        assert_eq!(verify_transaction(&PayToAddressEngine::new(), &reward), Ok(()));
    }
}
