//! Reference engine for the pay-to-address script family.
//!
//! ```text
//! unlock: OP_PUSHDATA <signature> OP_PUSHDATA <public key>
//! lock:   OP_DUP OP_HASH160 OP_PUSHDATA <address> OP_EQUALVERIFY OP_CHECKSIG
//! ```
//!
//! `OP_HASH160` maps a public key to its ledger address, `OP_EQUALVERIFY`
//! stops with a `false` verdict on mismatch, and `OP_CHECKSIG` checks the
//! signature over the spending transaction's identity hash.

use tracing::trace;

use super::engine::{ExecutionResult, ScriptEngine, ScriptError};
use super::Script;
use crate::config::{ScriptLimits, SCRIPT_FALSE, SCRIPT_TRUE};
use crate::crypto::keys::address_from_public_key;
use crate::crypto::signatures::{Ed25519Signer, SigningPrimitive};
use crate::transaction::Transaction;

pub const OP_PUSHDATA: &str = "OP_PUSHDATA";
pub const OP_DUP: &str = "OP_DUP";
pub const OP_HASH160: &str = "OP_HASH160";
pub const OP_EQUALVERIFY: &str = "OP_EQUALVERIFY";
pub const OP_CHECKSIG: &str = "OP_CHECKSIG";

/// Lock script paying to `address`.
pub fn pay_to_address_lock(address: &str) -> Script {
    Script::from_tokens([
        OP_DUP,
        OP_HASH160,
        OP_PUSHDATA,
        address,
        OP_EQUALVERIFY,
        OP_CHECKSIG,
    ])
}

/// Unlock script presenting `signature` and `public_key`.
pub fn pay_to_address_unlock(signature: &str, public_key: &str) -> Script {
    Script::from_tokens([OP_PUSHDATA, signature, OP_PUSHDATA, public_key])
}

/// Evaluates pay-to-address scripts, delegating signature checks to a
/// [`SigningPrimitive`].
#[derive(Debug, Clone, Default)]
pub struct PayToAddressEngine<S = Ed25519Signer> {
    signer: S,
    limits: ScriptLimits,
}

impl PayToAddressEngine<Ed25519Signer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SigningPrimitive> PayToAddressEngine<S> {
    pub fn with_signer(signer: S) -> Self {
        Self {
            signer,
            limits: ScriptLimits::default(),
        }
    }

    pub fn limits(mut self, limits: ScriptLimits) -> Self {
        self.limits = limits;
        self
    }
}

fn pop(stack: &mut Vec<String>, opcode: &str) -> Result<String, ScriptError> {
    stack.pop().ok_or_else(|| ScriptError::StackUnderflow {
        opcode: opcode.to_string(),
    })
}

impl<S: SigningPrimitive> ScriptEngine for PayToAddressEngine<S> {
    fn execute(&self, transaction: &Transaction, script: &Script) -> Result<ExecutionResult, ScriptError> {
        let tokens = script.tokens();
        let mut stack: Vec<String> = Vec::new();
        let mut pc = 0;
        let mut ops = 0;

        while pc < tokens.len() {
            ops += 1;
            if ops > self.limits.max_ops {
                return Err(ScriptError::OperationLimitExceeded {
                    limit: self.limits.max_ops,
                });
            }

            let opcode = tokens[pc].as_str();
            pc += 1;
            trace!(opcode, depth = stack.len(), "script step");

            match opcode {
                OP_PUSHDATA => {
                    let data = tokens.get(pc).ok_or_else(|| ScriptError::MissingOperand {
                        opcode: opcode.to_string(),
                    })?;
                    pc += 1;
                    stack.push(data.clone());
                }
                OP_DUP => {
                    let top = stack.last().cloned().ok_or_else(|| ScriptError::StackUnderflow {
                        opcode: opcode.to_string(),
                    })?;
                    stack.push(top);
                }
                OP_HASH160 => {
                    let public_key = pop(&mut stack, opcode)?;
                    // A key that is not a curve point owns no address.
                    match address_from_public_key(&public_key) {
                        Ok(address) => stack.push(address),
                        Err(_) => return Ok(ExecutionResult::rejected()),
                    }
                }
                OP_EQUALVERIFY => {
                    let a = pop(&mut stack, opcode)?;
                    let b = pop(&mut stack, opcode)?;
                    if a != b {
                        return Ok(ExecutionResult::rejected());
                    }
                }
                OP_CHECKSIG => {
                    let public_key = pop(&mut stack, opcode)?;
                    let signature = pop(&mut stack, opcode)?;
                    let valid = self.signer.verify(&public_key, transaction.hash(), &signature);
                    let verdict = if valid { SCRIPT_TRUE } else { SCRIPT_FALSE };
                    stack.push(verdict.to_string());
                }
                other => return Err(ScriptError::UnknownOpcode(other.to_string())),
            }

            if stack.len() > self.limits.max_stack {
                return Err(ScriptError::StackOverflow {
                    limit: self.limits.max_stack,
                });
            }
        }

        Ok(ExecutionResult::new(stack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::LedgerKeypair;
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::output::Output;
    use crate::transaction::types::TransactionType;

    fn spend_fixture() -> (LedgerKeypair, Transaction) {
        let owner = LedgerKeypair::from_seed(&[1u8; 32]);
        let funding = Output::new(
            1_000,
            owner.address(),
            "25".parse().unwrap(),
            pay_to_address_lock(&owner.address()),
        );
        let tx = TransactionBuilder::new(TransactionType::Transfer)
            .timestamp(2_000)
            .input(funding, Script::default())
            .output("dest", "25".parse().unwrap(), pay_to_address_lock("dest"))
            .build()
            .unwrap();
        (owner, tx)
    }

    fn composite(kp: &LedgerKeypair, tx: &Transaction, lock_address: &str) -> Script {
        let sig = kp.sign(tx.hash().as_bytes()).to_hex();
        let unlock = pay_to_address_unlock(&sig, &kp.public_key_hex());
        Script::composite(&unlock, &pay_to_address_lock(lock_address))
    }

    #[test]
    fn valid_spend_evaluates_true() {
        let (owner, tx) = spend_fixture();
        let script = composite(&owner, &tx, &owner.address());
        let result = PayToAddressEngine::new().execute(&tx, &script).unwrap();
        assert_eq!(result.stack(), &["true".to_string()]);
        assert!(result.verdict());
    }

    #[test]
    fn wrong_key_fails_equalverify() {
        let (owner, tx) = spend_fixture();
        let thief = LedgerKeypair::from_seed(&[2u8; 32]);
        let script = composite(&thief, &tx, &owner.address());
        let result = PayToAddressEngine::new().execute(&tx, &script).unwrap();
        assert!(!result.verdict());
    }

    #[test]
    fn signature_over_other_message_fails_checksig() {
        let (owner, tx) = spend_fixture();
        let sig = owner.sign(b"something else").to_hex();
        let unlock = pay_to_address_unlock(&sig, &owner.public_key_hex());
        let script = Script::composite(&unlock, &pay_to_address_lock(&owner.address()));
        let result = PayToAddressEngine::new().execute(&tx, &script).unwrap();
        assert_eq!(result.stack(), &["false".to_string()]);
    }

    #[test]
    fn garbage_public_key_is_rejection_not_fault() {
        let (owner, tx) = spend_fixture();
        let unlock = pay_to_address_unlock("00", "not-a-key");
        let script = Script::composite(&unlock, &pay_to_address_lock(&owner.address()));
        let result = PayToAddressEngine::new().execute(&tx, &script).unwrap();
        assert!(!result.verdict());
    }

    #[test]
    fn unknown_opcode_is_fault() {
        let (_, tx) = spend_fixture();
        let script = Script::from_tokens(["OP_NOPE"]);
        assert_eq!(
            PayToAddressEngine::new().execute(&tx, &script),
            Err(ScriptError::UnknownOpcode("OP_NOPE".into()))
        );
    }

    #[test]
    fn underflow_is_fault() {
        let (_, tx) = spend_fixture();
        let script = Script::from_tokens([OP_CHECKSIG]);
        assert!(matches!(
            PayToAddressEngine::new().execute(&tx, &script),
            Err(ScriptError::StackUnderflow { .. })
        ));
    }

    #[test]
    fn dangling_pushdata_is_fault() {
        let (_, tx) = spend_fixture();
        let script = Script::from_tokens([OP_PUSHDATA]);
        assert!(matches!(
            PayToAddressEngine::new().execute(&tx, &script),
            Err(ScriptError::MissingOperand { .. })
        ));
    }

    #[test]
    fn operation_limit_bounds_execution() {
        let (_, tx) = spend_fixture();
        let script = Script::from_tokens([OP_PUSHDATA, "a", OP_DUP, OP_DUP, OP_DUP]);
        let engine = PayToAddressEngine::new().limits(ScriptLimits {
            max_ops: 3,
            max_stack: 100,
        });
        assert_eq!(
            engine.execute(&tx, &script),
            Err(ScriptError::OperationLimitExceeded { limit: 3 })
        );
    }

    #[test]
    fn stack_limit_bounds_execution() {
        let (_, tx) = spend_fixture();
        let script = Script::from_tokens([OP_PUSHDATA, "a", OP_DUP, OP_DUP]);
        let engine = PayToAddressEngine::new().limits(ScriptLimits {
            max_ops: 100,
            max_stack: 2,
        });
        assert_eq!(
            engine.execute(&tx, &script),
            Err(ScriptError::StackOverflow { limit: 2 })
        );
    }

    #[test]
    fn each_execution_starts_with_empty_stack() {
        let (_, tx) = spend_fixture();
        let engine = PayToAddressEngine::new();
        let script = Script::from_tokens([OP_PUSHDATA, "x"]);
        let first = engine.execute(&tx, &script).unwrap();
        let second = engine.execute(&tx, &script).unwrap();
        assert_eq!(first.stack().len(), 1);
        assert_eq!(second.stack().len(), 1);
    }
}
