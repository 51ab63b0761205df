//! Spend authorization.
//!
//! For every input, the unlock script and the referenced output's lock
//! script are concatenated (unlock first) and handed to a [`ScriptEngine`]
//! together with the whole transaction. The top of the resulting stack is
//! that input's verdict. A transaction is authorized only if every input
//! is; one with no inputs is authorized vacuously.
//!
//! Three outcomes are kept apart:
//!
//! - `Ok(true)`  every script said yes.
//! - `Ok(false)` some script said no.
//! - `Err(_)`    an input could not be evaluated at all (unresolved
//!   reference, engine fault). Callers must treat this as a rejection too.

use thiserror::Error;
use tracing::{debug, warn};

use super::builder::Transaction;
use crate::script::{Script, ScriptEngine, ScriptError};

/// Reasons an input could not be evaluated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("transaction has no input {index}")]
    NoSuchInput { index: usize },

    #[error("input {index} references no resolved output")]
    UnresolvedInput { index: usize },

    #[error("script execution failed on input {index}: {source}")]
    Script {
        index: usize,
        #[source]
        source: ScriptError,
    },
}

/// Authorize a single input.
pub fn authorize_input<E: ScriptEngine + ?Sized>(
    engine: &E,
    transaction: &Transaction,
    index: usize,
) -> Result<bool, AuthorizationError> {
    let input = transaction
        .inputs()
        .get(index)
        .ok_or(AuthorizationError::NoSuchInput { index })?;
    let spent = input.spent_output().ok_or_else(|| {
        warn!(tx = %transaction.hash(), index, "input has no resolved output");
        AuthorizationError::UnresolvedInput { index }
    })?;

    let script = Script::composite(input.unlock_script(), spent.lock_script());
    let result = engine.execute(transaction, &script).map_err(|source| {
        warn!(tx = %transaction.hash(), index, error = %source, "script execution fault");
        AuthorizationError::Script { index, source }
    })?;

    let verdict = result.verdict();
    debug!(tx = %transaction.hash(), index, verdict, "input evaluated");
    Ok(verdict)
}

/// Authorize every input of `transaction`.
///
/// Inputs are evaluated in order, each on a fresh engine evaluation. The
/// first `false` verdict or fault ends the check.
pub fn authorize<E: ScriptEngine + ?Sized>(
    engine: &E,
    transaction: &Transaction,
) -> Result<bool, AuthorizationError> {
    for index in 0..transaction.inputs().len() {
        if !authorize_input(engine, transaction, index)? {
            debug!(tx = %transaction.hash(), index, "transaction not authorized");
            return Ok(false);
        }
    }
    Ok(true)
}
