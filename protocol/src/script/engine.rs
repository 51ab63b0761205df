//! The script-engine seam.
//!
//! A [`ScriptEngine`] evaluates one composite script against the transaction
//! being authorized and returns the final stack. The engine owns opcode
//! semantics; the authorizer only pops the top token and reads it as a
//! boolean.
//!
//! Implementations must build a fresh evaluation context on every call and
//! must bound execution themselves. Faults (malformed scripts) come back as
//! `Err`, never as a `false` verdict, so callers can tell "the script said
//! no" apart from "the engine broke".

use thiserror::Error;

use super::Script;
use crate::config::{SCRIPT_FALSE, SCRIPT_TRUE};
use crate::transaction::Transaction;

/// Execution faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown opcode {0:?}")]
    UnknownOpcode(String),

    #[error("stack underflow at {opcode}")]
    StackUnderflow { opcode: String },

    #[error("{opcode} is missing its operand")]
    MissingOperand { opcode: String },

    #[error("operation limit exceeded (max {limit})")]
    OperationLimitExceeded { limit: usize },

    #[error("stack overflow (max {limit})")]
    StackOverflow { limit: usize },
}

/// Final stack of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    stack: Vec<String>,
}

impl ExecutionResult {
    pub fn new(stack: Vec<String>) -> Self {
        Self { stack }
    }

    /// A result that leaves a single `false` on the stack.
    pub fn rejected() -> Self {
        Self::new(vec![SCRIPT_FALSE.to_string()])
    }

    /// Pop the top token.
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// The top token read as a boolean: `true` only for a case-insensitive
    /// `"true"`. An empty stack is `false`.
    pub fn verdict(mut self) -> bool {
        self.pop()
            .map_or(false, |top| top.eq_ignore_ascii_case(SCRIPT_TRUE))
    }
}

/// Evaluates composite scripts.
///
/// One implementation per lock-script family.
pub trait ScriptEngine {
    fn execute(&self, transaction: &Transaction, script: &Script) -> Result<ExecutionResult, ScriptError>;
}

impl<F> ScriptEngine for F
where
    F: Fn(&Transaction, &Script) -> Result<ExecutionResult, ScriptError>,
{
    fn execute(&self, transaction: &Transaction, script: &Script) -> Result<ExecutionResult, ScriptError> {
        self(transaction, script)
    }
}
