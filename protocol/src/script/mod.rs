//! # Locking Scripts
//!
//! A script is an ordered list of opaque string tokens. Outputs carry a lock
//! script; inputs carry an unlock script; spending evaluates the two back to
//! back (`unlock ++ lock`) on a [`ScriptEngine`].
//!
//! ```text
//! engine.rs          the ScriptEngine seam, ExecutionResult, ScriptError
//! pay_to_address.rs  reference engine for the pay-to-address family
//! ```
//!
//! The core never interprets tokens itself. For hashing, a lock script is
//! just its tokens joined with a single space.

pub mod engine;
pub mod pay_to_address;

use serde::{Deserialize, Serialize};

use crate::config::SCRIPT_TOKEN_DELIMITER;

pub use engine::{ExecutionResult, ScriptEngine, ScriptError};
pub use pay_to_address::{pay_to_address_lock, pay_to_address_unlock, PayToAddressEngine};

/// An ordered sequence of opaque script tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(Vec<String>);

impl Script {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Build a script from anything string-like.
    ///
    /// ```
    /// use ledgerline_protocol::script::Script;
    ///
    /// let s = Script::from_tokens(["OP_PUSHDATA", "addr"]);
    /// assert_eq!(s.len(), 2);
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// `unlock` tokens followed by `lock` tokens.
    pub fn composite(unlock: &Script, lock: &Script) -> Self {
        let mut tokens = Vec::with_capacity(unlock.len() + lock.len());
        tokens.extend_from_slice(&unlock.0);
        tokens.extend_from_slice(&lock.0);
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens joined with a single space, as fed to the output identity hash.
    pub fn joined(&self) -> String {
        self.0.join(SCRIPT_TOKEN_DELIMITER)
    }
}

impl From<Vec<String>> for Script {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<Script> for Vec<String> {
    fn from(script: Script) -> Self {
        script.0
    }
}
