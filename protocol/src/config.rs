//! # Protocol Configuration & Constants
//!
//! Every constant that feeds an identity hash lives here. Changing any of
//! them changes every hash the protocol has ever produced, so treat this file
//! as frozen once records exist on disk somewhere.

use serde::{Deserialize, Serialize};

use crate::crypto::hash::Alphabet;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full version string of the identity rules implemented by this crate.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Digest Codec
// ---------------------------------------------------------------------------

/// Opening delimiter wrapped around every field before hashing.
pub const FIELD_OPEN: char = '[';

/// Closing delimiter wrapped around every field before hashing.
pub const FIELD_CLOSE: char = ']';

/// Joiner for the variable-length lists of a transaction (referenced output
/// hashes, produced output hashes, messages).
pub const LIST_DELIMITER: &str = ",";

/// Joiner for lock-script tokens when an output is hashed.
pub const SCRIPT_TOKEN_DELIMITER: &str = " ";

/// Alphabet of output identifiers.
pub const OUTPUT_HASH_ALPHABET: Alphabet = Alphabet::Base58;

/// Alphabet of transaction identifiers. Distinct from outputs so the two
/// identifier families can be told apart at a glance.
pub const TRANSACTION_HASH_ALPHABET: Alphabet = Alphabet::Base64;

/// Hash output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Signature scheme used by the default signing primitive.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Signing key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Public (verifying) key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Number of SHA-256 bytes of a public key kept for its address.
pub const ADDRESS_DIGEST_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Transaction Type Codes
// ---------------------------------------------------------------------------

/// Reward transactions mint value and spend nothing.
pub const TRANSACTION_TYPE_REWARD: i32 = 0;

/// Ordinary transfers spend prior outputs.
pub const TRANSACTION_TYPE_TRANSFER: i32 = 1;

// ---------------------------------------------------------------------------
// Script Execution
// ---------------------------------------------------------------------------

/// Maximum opcodes evaluated per script. Keeps every evaluation bounded.
pub const MAX_SCRIPT_OPS: usize = 201;

/// Maximum evaluation stack depth.
pub const MAX_STACK_SIZE: usize = 1000;

/// Token a script leaves on the stack to signal success.
pub const SCRIPT_TRUE: &str = "true";

/// Token a script leaves on the stack to signal failure.
pub const SCRIPT_FALSE: &str = "false";

/// Execution bounds for a script engine.
///
/// Every evaluation gets its own fresh stack; these limits apply per
/// evaluation, never across inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLimits {
    /// Maximum opcodes evaluated before the script is rejected.
    pub max_ops: usize,
    /// Maximum number of tokens on the stack at any point.
    pub max_stack: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_ops: MAX_SCRIPT_OPS,
            max_stack: MAX_STACK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabets_are_distinct() {
        assert_ne!(OUTPUT_HASH_ALPHABET, TRANSACTION_HASH_ALPHABET);
    }

    #[test]
    fn test_type_codes_are_distinct() {
        assert_ne!(TRANSACTION_TYPE_REWARD, TRANSACTION_TYPE_TRANSFER);
    }

    #[test]
    fn test_default_script_limits() {
        let limits = ScriptLimits::default();
        assert_eq!(limits.max_ops, MAX_SCRIPT_OPS);
        assert_eq!(limits.max_stack, MAX_STACK_SIZE);
    }

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(SIGNING_KEY_LENGTH, 32);
        assert_eq!(VERIFYING_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(HASH_OUTPUT_LENGTH, 32);
        assert!(ADDRESS_DIGEST_LENGTH <= HASH_OUTPUT_LENGTH);
    }

    #[test]
    fn test_script_limits_deserialize() {
        let limits: ScriptLimits =
            serde_json::from_str(r#"{"max_ops": 10, "max_stack": 4}"#).unwrap();
        assert_eq!(limits.max_ops, 10);
        assert_eq!(limits.max_stack, 4);
    }
}
