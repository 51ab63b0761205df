//! # Signing Primitive
//!
//! The ledger core only decides *what* gets signed (a transaction's identity
//! hash). Producing and checking signatures is delegated to a
//! [`SigningPrimitive`], which works purely on strings: an opaque private key,
//! an opaque public key, a message, and an opaque signature.
//!
//! [`Ed25519Signer`] is the default primitive. Keys and signatures are hex;
//! the message is signed as its UTF-8 bytes.

use thiserror::Error;

use super::keys::{KeyError, LedgerKeypair, LedgerPublicKey, LedgerSignature};

/// Errors during signing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The private key could not be decoded by the primitive.
    #[error("unusable private key: {0}")]
    InvalidPrivateKey(#[from] KeyError),

    /// The message to sign was empty. Signing an empty identity hash means
    /// the record was never hashed.
    #[error("refusing to sign an empty message")]
    EmptyMessage,
}

/// A detached-signature scheme over string messages.
///
/// Implementations must be deterministic in what they accept: `verify` never
/// panics and never errors, malformed inputs are just `false`.
pub trait SigningPrimitive {
    /// Sign `message` with `private_key`.
    fn sign(&self, private_key: &str, message: &str) -> Result<String, SignatureError>;

    /// Check `signature` over `message` against `public_key`.
    fn verify(&self, public_key: &str, message: &str, signature: &str) -> bool;
}

/// Ed25519 over hex-encoded keys and signatures.
///
/// # Example
///
/// ```
/// use ledgerline_protocol::crypto::keys::LedgerKeypair;
/// use ledgerline_protocol::crypto::signatures::{Ed25519Signer, SigningPrimitive};
///
/// let kp = LedgerKeypair::generate();
/// let sig = Ed25519Signer.sign(&kp.private_key_hex(), "hash").unwrap();
/// assert!(Ed25519Signer.verify(&kp.public_key_hex(), "hash", &sig));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Signer;

impl SigningPrimitive for Ed25519Signer {
    fn sign(&self, private_key: &str, message: &str) -> Result<String, SignatureError> {
        if message.is_empty() {
            return Err(SignatureError::EmptyMessage);
        }
        let keypair = LedgerKeypair::from_hex(private_key)?;
        Ok(keypair.sign(message.as_bytes()).to_hex())
    }

    fn verify(&self, public_key: &str, message: &str, signature: &str) -> bool {
        let Ok(public_key) = LedgerPublicKey::from_hex(public_key) else {
            return false;
        };
        let Ok(signature) = LedgerSignature::from_hex(signature) else {
            return false;
        };
        public_key.verify(message.as_bytes(), &signature)
    }
}
