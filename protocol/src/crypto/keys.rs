//! # Key Material
//!
//! Ed25519 keypairs and the string forms the rest of the ledger passes
//! around. The core never inspects key material: private keys travel as hex
//! strings into the signing primitive, public keys travel as hex strings into
//! scripts, and addresses are derived from public keys only so that the
//! pay-to-address script family has something to compare against.
//!
//! Key bytes are never logged.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::hash::sha256;
use crate::config::{ADDRESS_DIGEST_LENGTH, SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH};

/// Errors that can occur while decoding key material.
///
/// Deliberately vague about *why* the bytes were rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid private key: expected 32 hex-encoded bytes")]
    InvalidPrivateKey,

    #[error("invalid public key: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("invalid signature: expected 64 hex-encoded bytes")]
    InvalidSignature,
}

/// Derive the ledger address of a hex-encoded public key.
///
/// `Base58(SHA-256(public key bytes)[..20])`. The key must be a valid
/// Ed25519 point.
pub fn address_from_public_key(public_key_hex: &str) -> Result<String, KeyError> {
    let public_key = LedgerPublicKey::from_hex(public_key_hex)?;
    Ok(public_key.address())
}

// ---------------------------------------------------------------------------
// LedgerKeypair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair.
///
/// Intentionally not `Serialize`: exporting a private key should be an
/// explicit call to [`LedgerKeypair::private_key_hex`].
///
/// # Examples
///
/// ```
/// use ledgerline_protocol::crypto::keys::LedgerKeypair;
///
/// let kp = LedgerKeypair::generate();
/// let sig = kp.sign(b"pay bob");
/// assert!(kp.public_key().verify(b"pay bob", &sig));
/// ```
pub struct LedgerKeypair {
    signing_key: SigningKey,
}

impl LedgerKeypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SIGNING_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse a hex-encoded private key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidPrivateKey)?;
        let seed: [u8; SIGNING_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> LedgerPublicKey {
        LedgerPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Hex-encoded private key.
    ///
    /// **Handle with care.** This is the string the signing primitive takes.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key_hex(&self) -> String {
        self.public_key().to_hex()
    }

    /// Address owned by this keypair.
    pub fn address(&self) -> String {
        self.public_key().address()
    }

    /// Sign a message. Ed25519 is deterministic: same key and message,
    /// same signature.
    pub fn sign(&self, message: &[u8]) -> LedgerSignature {
        LedgerSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }
}

impl Clone for LedgerKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for LedgerKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material.
        write!(f, "LedgerKeypair(pub={})", self.public_key().to_hex())
    }
}

// ---------------------------------------------------------------------------
// LedgerPublicKey
// ---------------------------------------------------------------------------

/// The public half of a keypair.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LedgerPublicKey {
    bytes: [u8; VERIFYING_KEY_LENGTH],
}

impl LedgerPublicKey {
    /// Parse a hex-encoded public key, rejecting bytes that are not a valid
    /// Ed25519 point.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let decoded = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        let bytes: [u8; VERIFYING_KEY_LENGTH] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; VERIFYING_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// `Base58(SHA-256(bytes)[..20])`.
    pub fn address(&self) -> String {
        let digest = sha256(&self.bytes);
        bs58::encode(&digest[..ADDRESS_DIGEST_LENGTH]).into_string()
    }

    /// Verify a signature over `message`. Any malformed input is simply
    /// `false`.
    pub fn verify(&self, message: &[u8], signature: &LedgerSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for LedgerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LedgerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// LedgerSignature
// ---------------------------------------------------------------------------

/// A detached Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct LedgerSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl LedgerSignature {
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let decoded = hex::decode(s).map_err(|_| KeyError::InvalidSignature)?;
        let bytes: [u8; SIGNATURE_LENGTH] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// 128 hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for LedgerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerSignature({}...)", &self.to_hex()[..16])
    }
}
