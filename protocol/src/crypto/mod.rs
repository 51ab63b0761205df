//! # Cryptographic Primitives
//!
//! Everything hash- or key-shaped flows through here:
//!
//! - **hash**: the digest codec: field canonicalization, SHA-256, the two
//!   identifier alphabets, and [`Identifier`].
//! - **keys**: Ed25519 keypairs, public keys, signatures and addresses.
//! - **signatures**: the [`SigningPrimitive`] seam and its Ed25519 default.
//!
//! Everything here is a thin wrapper around audited crates (`sha2`, `bs58`,
//! `base64`, `ed25519-dalek`).

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{canonicalize, digest_fields, sha256, Alphabet, Identifier};
pub use keys::{address_from_public_key, KeyError, LedgerKeypair, LedgerPublicKey, LedgerSignature};
pub use signatures::{Ed25519Signer, SignatureError, SigningPrimitive};
