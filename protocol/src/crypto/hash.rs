//! # Digest Codec
//!
//! Every identity hash in the ledger is produced by the same three steps:
//!
//! 1. **Canonicalize**: wrap each field as `[field]` and concatenate them in
//!    the exact order the caller gave. Order is part of the meaning; nothing
//!    here ever sorts or deduplicates.
//! 2. **Digest**: SHA-256 over the UTF-8 bytes of that string.
//! 3. **Encode**: render the digest in an [`Alphabet`] and append the decimal
//!    timestamp, unseparated.
//!
//! The timestamp suffix makes two records with identical content (say, two
//! zero-message transfers of the same amount) get different identifiers. The
//! price is that an identifier is no longer a pure integrity digest, so the
//! two halves are kept apart in [`Identifier`] and only joined on display.
//! Verification always compares the whole rendered string.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{FIELD_CLOSE, FIELD_OPEN, HASH_OUTPUT_LENGTH};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use ledgerline_protocol::crypto::sha256;
///
/// let hash = sha256(b"ledgerline");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_OUTPUT_LENGTH];
    output.copy_from_slice(&result);
    output
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// Textual encoding applied to a digest.
///
/// Two identifier families exist and each is pinned to one alphabet in
/// [`crate::config`]. The choice is cosmetic, not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alphabet {
    /// Bitcoin Base58 alphabet, no checksum.
    Base58,
    /// RFC 4648 standard Base64 with `=` padding.
    Base64,
}

impl Alphabet {
    /// Encode raw bytes in this alphabet.
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Base58 => bs58::encode(bytes).into_string(),
            Self::Base64 => general_purpose::STANDARD.encode(bytes),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base58 => write!(f, "base58"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonicalization & digest
// ---------------------------------------------------------------------------

/// Wrap each field in brackets and concatenate, preserving caller order.
pub fn canonicalize<S: AsRef<str>>(fields: &[S]) -> String {
    let capacity = fields.iter().map(|f| f.as_ref().len() + 2).sum();
    let mut out = String::with_capacity(capacity);
    for field in fields {
        out.push(FIELD_OPEN);
        out.push_str(field.as_ref());
        out.push(FIELD_CLOSE);
    }
    out
}

/// SHA-256 of the canonical form of `fields`.
pub fn digest_fields<S: AsRef<str>>(fields: &[S]) -> [u8; HASH_OUTPUT_LENGTH] {
    sha256(canonicalize(fields).as_bytes())
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A record identifier: a pure content digest plus the creation timestamp.
///
/// The external form is `encode(digest) ++ timestamp`, produced by
/// `Display`. Keeping the parts separate lets callers check content integrity
/// (`content_digest`) independently from uniqueness (`timestamp`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    digest: [u8; HASH_OUTPUT_LENGTH],
    alphabet: Alphabet,
    timestamp: u64,
}

impl Identifier {
    /// Derive an identifier from ordered fields.
    pub fn derive<S: AsRef<str>>(timestamp: u64, fields: &[S], alphabet: Alphabet) -> Self {
        Self {
            digest: digest_fields(fields),
            alphabet,
            timestamp,
        }
    }

    /// The raw SHA-256 content digest.
    pub fn content_digest(&self) -> &[u8; HASH_OUTPUT_LENGTH] {
        &self.digest
    }

    /// The content digest rendered in this identifier's alphabet, without
    /// the timestamp suffix.
    pub fn encoded_digest(&self) -> String {
        self.alphabet.encode(&self.digest)
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.encoded_digest(), self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn canonicalize_wraps_in_order() {
        assert_eq!(canonicalize(&["b", "a", ""]), "[b][a][]");
        assert_eq!(canonicalize::<&str>(&[]), "");
    }

    #[test]
    fn field_order_changes_digest() {
        assert_ne!(digest_fields(&["a", "b"]), digest_fields(&["b", "a"]));
    }

    #[test]
    fn field_boundaries_change_digest() {
        // "[ab][c]" and "[a][bc]" must not collide.
        assert_ne!(digest_fields(&["ab", "c"]), digest_fields(&["a", "bc"]));
    }

    #[test]
    fn base58_encoding_known_vector() {
        assert_eq!(Alphabet::Base58.encode(b"hello world"), "StV1DL6CwTryKyV");
    }

    #[test]
    fn base64_encoding_is_padded() {
        let encoded = Alphabet::Base64.encode(&[0u8; 32]);
        assert_eq!(encoded.len(), 44);
        assert!(encoded.ends_with('='));
    }

    #[test]
    fn identifier_renders_digest_then_timestamp() {
        let id = Identifier::derive(1000, &["x"], Alphabet::Base58);
        let rendered = id.to_string();
        assert!(rendered.ends_with("1000"));
        assert_eq!(rendered, format!("{}1000", id.encoded_digest()));
        assert_eq!(id.content_digest(), &digest_fields(&["x"]));
    }

    #[test]
    fn identical_content_different_timestamps() {
        let a = Identifier::derive(1, &["same"], Alphabet::Base64);
        let b = Identifier::derive(2, &["same"], Alphabet::Base64);
        assert_eq!(a.content_digest(), b.content_digest());
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn alphabet_changes_rendering_not_digest() {
        let a = Identifier::derive(7, &["f"], Alphabet::Base58);
        let b = Identifier::derive(7, &["f"], Alphabet::Base64);
        assert_eq!(a.content_digest(), b.content_digest());
        assert_ne!(a.to_string(), b.to_string());
    }
}
