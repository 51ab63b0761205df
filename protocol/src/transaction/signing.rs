//! Transaction signing.
//!
//! A transaction is signed over its identity hash string, nothing else. The
//! hash already commits to every spent and produced output and to the
//! messages, and it never depends on unlock scripts, so a signature can be
//! produced after the transaction is built and then carried in an unlock
//! script without invalidating itself.

use tracing::debug;

use super::builder::Transaction;
use crate::crypto::signatures::{SignatureError, SigningPrimitive};

/// The exact payload a signature over `transaction` covers.
pub fn signature_payload(transaction: &Transaction) -> &str {
    transaction.hash()
}

/// Sign `transaction` with `private_key`.
///
/// # Example
///
/// ```
/// use ledgerline_protocol::crypto::keys::LedgerKeypair;
/// use ledgerline_protocol::crypto::signatures::Ed25519Signer;
/// use ledgerline_protocol::script::Script;
/// use ledgerline_protocol::transaction::{
///     sign_transaction, verify_transaction_signature, TransactionBuilder, TransactionType,
/// };
///
/// let kp = LedgerKeypair::generate();
/// let tx = TransactionBuilder::new(TransactionType::Reward)
///     .timestamp(1)
///     .output(kp.address(), "50".parse().unwrap(), Script::default())
///     .build()
///     .unwrap();
///
/// let sig = sign_transaction(&Ed25519Signer, &kp.private_key_hex(), &tx).unwrap();
/// assert!(verify_transaction_signature(&Ed25519Signer, &kp.public_key_hex(), &tx, &sig));
/// ```
pub fn sign_transaction<S: SigningPrimitive + ?Sized>(
    primitive: &S,
    private_key: &str,
    transaction: &Transaction,
) -> Result<String, SignatureError> {
    let signature = primitive.sign(private_key, signature_payload(transaction))?;
    debug!(tx = %transaction.hash(), "transaction signed");
    Ok(signature)
}

/// Check `signature` over `transaction` against `public_key`.
pub fn verify_transaction_signature<S: SigningPrimitive + ?Sized>(
    primitive: &S,
    public_key: &str,
    transaction: &Transaction,
    signature: &str,
) -> bool {
    primitive.verify(public_key, signature_payload(transaction), signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
