//! # Transaction Module
//!
//! Outputs, transactions, their identity hashes, and the checks a verifier
//! runs before trusting one.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         TransactionType codes and the canonical Amount
//! output.rs        Output and Input
//! identity.rs      canonical records and the two identity hashes
//! builder.rs       Transaction and the fluent TransactionBuilder
//! transport.rs     flat DTOs and conversion to/from the rich form
//! aggregate.rs     lenient value sums over inputs and outputs
//! authorization.rs per-input script evaluation, AND across inputs
//! signing.rs       signatures over the transaction hash
//! verification.rs  full integrity + authorization check
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** with [`TransactionBuilder`]; every hash is derived once.
//! 2. **Sign** the transaction hash with [`sign_transaction`] and place the
//!    signature in each input's unlock script.
//! 3. **Ship** it as a [`TransactionDto`].
//! 4. **Verify** on receipt with [`verify_transaction`].

pub mod aggregate;
pub mod authorization;
pub mod builder;
pub mod identity;
pub mod output;
pub mod signing;
pub mod transport;
pub mod types;
pub mod verification;

pub use aggregate::{sum_inputs, sum_outputs};
pub use authorization::{authorize, authorize_input, AuthorizationError};
pub use builder::{Transaction, TransactionBuilder};
pub use identity::{
    derive_output_hash, derive_transaction_hash, verify_output_hash, verify_transaction_hash,
    IdentityError, OutputRecord, TransactionRecord,
};
pub use output::{Input, Output};
pub use signing::{sign_transaction, signature_payload, verify_transaction_signature};
pub use transport::{InputDto, OutputDto, TransactionDto};
pub use types::{Amount, AmountError, TransactionType, UnknownTransactionType};
pub use verification::{verify_transaction, TransactionError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::PayToAddressEngine;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_across_threads() {
        assert_send_sync::<Amount>();
        assert_send_sync::<Output>();
        assert_send_sync::<Input>();
        assert_send_sync::<Transaction>();
        assert_send_sync::<TransactionDto>();
        assert_send_sync::<TransactionError>();
        assert_send_sync::<PayToAddressEngine>();
    }
}
