//! Core value types for ledger transactions.
//!
//! [`Amount`] is the one type here that feeds straight into an identity hash,
//! so it only accepts one textual form per value-and-scale: plain decimal
//! digits, no sign, no exponent, no leading zeros. Anything else is rejected
//! at parse time instead of being quietly normalized.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{TRANSACTION_TYPE_REWARD, TRANSACTION_TYPE_TRANSFER};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while parsing amounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The string is not in canonical plain decimal form.
    #[error("non-canonical amount {0:?}: expected plain decimal digits like \"10.00\"")]
    NonCanonical(String),
}

/// An unknown transaction type code arrived from the transport layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown transaction type code {0}")]
pub struct UnknownTransactionType(pub i32);

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Category of a transaction. The numeric code is what gets hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Mints new value; spends nothing.
    Reward,
    /// Spends prior outputs into new ones.
    Transfer,
}

impl TransactionType {
    /// Stable numeric code fed into the transaction identity hash.
    pub fn code(&self) -> i32 {
        match self {
            Self::Reward => TRANSACTION_TYPE_REWARD,
            Self::Transfer => TRANSACTION_TYPE_TRANSFER,
        }
    }
}

impl TryFrom<i32> for TransactionType {
    type Error = UnknownTransactionType;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            TRANSACTION_TYPE_REWARD => Ok(Self::Reward),
            TRANSACTION_TYPE_TRANSFER => Ok(Self::Transfer),
            other => Err(UnknownTransactionType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reward => write!(f, "Reward"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative, arbitrary-precision decimal amount.
///
/// The scale is preserved: `"10.00"` parses and renders back as `"10.00"`,
/// never `"10"` or `"1E+1"`. Equality and ordering are numeric, so
/// `10.00 == 10.0`, but only the rendered string is ever hashed.
///
/// # Examples
///
/// ```
/// use ledgerline_protocol::transaction::types::Amount;
///
/// let ten: Amount = "10.00".parse().unwrap();
/// assert_eq!(ten.to_string(), "10.00");
/// assert!("1e3".parse::<Amount>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(BigDecimal);

impl Amount {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self - other`, or `None` if the result would be negative.
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 < other.0 {
            return None;
        }
        Some(Self(&self.0 - &other.0))
    }

    /// Canonical plain decimal rendering. Identical to `to_string()`.
    pub fn to_plain_string(&self) -> String {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        let digits = digits.to_string();
        if scale <= 0 {
            let zeros = "0".repeat(scale.unsigned_abs() as usize);
            return format!("{}{}", digits, zeros);
        }
        let scale = scale as usize;
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let split = padded.len() - scale;
        format!("{}.{}", &padded[..split], &padded[split..])
    }
}

/// `^(0|[1-9][0-9]*)(\.[0-9]+)?$`
fn is_canonical(s: &str) -> bool {
    let (integer, fraction) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if integer.len() > 1 && integer.starts_with('0') {
        return false;
    }
    match fraction {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_canonical(s) {
            return Err(AmountError::NonCanonical(s.to_string()));
        }
        let value =
            BigDecimal::from_str(s).map_err(|_| AmountError::NonCanonical(s.to_string()))?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_plain_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<'a> Add<&'a Amount> for Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(self.0 + &rhs.0)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn canonical_forms_render_unchanged() {
        for s in ["0", "5", "10", "10.00", "0.5", "0.000001", "123456789012345678901234.5"] {
            assert_eq!(amt(s).to_string(), s);
        }
    }

    #[test]
    fn every_canonical_string_parses() {
        let long = format!("{}.{}", "9".repeat(400), "0".repeat(400));
        assert_eq!(amt(&long).to_string(), long);
        assert_eq!(amt("0.0").to_string(), "0.0");
    }

    #[test]
    fn non_canonical_forms_rejected() {
        for s in ["", " 1", "1 ", "+1", "-1", "01", "00.5", "1.", ".5", "1e3", "1E+1", "1,0", "abc"] {
            assert_eq!(
                s.parse::<Amount>(),
                Err(AmountError::NonCanonical(s.to_string())),
                "{:?} should be rejected",
                s
            );
        }
    }

    #[test]
    fn addition_is_exact_and_keeps_scale() {
        let sum = amt("5") + &amt("10.00");
        assert_eq!(sum.to_string(), "15.00");

        let tiny = amt("0.1") + &amt("0.2");
        assert_eq!(tiny.to_string(), "0.3");
    }

    #[test]
    fn checked_sub_refuses_negative() {
        assert_eq!(amt("10.00").checked_sub(&amt("2.5")).unwrap().to_string(), "7.50");
        assert!(amt("1").checked_sub(&amt("1.01")).is_none());
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(amt("10.00"), amt("10"));
        assert!(amt("10.01") > amt("10"));
    }

    #[test]
    fn zero_amount() {
        assert!(Amount::zero().is_zero());
        assert_eq!(Amount::zero().to_string(), "0");
        assert!(!amt("0.01").is_zero());
    }

    #[test]
    fn amount_serializes_as_string() {
        let json = serde_json::to_string(&amt("10.00")).unwrap();
        assert_eq!(json, "\"10.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "10.00");
        assert!(serde_json::from_str::<Amount>("\"1e2\"").is_err());
    }

    #[test]
    fn transaction_type_codes() {
        assert_eq!(TransactionType::Reward.code(), 0);
        assert_eq!(TransactionType::Transfer.code(), 1);
        assert_eq!(TransactionType::try_from(1), Ok(TransactionType::Transfer));
        assert_eq!(TransactionType::try_from(9), Err(UnknownTransactionType(9)));
    }

    #[test]
    fn transaction_type_display() {
        assert_eq!(TransactionType::Transfer.to_string(), "Transfer");
        assert_eq!(TransactionType::Reward.to_string(), "Reward");
    }
}
