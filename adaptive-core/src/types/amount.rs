//! [`Amount`] represents a monetary amount sent to the Adaptive Payments API.
//!
//! This module holds its type definition and implementations.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A decimal amount in the major unit of the payment currency, e.g. `"10.00"`.
///
/// The value is sent verbatim, so `"10"` and `"10.00"` produce different
/// request bodies even though the API treats them alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(String);

/// Error returned when parsing a malformed [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid amount {0:?}: expected digits with an optional fractional part")]
pub struct ParseAmountError(pub String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds an amount from minor units and a number of decimal places,
    /// e.g. `Amount::from_minor_units(1050, 2)` is `"10.50"`.
    pub fn from_minor_units(value: u64, decimals: u8) -> Self {
        let decimals = decimals as usize;
        if decimals == 0 {
            return Amount(value.to_string());
        }
        let digits = format!("{value:0>width$}", width = decimals + 1);
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        Amount(format!("{whole}.{fraction}"))
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (s, None),
        };
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if digits(whole) && fraction.is_none_or(digits) {
            Ok(Amount(s.to_string()))
        } else {
            Err(ParseAmountError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Amount {
    type Error = ParseAmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Amount {
    type Error = ParseAmountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(value.to_string())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value.to_string())
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
