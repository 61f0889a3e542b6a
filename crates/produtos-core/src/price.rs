//! Exact decimal prices.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A decimal price.
///
/// Backed by `BigDecimal` so values keep the exact digits they were sent
/// with. Serialized as a JSON string (e.g. `"9.99"`); accepted on input as a
/// JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(BigDecimal);

/// Reason a value could not be read as a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Not a number or numeric string.
    NotANumber,
    /// Parsed, but below zero.
    Negative,
}

impl Price {
    /// Parse decimal text.
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        BigDecimal::from_str(text.trim())
            .map(Self)
            .map_err(|_| PriceError::NotANumber)
    }

    /// Read a price from a JSON value.
    ///
    /// Numbers are parsed from their literal text, so `0.1` stays `0.1`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PriceError> {
        match value {
            serde_json::Value::Number(n) => Self::parse(&n.to_string()),
            serde_json::Value::String(s) => Self::parse(s),
            _ => Err(PriceError::NotANumber),
        }
    }

    /// Read a non-negative price from a JSON value.
    pub fn from_json_non_negative(value: &serde_json::Value) -> Result<Self, PriceError> {
        let price = Self::from_json(value)?;
        if price.is_negative() {
            return Err(PriceError::Negative);
        }
        Ok(price)
    }

    /// Check if this is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::from(0i64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(|_| de::Error::custom("expected a decimal price"))
    }
}
