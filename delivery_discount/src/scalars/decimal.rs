use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref, str::FromStr};

/// Convenience wrapper for converting between Shopify's `Decimal` scalar, which
/// is serialized as a `String`, and Rust's `f64`.
#[derive(Deserialize, Serialize, Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Decimal(pub f64);

impl Decimal {
    /// Access the value as an `f64`
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Rounds to two decimal places, halves away from zero.
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl Deref for Decimal {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = std::num::ParseFloatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        f64::from_str(value.trim()).map(Self)
    }
}

impl TryFrom<String> for Decimal {
    type Error = std::num::ParseFloatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        ryu::Buffer::new().format(value.0).to_string()
    }
}

impl From<Decimal> for f64 {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
