//! Fixed-point decimal used for prices and ratings

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Largest magnitude representable by a `NUMERIC(18, 2)` column, in hundredths
const MAX_HUNDREDTHS: i64 = 999_999_999_999_999_999;

/// Errors produced when converting a float into an `Amount`
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    #[error("amount must be a finite number")]
    NotFinite,

    #[error("amount is out of range")]
    OutOfRange,
}

/// Decimal value with exactly two fractional digits, stored as hundredths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Build from a count of hundredths (`1250` is `12.50`)
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Round a float to the nearest hundredth, half away from zero
    ///
    /// Rounding works on the shortest decimal text that reproduces the float,
    /// so `1.005` becomes `1.01` even though its binary value is slightly lower.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }

        // f64 Display never uses exponent notation
        let text = value.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let whole: i128 = whole.parse().map_err(|_| AmountError::OutOfRange)?;
        let mut digits = fraction.bytes().map(|b| i128::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let carry = digits.next().map_or(0, |d| i128::from(d >= 5));

        let scaled = whole
            .checked_mul(100)
            .map(|cents| cents + tenths * 10 + hundredths + carry)
            .filter(|scaled| *scaled <= i128::from(MAX_HUNDREDTHS))
            .ok_or(AmountError::OutOfRange)?;

        let scaled = scaled as i64;
        Ok(Self(if value.is_sign_negative() { -scaled } else { scaled }))
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::from_f64(value).map_err(de::Error::custom)
    }
}
