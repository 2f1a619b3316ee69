//! Exact decimal quantities recovered from on-chain fixed-point integers.
//!
//! Amounts are recorded as integers scaled by `10^decimals`. Dividing by a power of
//! ten only moves the decimal point, so the conversion is done by shifting the
//! `BigDecimal` exponent instead of performing a division. No precision is lost for
//! any magnitude; `f64` only appears at the plotting boundary.

use std::fmt;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};

use crate::config::FIXED_POINT;

/// A power-of-ten fixed-point scale, e.g. 10^18 for 18-decimal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointScale {
    decimals: u32,
}

impl FixedPointScale {
    /// The 18-decimal ("Wei") convention used by ERC20-style tokens.
    pub const WEI: Self = Self::from_decimals(18);

    pub const fn from_decimals(decimals: u32) -> Self {
        Self { decimals }
    }

    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// `10^decimals` as an exact integer.
    pub fn factor(&self) -> BigInt {
        BigInt::from(10u8).pow(self.decimals)
    }

    /// Divides `value` by this scale. Returns `None` when the resulting exponent exceeds
    /// `FIXED_POINT.max_exponent` in either direction.
    pub fn descale(&self, value: BigDecimal) -> Option<BigDecimal> {
        let (digits, exponent) = value.into_bigint_and_exponent();
        let exponent = exponent.checked_add(i64::from(self.decimals))?;
        if exponent.unsigned_abs() > FIXED_POINT.max_exponent {
            return None;
        }
        Some(BigDecimal::new(digits, exponent))
    }
}

impl Default for FixedPointScale {
    fn default() -> Self {
        Self::from_decimals(FIXED_POINT.decimals)
    }
}

impl fmt::Display for FixedPointScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "10^{}", self.decimals)
    }
}

/// A human-readable quantity, exact to the last recorded digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedPointValue(BigDecimal);

impl FixedPointValue {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn from_decimal(value: BigDecimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_decimal(self) -> BigDecimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lossy conversion for plotting.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl Default for FixedPointValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigDecimal> for FixedPointValue {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for FixedPointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalized())
    }
}
