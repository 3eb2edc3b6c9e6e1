//! Fractions in the closed range [0, 1]
//!
//! Fees and slippage tolerances are carried as [`Fraction`]. A value outside
//! [0, 1] indicates a caller defect, so it is rejected at construction and the
//! math functions never see it.

use std::fmt;

use ethers_core::types::U256;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// A [`Decimal`] known to lie in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fraction(pub(crate) Decimal);

impl Fraction {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    /// Validate `value` into a fraction
    pub fn new(value: Decimal) -> Result<Self> {
        if (value.is_sign_negative() && !value.is_zero()) || value > Decimal::ONE {
            return Err(QuoteError::InvalidFraction(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Fraction from basis points (30 = 0.3%)
    pub fn from_bps(bps: u32) -> Result<Self> {
        Self::new(Decimal::new(i64::from(bps), 4))
    }

    /// Fraction from a percentage as entered in a settings panel (0.5 = 0.5%)
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        let value = percent
            .checked_div(dec!(100))
            .ok_or(QuoteError::Overflow("percent conversion"))?;
        Self::new(value)
    }

    pub fn get(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0 == Decimal::ONE
    }

    /// Value as a percentage (0.005 -> 0.5)
    pub fn as_percent(&self) -> Decimal {
        self.0 * dec!(100)
    }

    /// Exact integer ratio `(numerator, denominator)` with a power-of-ten denominator
    pub(crate) fn ratio(&self) -> (U256, U256) {
        // Mantissa is non-negative and at most 10^28 for values in [0, 1].
        let numerator = U256::from(self.0.mantissa().unsigned_abs());
        let denominator = U256::exp10(self.0.scale() as usize);
        (numerator, denominator)
    }

    /// Exact ratio of `1 - self`
    pub(crate) fn complement_ratio(&self) -> (U256, U256) {
        let (numerator, denominator) = self.ratio();
        (denominator - numerator, denominator)
    }
}

impl TryFrom<Decimal> for Fraction {
    type Error = QuoteError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Fraction> for Decimal {
    fn from(value: Fraction) -> Self {
        value.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
