//! Wide-integer helpers
//!
//! Reserves are 18-decimal-scaled integers, so products of two of them overflow
//! 128 bits and can reach the top of 256. Every product here is formed in
//! `U512` and narrowed once, with an explicit rounding direction.

use ethers_core::types::{U256, U512};
use rust_decimal::Decimal;

use crate::error::{QuoteError, Result};

/// Largest mantissa a [`Decimal`] can hold (2^96 - 1)
const DECIMAL_MANTISSA_MAX: u128 = 79_228_162_514_264_337_593_543_950_335;

/// Highest scale a [`Decimal`] supports
const DECIMAL_MAX_SCALE: usize = 28;

/// Rounding direction for integer division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Towards positive infinity
    Up,
    /// Towards zero
    Down,
}

/// `a * b / denominator` without intermediate overflow
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero("mul_div denominator is zero"));
    }
    div_rounded(a.full_mul(b), U512::from(denominator), rounding)
}

/// Divide two wide values and narrow the quotient back to `U256`
pub fn div_rounded(numerator: U512, denominator: U512, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero("wide division denominator is zero"));
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    let quotient = match rounding {
        Rounding::Up if !remainder.is_zero() => quotient + U512::one(),
        _ => quotient,
    };
    U256::try_from(quotient).map_err(|_| QuoteError::Overflow("quotient exceeds 256 bits"))
}

/// `numerator / denominator` as a [`Decimal`], truncated to the finest scale that fits
pub fn ratio_to_decimal(numerator: U512, denominator: U512) -> Result<Decimal> {
    if denominator.is_zero() {
        return Err(QuoteError::DivisionByZero("ratio denominator is zero"));
    }
    let limit = U512::from(DECIMAL_MANTISSA_MAX);

    for scale in (0..=DECIMAL_MAX_SCALE).rev() {
        let Some(scaled) = numerator.checked_mul(U512::exp10(scale)) else {
            continue;
        };
        let mantissa = scaled / denominator;
        if mantissa <= limit {
            let value = Decimal::from_i128_with_scale(mantissa.low_u128() as i128, scale as u32);
            return Ok(value.normalize());
        }
    }

    Err(QuoteError::Overflow("ratio exceeds decimal range"))
}

/// Convenience wrapper for two narrow operands
pub fn ratio_u256(numerator: U256, denominator: U256) -> Result<Decimal> {
    ratio_to_decimal(U512::from(numerator), U512::from(denominator))
}
