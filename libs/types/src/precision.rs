//! Precision Handling for Token Amounts
//!
//! Converts between user-facing decimal strings and the smallest-unit integers
//! pools and routers operate on, without ever passing through floating point.
//!
//! ## Precision by Token
//!
//! - **ETH / DAI / UNI / LINK**: 18 decimal places (`1 ETH = 1_000_000_000_000_000_000 wei`)
//! - **USDC / USDT**: 6 decimal places (`1 USDC = 1_000_000 units`)
//! - **WBTC**: 8 decimal places (`1 WBTC = 100_000_000 satoshis`)
//!
//! ## Critical Rules
//!
//! 1. **NO FLOATING POINT**: Amounts are parsed digit by digit into `U256`
//! 2. **Preserve Native Precision**: Each token keeps its own decimals
//! 3. **Reject, Don't Round**: Input with more fractional digits than the token supports is an error
//!
//! ## Example Usage
//!
//! ```rust
//! use dexkit_types::precision::{format_units, parse_units};
//!
//! let wei = parse_units("1.5", 18).unwrap();
//! assert_eq!(wei.to_string(), "1500000000000000000");
//! assert_eq!(format_units(wei, 18), "1.5");
//! ```

use std::fmt;

use ethers_core::types::U256;
use serde::Serialize;
use thiserror::Error;

/// Most decimals a `U256` can scale by (10^77 < 2^256 < 10^78)
pub const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrecisionError {
    #[error("Invalid number: {input:?}")]
    InvalidNumber { input: String },

    #[error("Too many decimal places in {input:?}: got {got}, token supports {max}")]
    TooManyDecimals { input: String, got: usize, max: u8 },

    #[error("Value overflow: {0}")]
    Overflow(String),

    #[error("Unsupported decimals: {0} exceeds 77")]
    UnsupportedDecimals(u8),
}

pub type Result<T> = std::result::Result<T, PrecisionError>;

/// Parse a non-negative decimal string into smallest units
///
/// Accepts `"12"`, `"12.5"`, `".5"` and `"12."`. Signs, exponents, separators
/// and surrounding text are rejected.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256> {
    if decimals > MAX_DECIMALS {
        return Err(PrecisionError::UnsupportedDecimals(decimals));
    }

    let trimmed = input.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
    {
        return Err(PrecisionError::InvalidNumber {
            input: input.to_string(),
        });
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(PrecisionError::TooManyDecimals {
            input: input.to_string(),
            got: fraction.len(),
            max: decimals,
        });
    }

    let padding = decimals as usize - fraction.len();
    let digits = format!("{whole}{fraction}{}", "0".repeat(padding));
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits)
        .map_err(|_| PrecisionError::Overflow(format!("{input} does not fit 256 bits")))
}

/// Render smallest units as a minimal decimal string (`"1.5"`, `"100"`)
pub fn format_units(value: U256, decimals: u8) -> String {
    let (whole, fraction) = split_digits(value, decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Render smallest units truncated to at most `places` fractional digits
///
/// Display helper for tables; truncation never overstates an amount.
pub fn format_units_truncated(value: U256, decimals: u8, places: usize) -> String {
    let (whole, fraction) = split_digits(value, decimals);
    let kept = &fraction[..fraction.len().min(places)];
    let kept = kept.trim_end_matches('0');
    if kept.is_empty() {
        whole
    } else {
        format!("{whole}.{kept}")
    }
}

fn split_digits(value: U256, decimals: u8) -> (String, String) {
    let digits = value.to_string();
    let width = decimals as usize;
    if width == 0 {
        return (digits, String::new());
    }
    let padded = if digits.len() <= width {
        format!("{digits:0>pad$}", pad = width + 1)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - width);
    (whole.to_string(), fraction.to_string())
}

/// Token amount with native precision preservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenAmount {
    /// Raw amount in smallest units (wei for ETH, etc.)
    pub raw: U256,
    /// Number of decimal places for this token
    pub decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Parse user input for a token with `decimals` places
    pub fn parse(input: &str, decimals: u8) -> Result<Self> {
        Ok(Self {
            raw: parse_units(input, decimals)?,
            decimals,
        })
    }

    /// Convert to human readable string (for display only, not calculations)
    pub fn to_display_string(&self) -> String {
        format_units(self.raw, self.decimals)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
