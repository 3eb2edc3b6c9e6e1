//! Quote failures
//!
//! Every fallible engine operation returns [`QuoteError`]. Callers match on the
//! variant to pick a disabled-button state or inline message; none of these
//! conditions panic.

use thiserror::Error;

/// Typed reasons a quote could not be produced
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// Non-positive amount where a positive one is required
    #[error("Invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// One or both pool reserves are zero
    #[error("No liquidity: pool reserves must both be positive")]
    NoLiquidity,

    /// Requested exact-out amount is at or above the available reserve
    #[error("Insufficient output reserve: requested output must be below the pool reserve")]
    InsufficientOutputReserve,

    /// Degenerate denominator (zero supply, zero base amount, 100% fee)
    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Result does not fit the target representation
    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Fraction outside the closed range [0, 1]
    #[error("Invalid fraction: {0} is outside [0, 1]")]
    InvalidFraction(rust_decimal::Decimal),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

impl QuoteError {
    /// Short machine-readable reason, stable across message wording changes
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid-amount",
            Self::NoLiquidity => "no-liquidity",
            Self::InsufficientOutputReserve => "insufficient-output-reserve",
            Self::DivisionByZero(_) => "division-by-zero",
            Self::Overflow(_) => "overflow",
            Self::InvalidFraction(_) => "invalid-fraction",
        }
    }
}
