//! # Dexkit Types Library
//!
//! Token metadata and exact amount conversion shared by the quote engine's
//! callers.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: All amounts are smallest-unit `U256` integers
//! - **Clear Boundaries**: Decimal strings are converted once, at the input edge
//! - **Type Safety**: [`TokenAmount`] keeps the raw value next to its decimals
//!
//! ## Quick Start
//!
//! ```rust
//! use dexkit_types::find_token;
//!
//! let usdc = find_token("USDC").unwrap();
//! let amount = usdc.parse_amount("2500.25").unwrap();
//! assert_eq!(amount.raw.as_u64(), 2_500_250_000);
//! assert_eq!(amount.to_string(), "2500.25");
//! ```

pub mod precision;
pub mod tokens;

pub use precision::{
    format_units, format_units_truncated, parse_units, PrecisionError, TokenAmount, MAX_DECIMALS,
};
pub use tokens::{find_token, TokenInfo, NATIVE_TOKEN_ADDRESS, TOKENS};

pub use ethers_core::types::U256;
