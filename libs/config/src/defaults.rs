//! Quote defaults
//!
//! Values used when neither the config file nor the environment sets them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pool fee charged on every swap input (0.3%)
pub const DEFAULT_FEE: Decimal = dexkit_amm::DEFAULT_FEE;

/// Slippage tolerance applied to quotes (0.5%)
pub const DEFAULT_SLIPPAGE: Decimal = dec!(0.005);

/// Seconds a signed transaction stays valid (20 minutes)
pub const DEFAULT_DEADLINE_SECS: u64 = dexkit_amm::DEFAULT_DEADLINE_SECS;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/quoter.toml";

/// Environment variable prefix (`DEXKIT_FEE`, `DEXKIT_DEADLINE_SECS`, ...)
pub const ENV_PREFIX: &str = "DEXKIT";
