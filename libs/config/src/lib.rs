//! # Dexkit Configuration
//!
//! Defaults and loading for the quote engine's tunables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dexkit_config::QuoteConfig;
//!
//! let config = QuoteConfig::load(None)?;
//! let engine = config.engine()?;
//! let slippage = config.slippage_fraction()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod quote_config;

pub use defaults::*;
pub use quote_config::{load_config, QuoteConfig};
