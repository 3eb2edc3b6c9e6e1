//! Quote Configuration Module
//!
//! Loads engine settings from an optional TOML file with `DEXKIT_`-prefixed
//! environment overrides. The loaded config is passed explicitly to whatever
//! builds the [`QuoteEngine`]; there is no process-wide instance.

use std::path::Path;

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use dexkit_amm::{Fraction, QuoteEngine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::defaults::{
    DEFAULT_CONFIG_PATH, DEFAULT_DEADLINE_SECS, DEFAULT_FEE, DEFAULT_LOG_LEVEL, DEFAULT_SLIPPAGE,
    ENV_PREFIX,
};

/// Settings for quoting swaps and liquidity operations
///
/// Fractions are plain decimals (`0.003` is 0.3%). Missing keys fall back to
/// the values in [`crate::defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Pool fee in [0, 1)
    pub fee: Decimal,
    /// Slippage tolerance in [0, 1]
    pub slippage: Decimal,
    pub deadline_secs: u64,
    pub log_level: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            fee: DEFAULT_FEE,
            slippage: DEFAULT_SLIPPAGE,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl QuoteConfig {
    /// Load configuration from `path` (if any) with environment overrides
    ///
    /// An explicitly given file must exist. Without one, the default path is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                info!("Loading quote config: {:?}", path);
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    info!("Loading quote config: {:?}", default_path);
                    builder = builder.add_source(File::from(default_path).required(false));
                } else {
                    debug!("No config file at {:?}, using defaults", default_path);
                }
            }
        }

        // DEXKIT_FEE, DEXKIT_DEADLINE_SECS, ...
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject fees outside [0, 1) and slippage outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        let fee = self.fee_fraction()?;
        if fee.is_one() {
            warn!(fee = %self.fee, "Rejected fee of 100%");
            bail!("fee must be below 1, got {}", self.fee);
        }
        self.slippage_fraction()?;
        if self.deadline_secs == 0 {
            warn!("Rejected zero deadline");
            bail!("deadline_secs must be positive");
        }
        Ok(())
    }

    pub fn fee_fraction(&self) -> Result<Fraction> {
        Fraction::new(self.fee).with_context(|| format!("invalid fee {}", self.fee))
    }

    pub fn slippage_fraction(&self) -> Result<Fraction> {
        Fraction::new(self.slippage).with_context(|| format!("invalid slippage {}", self.slippage))
    }

    /// Engine charging the configured fee
    pub fn engine(&self) -> Result<QuoteEngine> {
        Ok(QuoteEngine::new(self.fee_fraction()?))
    }
}

/// Convenience function to load configuration from the default locations
pub fn load_config() -> Result<QuoteConfig> {
    QuoteConfig::load(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = QuoteConfig::default();
        assert_eq!(config.fee, dec!(0.003));
        assert_eq!(config.slippage, dec!(0.005));
        assert_eq!(config.deadline_secs, 1200);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("quoter.toml");

        let config_content = r#"
fee = "0.0025"
slippage = "0.01"
log_level = "debug"
"#;
        fs::write(&config_path, config_content).unwrap();

        let config =
            QuoteConfig::load_with_prefix(Some(&config_path), "DEXKIT_TEST_FILE").unwrap();

        assert_eq!(config.fee, dec!(0.0025));
        assert_eq!(config.slippage, dec!(0.01));
        assert_eq!(config.log_level, "debug");
        // Not in the file
        assert_eq!(config.deadline_secs, 1200);
        assert_eq!(config.engine().unwrap().fee().get(), dec!(0.0025));
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("quoter.toml");
        fs::write(&config_path, "deadline_secs = 600\n").unwrap();

        std::env::set_var("DEXKIT_TEST_ENV_DEADLINE_SECS", "300");
        let config = QuoteConfig::load_with_prefix(Some(&config_path), "DEXKIT_TEST_ENV").unwrap();
        std::env::remove_var("DEXKIT_TEST_ENV_DEADLINE_SECS");

        assert_eq!(config.deadline_secs, 300);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(QuoteConfig::load_with_prefix(Some(&missing), "DEXKIT_TEST_MISSING").is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("quoter.toml");
        fs::write(&config_path, "fee = \"1\"\n").unwrap();
        assert!(QuoteConfig::load_with_prefix(Some(&config_path), "DEXKIT_TEST_RANGE").is_err());

        let config = QuoteConfig {
            slippage: dec!(1.5),
            ..QuoteConfig::default()
        };
        assert!(config.validate().is_err());

        let config = QuoteConfig {
            fee: dec!(-0.01),
            ..QuoteConfig::default()
        };
        assert!(config.validate().is_err());

        let config = QuoteConfig {
            slippage: Decimal::ONE,
            ..QuoteConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
