//! Configuration for the settlement engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trip_core::Currency;

use crate::netting::DEFAULT_TOLERANCE;
use crate::{Error, Result};

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base accounting currency all balances are expressed in
    #[serde(default = "default_base_currency")]
    pub base_currency: Currency,

    /// Initial exchange rates into the base currency
    #[serde(default = "default_rates")]
    pub rates: HashMap<Currency, Decimal>,

    /// Netting configuration
    #[serde(default)]
    pub netting: NettingConfig,

    /// Validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rates: default_rates(),
            netting: NettingConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

/// Netting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NettingConfig {
    /// Residual below which a balance counts as settled (base units)
    pub tolerance: Decimal,
}

impl Default for NettingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject expenses referencing members missing from the roster.
    ///
    /// Off by default: unknown split members are skipped at computation
    /// time instead of failing the whole expense.
    pub strict_members: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_members: false,
        }
    }
}

fn default_base_currency() -> Currency {
    Currency::JPY
}

fn default_rates() -> HashMap<Currency, Decimal> {
    let mut rates = HashMap::new();
    rates.insert(Currency::JPY, Decimal::ONE);
    rates.insert(Currency::HKD, Decimal::new(192, 1)); // 19.2
    rates.insert(Currency::AUD, Decimal::new(965, 1)); // 96.5
    rates
}

impl Config {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.netting.tolerance <= Decimal::ZERO {
            return Err(Error::Config(format!(
                "netting tolerance must be positive, got {}",
                self.netting.tolerance
            )));
        }
        Ok(())
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults with environment variable overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(currency) = std::env::var("TRIP_BASE_CURRENCY") {
            config.base_currency = Currency::from_str(&currency)
                .ok_or_else(|| Error::Config(format!("unknown base currency: {}", currency)))?;
        }

        if let Ok(tolerance) = std::env::var("TRIP_NETTING_TOLERANCE") {
            config.netting.tolerance = tolerance
                .parse()
                .map_err(|e| Error::Config(format!("bad tolerance: {}", e)))?;
        }

        if let Ok(strict) = std::env::var("TRIP_STRICT_MEMBERS") {
            config.validation.strict_members = strict
                .parse()
                .map_err(|e| Error::Config(format!("bad strict flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }
}
