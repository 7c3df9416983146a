//! Exchange-rate table
//!
//! Maps each currency to "1 unit = N units of the base accounting currency".
//! The base currency is pinned at 1. Lookups for absent or non-positive
//! entries degrade to 1, i.e. the amount is treated as already being in the
//! base currency.
//!
//! Refreshing from a [`RateSource`] is stale-but-available: a failed fetch
//! leaves the previous table in effect.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Currency, Error, Result};

/// External supplier of fresh exchange rates.
///
/// Implementations live outside this crate (HTTP clients, fixtures, ...);
/// the table only consumes the fetched mapping.
pub trait RateSource {
    /// Fetch a fresh currency-to-base-unit rate table.
    fn fetch_rates(&self) -> Result<HashMap<Currency, Decimal>>;
}

/// Exchange-rate table relative to a base accounting currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base accounting currency (rate pinned at 1)
    base: Currency,

    /// Multipliers into base-currency units
    rates: HashMap<Currency, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        // Seed table of the trip app: JPY accounting base.
        let mut rates = HashMap::new();
        rates.insert(Currency::JPY, Decimal::ONE);
        rates.insert(Currency::HKD, Decimal::new(192, 1)); // 19.2
        rates.insert(Currency::AUD, Decimal::new(965, 1)); // 96.5
        Self {
            base: Currency::JPY,
            rates,
        }
    }
}

impl RateTable {
    /// Create an empty table for the given base currency
    pub fn new(base: Currency) -> Self {
        let mut rates = HashMap::new();
        rates.insert(base, Decimal::ONE);
        Self { base, rates }
    }

    /// Create a table from an initial rate mapping.
    ///
    /// Non-positive entries are dropped (they would read back as 1 anyway)
    /// and the base currency is pinned at 1 regardless of the input.
    pub fn with_rates(base: Currency, initial: HashMap<Currency, Decimal>) -> Self {
        let mut table = Self::new(base);
        table.merge(initial);
        table
    }

    /// Base accounting currency
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Multiplier for one unit of `currency` in base-currency units.
    ///
    /// Absent or non-positive entries yield 1: the amount is treated as
    /// already being in the base currency.
    pub fn rate(&self, currency: Currency) -> Decimal {
        match self.rates.get(&currency) {
            Some(&rate) if rate > Decimal::ZERO => rate,
            _ => Decimal::ONE,
        }
    }

    /// Convert an amount in `currency` into base-currency units
    pub fn to_base(&self, amount: Decimal, currency: Currency) -> Decimal {
        amount * self.rate(currency)
    }

    /// Convert an amount in base-currency units into `target` units.
    ///
    /// Presentation helper; uses the same degrade-to-1 lookup as [`rate`].
    ///
    /// [`rate`]: RateTable::rate
    pub fn from_base(&self, amount: Decimal, target: Currency) -> Decimal {
        if target == self.base {
            return amount;
        }
        amount / self.rate(target)
    }

    /// Set a single rate.
    ///
    /// The base currency is fixed at 1 and cannot be overridden; rates must
    /// be positive.
    pub fn set_rate(&mut self, currency: Currency, rate: Decimal) -> Result<()> {
        if currency == self.base {
            return Err(Error::InvalidRate(format!(
                "base currency {} is fixed at 1",
                self.base
            )));
        }
        if rate <= Decimal::ZERO {
            return Err(Error::InvalidRate(format!(
                "rate for {} must be positive, got {}",
                currency, rate
            )));
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Apply a fetched rate mapping, skipping unusable entries.
    pub fn merge(&mut self, fetched: HashMap<Currency, Decimal>) {
        for (currency, rate) in fetched {
            if currency == self.base {
                continue;
            }
            if rate <= Decimal::ZERO {
                tracing::warn!("Ignoring non-positive rate {} for {}", rate, currency);
                continue;
            }
            self.rates.insert(currency, rate);
        }
        self.rates.insert(self.base, Decimal::ONE);
    }

    /// Refresh from a rate source.
    ///
    /// Returns whether the table was updated. A failed fetch keeps the
    /// previous rates in effect.
    pub fn refresh(&mut self, source: &impl RateSource) -> bool {
        match source.fetch_rates() {
            Ok(fetched) => {
                self.merge(fetched);
                tracing::info!("Refreshed exchange rates against {}", self.base);
                true
            }
            Err(e) => {
                tracing::warn!("Rate refresh failed, keeping previous rates: {}", e);
                false
            }
        }
    }
}
