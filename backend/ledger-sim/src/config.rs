//! Sandbox configuration.
//!
//! Defaults describe a development deployment: an 8-decimal feed quoting
//! 2000.00000000 reference units per token and a floor of 50 reference units.
//! A JSON file may override any field, and `LEDGER_SIM_*` environment
//! variables (also read from `.env`) override the file. The merged result is
//! validated before anything is deployed.

use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;

pub const DEFAULT_FEED_DECIMALS: u32 = 8;
pub const DEFAULT_INITIAL_ANSWER: i64 = 200_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Precision of the mock feed's answers.
    pub feed_decimals: u32,
    /// First answer published by the mock feed.
    pub initial_answer: i64,
    /// Contribution floor in whole reference-currency units.
    pub minimum_reference_units: u64,
    /// Oldest acceptable price, in seconds.
    pub max_price_age: u64,
    /// Base units minted to every sandbox funder.
    pub funder_mint: i64,
    /// Ledger timestamp the sandbox starts at.
    pub start_time: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            feed_decimals: DEFAULT_FEED_DECIMALS,
            initial_answer: DEFAULT_INITIAL_ANSWER,
            minimum_reference_units: 50,
            max_price_age: fund_ledger::DEFAULT_MAX_PRICE_AGE,
            funder_mint: 1_000 * 10_000_000,
            start_time: 1_700_000_000,
        }
    }
}

impl SimConfig {
    /// Defaults, then the optional JSON file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SimError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SimError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LEDGER_SIM_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SimError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "LEDGER_SIM_FEED_DECIMALS", &mut self.feed_decimals)?;
        override_from(&lookup, "LEDGER_SIM_INITIAL_ANSWER", &mut self.initial_answer)?;
        override_from(&lookup, "LEDGER_SIM_MINIMUM", &mut self.minimum_reference_units)?;
        override_from(&lookup, "LEDGER_SIM_MAX_PRICE_AGE", &mut self.max_price_age)?;
        override_from(&lookup, "LEDGER_SIM_FUNDER_MINT", &mut self.funder_mint)?;
        override_from(&lookup, "LEDGER_SIM_START_TIME", &mut self.start_time)?;
        Ok(())
    }

    /// Reject settings the ledger constructor or the token would refuse.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_price_age == 0 {
            return Err(invalid("max_price_age", self.max_price_age));
        }
        if self.funder_mint < 0 {
            return Err(invalid("funder_mint", self.funder_mint));
        }
        Ok(())
    }

    /// Floor as passed to the contract, with `REFERENCE_DECIMALS` decimals.
    pub fn minimum_reference_value(&self) -> i128 {
        i128::from(self.minimum_reference_units) * 10i128.pow(fund_ledger::REFERENCE_DECIMALS)
    }
}

fn invalid(key: &str, value: impl ToString) -> SimError {
    SimError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<(), SimError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(value) = lookup(key) {
        *slot = value.trim().parse().map_err(|_| SimError::InvalidSetting {
            key: key.to_string(),
            value,
        })?;
    }
    Ok(())
}
