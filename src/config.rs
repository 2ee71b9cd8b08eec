//! Runtime configuration.
//! Defaults mirror the layout of the bundled GDP dataset; a JSON file and CLI flags override them.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/gdp_data.csv";
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_HORIZON: i64 = 5;
/// Largest accepted forecast horizon, in periods.
pub const MAX_HORIZON: i64 = 1000;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// Names of the dataset columns holding the key, the period and the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub entity: String,
    pub period: String,
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            entity: "Country".to_string(),
            period: "Year".to_string(),
            value: "GDP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
    pub models_dir: PathBuf,
    pub horizon: i64,
    /// Share of observations held out by `evaluate`.
    pub test_fraction: f64,
    pub seed: u64,
    pub columns: ColumnNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            horizon: DEFAULT_HORIZON,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            columns: ColumnNames::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_HORIZON).contains(&self.horizon) {
            return Err(ForecastError::InvalidHorizon(self.horizon));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ForecastError::Config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}
