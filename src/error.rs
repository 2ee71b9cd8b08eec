//! Error types shared by the loader, the regression and the forecaster.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ForecastError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough data for `{entity}`: need at least {required} observations, got {actual}")]
    DataInsufficient {
        entity: String,
        required: usize,
        actual: usize,
    },
    #[error("Invalid horizon {0}: must be between 1 and {max}", max = crate::config::MAX_HORIZON)]
    InvalidHorizon(i64),
    #[error("Unknown entity `{0}`")]
    UnknownEntity(String),
    #[error("Invalid value {value} for `{entity}` in {period}: values must be positive")]
    InvalidValue {
        entity: String,
        period: i64,
        value: f64,
    },
    #[error("Failed to load dataset: {0}")]
    Dataset(#[from] PolarsError),
    #[error("Dataset not found: {0}")]
    DatasetNotFound(PathBuf),
    #[error("Dataset is missing column `{0}`")]
    MissingColumn(String),
    #[error("Model cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Model cache format error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
