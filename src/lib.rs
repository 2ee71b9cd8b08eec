//! GDP Forecaster - historical GDP loading, log-linear trend fitting & forecast series
//!
//! The [`forecast::Forecaster`] is the consumer-facing entry point: it serves
//! historical series, fits and caches one model per country, and projects
//! future years. [`app::AppState`] turns a country selection into chart series.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{ForecastError, Result};
pub use forecast::{Evaluation, Forecast, Forecaster};

/// Target used by every log record of this crate.
pub const LOG_TARGET: &str = "gdp-forecaster";
