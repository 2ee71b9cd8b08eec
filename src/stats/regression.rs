//! Log-linear trend regression.
//!
//! Fits `ln(value) = intercept + slope * period` by ordinary least squares,
//! which maps back to compound growth of `exp(slope) - 1` per period.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

/// Why a series could not be fitted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Fewer than two points, or fewer than two distinct periods.
    #[error("need at least {required} distinct periods, got {actual}")]
    Insufficient { required: usize, actual: usize },
    /// A value that has no logarithm.
    #[error("value {value} at row {index} is not positive")]
    NonPositive { index: usize, value: f64 },
}

/// Minimum number of points for a single-predictor fit.
pub const MIN_OBSERVATIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLinearModel {
    slope: f64,
    intercept: f64,
    n_observations: usize,
    /// Coefficient of determination of the in-sample fit, in log space.
    r_squared: f64,
}

impl LogLinearModel {
    pub fn fit(periods: &[i64], values: &[f64]) -> Result<Self, FitError> {
        let n = periods.len().min(values.len());
        if n < MIN_OBSERVATIONS {
            return Err(FitError::Insufficient {
                required: MIN_OBSERVATIONS,
                actual: n,
            });
        }

        if let Some((index, &value)) = values[..n]
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(FitError::NonPositive { index, value });
        }

        let x: Vec<f64> = periods[..n].iter().map(|&p| p as f64).collect();
        let y: Vec<f64> = values[..n].iter().map(|v| v.ln()).collect();

        // Centre on the means so large calendar years do not cost precision
        let mean_x = x.iter().mean();
        let mean_y = y.iter().mean();

        let sxx: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
        if sxx <= f64::EPSILON {
            return Err(FitError::Insufficient {
                required: MIN_OBSERVATIONS,
                actual: 1,
            });
        }
        let sxy: f64 = x
            .iter()
            .zip(&y)
            .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
            .sum();

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
        let ss_res: f64 = x
            .iter()
            .zip(&y)
            .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum();
        let r_squared = if ss_tot > 1e-12 {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        };

        Ok(Self {
            slope,
            intercept,
            n_observations: n,
            r_squared,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Compound growth rate per period implied by the slope.
    pub fn growth_rate(&self) -> f64 {
        self.slope.exp() - 1.0
    }

    pub fn predict_log(&self, period: i64) -> f64 {
        self.intercept + self.slope * period as f64
    }

    /// Prediction in linear value space; always positive.
    pub fn predict(&self, period: i64) -> f64 {
        self.predict_log(period).exp()
    }
}
