//! Data Processor Module
//! Turns the raw CSV frame into typed observations.

use crate::config::ColumnNames;
use crate::data::Observation;
use crate::error::{ForecastError, Result};
use crate::LOG_TARGET;
use polars::prelude::*;

/// Handles column extraction and row cleaning.
pub struct SeriesProcessor;

impl SeriesProcessor {
    /// Extract `(entity, period, value)` rows from the frame.
    ///
    /// Rows with a null in any of the three columns are dropped. So are rows whose
    /// value is not a finite positive number or whose period is not a whole number;
    /// those are counted and logged.
    pub fn extract_observations(
        df: &DataFrame,
        columns: &ColumnNames,
    ) -> Result<Vec<Observation>> {
        let entity_col = Self::column(df, &columns.entity)?.cast(&DataType::String)?;
        let period_col = Self::column(df, &columns.period)?.cast(&DataType::Float64)?;
        let value_col = Self::column(df, &columns.value)?.cast(&DataType::Float64)?;

        let entities = entity_col.str()?;
        let periods = period_col.f64()?;
        let values = value_col.f64()?;

        let mut observations = Vec::with_capacity(df.height());
        let mut rejected = 0usize;
        for i in 0..df.height() {
            if let (Some(entity), Some(period), Some(value)) =
                (entities.get(i), periods.get(i), values.get(i))
            {
                let entity = entity.trim();
                if value.is_nan() || entity.is_empty() {
                    continue;
                }
                if !Self::is_whole(period) || !(value.is_finite() && value > 0.0) {
                    rejected += 1;
                    continue;
                }
                observations.push(Observation::new(entity, period as i64, value));
            }
        }

        if rejected > 0 {
            log::warn!(
                target: LOG_TARGET,
                "Dropped {} row(s) with a fractional period or a non-positive value",
                rejected
            );
        }

        Ok(observations)
    }

    fn is_whole(period: f64) -> bool {
        period.is_finite() && period.fract() == 0.0 && period.abs() < i64::MAX as f64
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
        df.column(name)
            .map_err(|_| ForecastError::MissingColumn(name.to_string()))
    }
}
