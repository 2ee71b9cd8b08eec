//! Application State
//! Country selection and the chart series built from it, independent of any display.

use crate::app::{title_case, Country, CountryCatalog};
use crate::error::Result;
use crate::forecast::Forecaster;
use crate::LOG_TARGET;

/// Outcome of parsing a selection string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

/// Historical values followed by forecast values for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub country: String,
    pub code: String,
    pub years: Vec<i64>,
    pub values: Vec<f64>,
    /// Index of the first forecast point.
    pub split_index: usize,
}

impl ChartSeries {
    fn blank(country: &Country) -> Self {
        Self {
            country: country.name.to_string(),
            code: country.code.to_string(),
            years: Vec::new(),
            values: Vec::new(),
            split_index: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.years.is_empty()
    }

    pub fn actual(&self) -> (&[i64], &[f64]) {
        (&self.years[..self.split_index], &self.values[..self.split_index])
    }

    pub fn predicted(&self) -> (&[i64], &[f64]) {
        (&self.years[self.split_index..], &self.values[self.split_index..])
    }

    /// First and last year of the shaded forecast zone.
    pub fn forecast_zone(&self) -> Option<(i64, i64)> {
        let last_actual = self.actual().0.last()?;
        let last = self.years.last()?;
        (last > last_actual).then_some((*last_actual, *last))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    catalog: CountryCatalog,
    selected: Vec<Country>,
    series: Vec<ChartSeries>,
}

impl AppState {
    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    pub fn selected(&self) -> &[Country] {
        &self.selected
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    /// Replace the selection with the comma-separated names in `input`.
    ///
    /// Clears previously built series. Names are trimmed and title-cased before
    /// the catalogue lookup; repeats are kept once.
    pub fn select(&mut self, input: &str) -> SelectionReport {
        self.selected.clear();
        self.series.clear();

        let mut report = SelectionReport::default();
        for raw in input.split(',') {
            let name = title_case(raw.trim());
            if name.is_empty() {
                continue;
            }
            match self.catalog.lookup(&name) {
                Some(country) => {
                    if !self.selected.contains(&country) {
                        self.selected.push(country);
                        report.accepted.push(name);
                    }
                }
                None => {
                    log::warn!(target: LOG_TARGET, "Country `{}` is not valid", name);
                    report.rejected.push(name);
                }
            }
        }

        report
    }

    /// Rebuild one series per selected country, in selection order.
    ///
    /// A country whose history or forecast fails gets a blank series. Errors that
    /// concern the whole batch, an invalid horizon or an unreadable dataset, are
    /// returned and leave no series behind.
    pub fn refresh(&mut self, forecaster: &Forecaster, horizon: i64) -> Result<()> {
        self.series.clear();

        let names: Vec<String> = self.selected.iter().map(|c| c.name.to_string()).collect();
        let mut forecasts = forecaster.forecast_many(&names, horizon)?;

        self.series = self
            .selected
            .iter()
            .map(|country| {
                let forecast = match forecasts.remove(country.name) {
                    Some(Ok(forecast)) => forecast,
                    Some(Err(e)) => {
                        log::warn!(target: LOG_TARGET, "No forecast for `{}`: {}", country.name, e);
                        return ChartSeries::blank(country);
                    }
                    None => return ChartSeries::blank(country),
                };
                let history = match forecaster.historical(country.name) {
                    Ok(history) => history,
                    Err(e) => {
                        log::warn!(target: LOG_TARGET, "No history for `{}`: {}", country.name, e);
                        return ChartSeries::blank(country);
                    }
                };

                let split_index = history.len();
                let (years, values): (Vec<i64>, Vec<f64>) = history
                    .iter()
                    .map(|obs| obs.pair())
                    .chain(forecast)
                    .unzip();

                ChartSeries {
                    country: country.name.to_string(),
                    code: country.code.to_string(),
                    years,
                    values,
                    split_index,
                }
            })
            .collect();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ForecastError;
    use crate::test_utils::{fixture_dir, write_csv, INDIA_CSV};
    use std::path::Path;

    fn forecaster(dir: &Path, data_file: &str) -> Forecaster {
        Forecaster::new(&Config {
            data_file: dir.join(data_file),
            models_dir: dir.join("models"),
            ..Default::default()
        })
    }

    #[test]
    fn select_normalises_and_rejects() {
        let mut state = AppState::default();

        let report = state.select(" india, united states ,Atlantis,, INDIA");

        assert_eq!(report.accepted, vec!["India", "United States"]);
        assert_eq!(report.rejected, vec!["Atlantis"]);
        let codes: Vec<&str> = state.selected().iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["IN", "US"]);
    }

    #[test]
    fn select_replaces_previous_selection() {
        let mut state = AppState::default();
        state.select("India");

        let report = state.select("nowhere");

        assert!(report.accepted.is_empty());
        assert!(state.selected().is_empty());
        assert!(state.series().is_empty());
    }

    #[test]
    fn refresh_builds_series_with_blank_fallback() {
        let dir = fixture_dir("state_refresh");
        write_csv(dir.path(), INDIA_CSV);
        let forecaster = forecaster(dir.path(), "gdp_data.csv");
        let mut state = AppState::default();
        state.select("Japan, India");

        state.refresh(&forecaster, 5).unwrap();

        let series = state.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].country, "Japan");
        assert!(series[0].is_blank());

        let india = &series[1];
        assert_eq!(india.split_index, 9);
        assert_eq!(india.years.len(), 14);
        assert_eq!(india.actual().0.last(), Some(&2023));
        assert_eq!(india.predicted().0, &[2024, 2025, 2026, 2027, 2028]);
        assert_eq!(india.forecast_zone(), Some((2023, 2028)));
    }

    #[test]
    fn refresh_without_dataset_fails() {
        let dir = fixture_dir("state_no_dataset");
        let forecaster = forecaster(dir.path(), "missing.csv");
        let mut state = AppState::default();
        state.select("India");

        assert!(matches!(
            state.refresh(&forecaster, 5),
            Err(ForecastError::DatasetNotFound(_))
        ));
        assert!(state.series().is_empty());
        assert_eq!(state.selected().len(), 1);
    }

    #[test]
    fn refresh_with_invalid_horizon_fails_and_clears_series() {
        let dir = fixture_dir("state_bad_horizon");
        write_csv(dir.path(), INDIA_CSV);
        let forecaster = forecaster(dir.path(), "gdp_data.csv");
        let mut state = AppState::default();
        state.select("India");
        state.refresh(&forecaster, 2).unwrap();
        assert_eq!(state.series().len(), 1);

        assert!(matches!(
            state.refresh(&forecaster, 0),
            Err(ForecastError::InvalidHorizon(0))
        ));
        assert!(state.series().is_empty());
    }
}
