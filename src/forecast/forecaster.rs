//! Forecaster
//! Fits a per-entity log-linear trend, caches it, and projects future periods.

use crate::config::{Config, MAX_HORIZON};
use crate::data::{DataLoader, Dataset, Observation};
use crate::error::{ForecastError, Result};
use crate::forecast::{FittedModel, ModelCache};
use crate::stats::{metrics, train_test_split, FitError, LogLinearModel};
use crate::LOG_TARGET;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Ordered `(period, value)` pairs following the last observed period.
pub type Forecast = Vec<(i64, f64)>;

/// Hold-out accuracy in linear value space.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub mae: f64,
    pub rmse: f64,
    /// NaN when the test partition has fewer than two rows or no variance.
    pub r2: f64,
    pub train_size: usize,
    pub test_size: usize,
}

pub struct Forecaster {
    loader: DataLoader,
    cache: ModelCache,
    test_fraction: f64,
    seed: u64,
}

impl Forecaster {
    pub fn new(config: &Config) -> Self {
        Self {
            loader: DataLoader::new(&config.data_file, config.columns.clone()),
            cache: ModelCache::new(&config.models_dir),
            test_fraction: config.test_fraction,
            seed: config.seed,
        }
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    /// All entity keys present in the dataset.
    pub fn entities(&self) -> Result<Vec<String>> {
        Ok(self.loader.load()?.entities())
    }

    /// Observations for `entity` in ascending period order.
    pub fn historical(&self, entity: &str) -> Result<Vec<Observation>> {
        let dataset = self.loader.load()?;
        Ok(Self::observations(&dataset, entity)?.to_vec())
    }

    /// Fit the model for `entity` and store it in the cache, replacing any cached copy.
    pub fn fit(&self, entity: &str) -> Result<FittedModel> {
        let dataset = self.loader.load()?;
        self.fit_with(&dataset, entity)
    }

    /// Project `horizon` periods past the last observation, fitting first if no usable
    /// model is cached.
    pub fn predict(&self, entity: &str, horizon: i64) -> Result<Forecast> {
        let horizon = Self::check_horizon(horizon)?;
        let dataset = self.loader.load()?;
        self.predict_with(&dataset, entity, horizon)
    }

    /// Forecast several entities in parallel against a single dataset load.
    ///
    /// Duplicate keys are collapsed so each cache artifact has one writer.
    pub fn forecast_many(
        &self,
        entities: &[String],
        horizon: i64,
    ) -> Result<BTreeMap<String, Result<Forecast>>> {
        let horizon = Self::check_horizon(horizon)?;
        let dataset = self.loader.load()?;

        let unique: BTreeSet<&String> = entities.iter().collect();
        Ok(unique
            .into_par_iter()
            .map(|entity| {
                let forecast = self.predict_with(&dataset, entity, horizon);
                (entity.clone(), forecast)
            })
            .collect())
    }

    /// Hold out a seeded share of the observations, fit on the rest, and score
    /// the held-out predictions. Never touches the cache.
    pub fn evaluate(&self, entity: &str) -> Result<Evaluation> {
        let dataset = self.loader.load()?;
        let observations = Self::observations(&dataset, entity)?;

        let split = train_test_split(observations.len(), self.test_fraction, self.seed);
        let (train_periods, train_values): (Vec<i64>, Vec<f64>) = split
            .train
            .iter()
            .map(|&i| observations[i].pair())
            .unzip();
        let regression = Self::regress(entity, &train_periods, &train_values)?;

        let actual: Vec<f64> = split.test.iter().map(|&i| observations[i].value).collect();
        let predicted: Vec<f64> = split
            .test
            .iter()
            .map(|&i| regression.predict(observations[i].period))
            .collect();

        let evaluation = Evaluation {
            mae: metrics::mae(&actual, &predicted),
            rmse: metrics::rmse(&actual, &predicted),
            r2: metrics::r2_score(&actual, &predicted),
            train_size: split.train.len(),
            test_size: split.test.len(),
        };
        log::debug!(target: LOG_TARGET, "Evaluated `{}`: {:?}", entity, evaluation);

        Ok(evaluation)
    }

    /// Drop the cached model for `entity`.
    pub fn invalidate(&self, entity: &str) -> Result<bool> {
        self.cache.invalidate(entity)
    }

    pub fn clear_cache(&self) -> Result<usize> {
        self.cache.clear()
    }

    fn check_horizon(horizon: i64) -> Result<usize> {
        if !(1..=MAX_HORIZON).contains(&horizon) {
            return Err(ForecastError::InvalidHorizon(horizon));
        }
        usize::try_from(horizon).map_err(|_| ForecastError::InvalidHorizon(horizon))
    }

    fn observations<'a>(dataset: &'a Dataset, entity: &str) -> Result<&'a [Observation]> {
        dataset
            .observations(entity)
            .ok_or_else(|| ForecastError::UnknownEntity(entity.to_string()))
    }

    fn fit_with(&self, dataset: &Dataset, entity: &str) -> Result<FittedModel> {
        let observations = Self::observations(dataset, entity)?;
        let (periods, values): (Vec<i64>, Vec<f64>) =
            observations.iter().map(Observation::pair).unzip();
        let regression = Self::regress(entity, &periods, &values)?;

        let model = FittedModel {
            entity: entity.to_string(),
            last_period: periods.iter().copied().max().unwrap_or_default(),
            fingerprint: dataset.fingerprint().to_string(),
            regression,
        };
        self.cache.store(&model)?;

        log::info!(
            target: LOG_TARGET,
            "Fitted `{}` on {} observations: growth {:.2}%/period, R² {:.3}",
            entity,
            model.regression.n_observations(),
            model.regression.growth_rate() * 100.0,
            model.regression.r_squared()
        );
        Ok(model)
    }

    fn predict_with(&self, dataset: &Dataset, entity: &str, horizon: usize) -> Result<Forecast> {
        let model = match self.cache.load(entity, dataset.fingerprint())? {
            Some(model) => model,
            None => self.fit_with(dataset, entity)?,
        };
        model
            .project(horizon)
            .ok_or(ForecastError::InvalidHorizon(horizon as i64))
    }

    /// Map regression failures onto errors naming the entity.
    fn regress(entity: &str, periods: &[i64], values: &[f64]) -> Result<LogLinearModel> {
        LogLinearModel::fit(periods, values).map_err(|e| match e {
            FitError::Insufficient { required, actual } => ForecastError::DataInsufficient {
                entity: entity.to_string(),
                required,
                actual,
            },
            FitError::NonPositive { index, value } => ForecastError::InvalidValue {
                entity: entity.to_string(),
                period: periods.get(index).copied().unwrap_or_default(),
                value,
            },
        })
    }
}
