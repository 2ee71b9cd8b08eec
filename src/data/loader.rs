//! CSV Data Loader Module
//! Reads the historical dataset with Polars and fingerprints the source file.

use crate::config::ColumnNames;
use crate::data::{Dataset, SeriesProcessor};
use crate::error::{ForecastError, Result};
use crate::LOG_TARGET;
use polars::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Loads the whole dataset on every call; nothing is kept between loads.
#[derive(Debug, Clone)]
pub struct DataLoader {
    file_path: PathBuf,
    columns: ColumnNames,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>, columns: ColumnNames) -> Self {
        Self {
            file_path: file_path.into(),
            columns,
        }
    }

    /// Load the CSV file and group its rows per entity.
    pub fn load(&self) -> Result<Dataset> {
        let fingerprint = Self::fingerprint(&self.file_path)?;
        let df = self.load_csv()?;
        let observations = SeriesProcessor::extract_observations(&df, &self.columns)?;
        let dataset = Dataset::new(observations, fingerprint);

        log::debug!(
            target: LOG_TARGET,
            "Loaded {} observations from {} (fingerprint {})",
            dataset.observation_count(),
            self.file_path.display(),
            &dataset.fingerprint()[..12]
        );

        Ok(dataset)
    }

    /// Read the raw CSV into a DataFrame.
    pub fn load_csv(&self) -> Result<DataFrame> {
        if !self.file_path.is_file() {
            return Err(ForecastError::DatasetNotFound(self.file_path.clone()));
        }

        let df = LazyCsvReader::new(&self.file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// SHA-256 of the file bytes, hex encoded.
    pub fn fingerprint(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ForecastError::DatasetNotFound(path.to_path_buf()),
            _ => ForecastError::Io(e),
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}
