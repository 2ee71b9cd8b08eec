//! Fixtures shared by unit tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// India GDP in current USD, 2015 to 2023.
pub const INDIA_CSV: &str = "Country,Year,GDP
India,2015,2103588360044
India,2016,2294796885663
India,2017,2651474262735
India,2018,2702929641129
India,2019,2835606256558
India,2020,2674851578587
India,2021,3150306834279
India,2022,3353470496886
India,2023,3549918918997
";

/// A fresh directory, removed when the returned guard is dropped.
pub fn fixture_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("gdp_forecaster-{name}-"))
        .tempdir()
        .unwrap()
}

/// Write `contents` to `<dir>/gdp_data.csv`, replacing any previous file.
pub fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("gdp_data.csv");
    std::fs::write(&path, contents).unwrap();
    path
}
