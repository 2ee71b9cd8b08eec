//! Stats module - regression, accuracy metrics and sampling

pub mod metrics;
mod regression;
mod split;

pub use regression::{FitError, LogLinearModel, MIN_OBSERVATIONS};
pub use split::{train_test_split, Split};
