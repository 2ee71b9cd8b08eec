//! Forecast module - model fitting, caching and projection

mod cache;
mod forecaster;
mod model;

pub use cache::ModelCache;
pub use forecaster::{Evaluation, Forecast, Forecaster};
pub use model::FittedModel;
