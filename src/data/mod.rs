//! Data module - CSV loading and processing

mod dataset;
mod loader;
mod processor;

pub use dataset::{Dataset, Observation};
pub use loader::DataLoader;
pub use processor::SeriesProcessor;
