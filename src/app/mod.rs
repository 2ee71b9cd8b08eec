//! App module - selection state and chart series

mod catalog;
mod state;

pub use catalog::{title_case, Country, CountryCatalog};
pub use state::{AppState, ChartSeries, SelectionReport};
