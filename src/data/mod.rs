//! Data module - CSV loading, normalization and the trend query

mod loader;
mod model;
mod query;

pub use loader::{load_dataset, LoaderError};
pub use model::{AirQualityDataset, Reading, POLLUTANTS, REQUIRED_COLUMNS};
pub use query::{pollutant_trend, TrendPoint, TrendSeries, ViewMode};
