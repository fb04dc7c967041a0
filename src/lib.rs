//! # agri-forecast
//!
//! Seasonal ARIMA forecasting for monthly agri-horticulture commodity series.
//!
//! Fits a multiplicative SARIMA model per commodity, projects it a fixed
//! number of months past the last observation, splices history and forecast
//! into one timeline and answers "what is the value for this month" queries
//! against it.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod cache;
pub mod core;
pub mod error;
pub mod models;
pub mod predictor;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod timeline;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
pub use predictor::{Prediction, Predictor, PredictorConfig};

pub mod prelude {
    pub use crate::core::{ForecastSeries, ObservationSeries};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{fit, forecast, FittedModel, Forecaster, HyperparameterSet};
    pub use crate::models::{Order, SeasonalOrder, SARIMA};
    pub use crate::predictor::{Prediction, Predictor, PredictorConfig};
    pub use crate::registry::{CommodityConfig, CommodityRegistry};
    pub use crate::resolve::{resolve, Resolution};
    pub use crate::source::{CsvDirectorySource, MemorySource, SeriesSource};
    pub use crate::timeline::{compose, Provenance, Timeline};
}
