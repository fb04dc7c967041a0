//! Forecasting models and the fit/forecast operations.

mod traits;

pub mod arima;
pub mod fitter;
pub mod forecaster;
pub mod order;

pub use arima::SARIMA;
pub use fitter::{fit, FittedModel};
pub use forecaster::forecast;
pub use order::{HyperparameterSet, Order, SeasonalOrder};
pub use traits::Forecaster;
