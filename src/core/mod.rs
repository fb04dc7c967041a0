//! Core data structures for monthly series forecasting.

pub mod calendar;
mod forecast;
mod series;

pub use calendar::{add_months, first_of_month, month_start, months_between, next_month};
pub use forecast::ForecastSeries;
pub use series::ObservationSeries;
