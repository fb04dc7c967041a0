//! Seasonal ARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - SARIMA models with seasonal components (P, D, Q)\[s\]
//! - Combined regular/seasonal differencing and its inverse

mod diff;
mod sarima;

pub use diff::{apply_differencing, differencing_polynomial, integrate};
pub use sarima::SARIMA;
