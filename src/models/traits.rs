//! Forecaster trait defining the common interface for fitted models.

use crate::core::ObservationSeries;
use crate::error::Result;

/// Common interface for forecasting models.
///
/// Implementations estimate their parameters in [`Forecaster::fit`] and
/// produce deterministic point forecasts on the original scale of the
/// training series in [`Forecaster::predict`].
pub trait Forecaster {
    /// Fit the model to the observation series.
    fn fit(&mut self, series: &ObservationSeries) -> Result<()>;

    /// Point forecasts for the next `horizon` periods.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// In-sample one-step predictions on the differenced scale.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals on the differenced scale.
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
