//! Multi-step forecasting from a fitted model.

use crate::core::{next_month, ForecastSeries};
use crate::error::{Error, Result};
use crate::models::fitter::FittedModel;
use crate::models::Forecaster;

/// Produce exactly `horizon` monthly point forecasts.
///
/// The first forecast is dated one month after the training series' last
/// observation. A zero horizon is a contract violation and fails with
/// [`Error::InvalidHorizon`].
pub fn forecast(model: &FittedModel, horizon: usize) -> Result<ForecastSeries> {
    if horizon == 0 {
        return Err(Error::InvalidHorizon(horizon));
    }
    if !model.model().is_fitted() {
        return Err(Error::FitRequired);
    }

    let start = next_month(model.training_end()).ok_or(Error::InvalidHorizon(horizon))?;
    let values = model.model().predict(horizon)?;
    if values.len() != horizon {
        return Err(Error::InvalidHorizon(horizon));
    }

    tracing::debug!(
        horizon,
        start = %start,
        first = values[0],
        "forecast produced"
    );

    ForecastSeries::new(start, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ObservationSeries;
    use crate::models::fitter::fit;
    use crate::models::order::{HyperparameterSet, Order, SeasonalOrder};
    use chrono::NaiveDate;

    fn fitted() -> FittedModel {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let values = (0..36)
            .map(|i| 80.0 + 0.5 * i as f64 + ((i * 5) % 12) as f64)
            .collect();
        let series = ObservationSeries::from_start(start, values).unwrap();
        let params =
            HyperparameterSet::new(Order::new(0, 1, 1), SeasonalOrder::monthly(0, 1, 1)).unwrap();
        fit(&series, &params).unwrap()
    }

    #[test]
    fn forecast_starts_after_training_end() {
        let forecast = forecast(&fitted(), 120).unwrap();

        assert_eq!(forecast.horizon(), 120);
        assert_eq!(
            forecast.start_date(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            forecast.end_date(),
            NaiveDate::from_ymd_opt(2033, 12, 1).unwrap()
        );
    }

    #[test]
    fn forecast_rejects_zero_horizon() {
        assert!(matches!(
            forecast(&fitted(), 0),
            Err(Error::InvalidHorizon(0))
        ));
    }

    #[test]
    fn forecast_is_repeatable() {
        let model = fitted();
        assert_eq!(forecast(&model, 24).unwrap(), forecast(&model, 24).unwrap());
    }
}
