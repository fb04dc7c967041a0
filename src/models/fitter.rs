//! Model fitting: observation series + hyperparameters -> fitted model.

use crate::core::ObservationSeries;
use crate::error::Result;
use crate::models::arima::SARIMA;
use crate::models::order::HyperparameterSet;
use crate::models::Forecaster;
use chrono::NaiveDate;

/// Handle to a fitted SARIMA model and the span it was trained on.
///
/// Only [`fit`] creates one, so a `FittedModel` is always ready to forecast.
#[derive(Debug, Clone)]
pub struct FittedModel {
    model: SARIMA,
    training_start: NaiveDate,
    training_end: NaiveDate,
    observations: usize,
}

impl FittedModel {
    pub fn hyperparameters(&self) -> HyperparameterSet {
        self.model.hyperparameters()
    }

    /// First observed month of the training series.
    pub fn training_start(&self) -> NaiveDate {
        self.training_start
    }

    /// Last observed month of the training series.
    pub fn training_end(&self) -> NaiveDate {
        self.training_end
    }

    /// Number of observations the model was fit on.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// The underlying estimated model.
    pub fn model(&self) -> &SARIMA {
        &self.model
    }
}

/// Fit a SARIMA model with the given hyperparameters.
///
/// Fails with [`crate::Error::InsufficientData`] when the series is too short
/// for the requested orders and [`crate::Error::NonConvergence`] when the
/// parameter search does not settle. Identical inputs give identical models.
pub fn fit(series: &ObservationSeries, params: &HyperparameterSet) -> Result<FittedModel> {
    let mut model = SARIMA::from_hyperparameters(*params);
    model.fit(series)?;

    tracing::debug!(
        model = %params,
        source = series.label().unwrap_or("<unnamed>"),
        start = %series.first_date(),
        end = %series.last_date(),
        "model fitted"
    );

    Ok(FittedModel {
        model,
        training_start: series.first_date(),
        training_end: series.last_date(),
        observations: series.len(),
    })
}
