//! The `predict(commodity, year, month)` facade.
//!
//! Wires the registry, a series source and the fit cache into the
//! load -> fit -> forecast -> compose -> resolve pipeline.

use crate::cache::{FitCache, FitKey};
use crate::core::ObservationSeries;
use crate::error::Result;
use crate::models::{fit, forecast, FittedModel};
use crate::registry::{CommodityConfig, CommodityRegistry};
use crate::resolve::{resolve_lookup, Lookup, OutOfRange, Resolution, ResolvedValue};
use crate::source::{BoxedSource, SeriesSource};
use crate::timeline::{compose, Timeline};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Forecast horizon used when none is configured: ten years of months.
pub const DEFAULT_HORIZON: usize = 120;

/// Predictor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of months forecast past the last observation.
    pub horizon: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }
}

/// Outcome of a prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// A historical or forecast value for the requested month.
    Resolved(ResolvedValue),
    /// The month lies outside history plus horizon.
    OutOfRange(OutOfRange),
    /// The commodity has no configuration yet.
    NotSupported { commodity: String },
}

impl From<Resolution> for Prediction {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Found(found) => Prediction::Resolved(found),
            Resolution::OutOfRange(out) => Prediction::OutOfRange(out),
        }
    }
}

/// Answers month-level value queries per commodity.
pub struct Predictor {
    registry: CommodityRegistry,
    source: BoxedSource,
    cache: FitCache,
    config: PredictorConfig,
}

impl Predictor {
    pub fn new<S>(registry: CommodityRegistry, source: S, config: PredictorConfig) -> Self
    where
        S: SeriesSource + Send + Sync + 'static,
    {
        Self {
            registry,
            source: Box::new(source),
            cache: FitCache::new(),
            config,
        }
    }

    pub fn registry(&self) -> &CommodityRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &FitCache {
        &self.cache
    }

    pub fn config(&self) -> PredictorConfig {
        self.config
    }

    fn series(&self, commodity: &CommodityConfig) -> Result<Arc<ObservationSeries>> {
        self.cache
            .series_or_load(&commodity.source, || self.source.load(&commodity.source))
    }

    fn model(
        &self,
        commodity: &CommodityConfig,
        series: &ObservationSeries,
    ) -> Result<Arc<FittedModel>> {
        let params = commodity.hyperparameters();
        self.cache
            .model_or_fit(FitKey::new(commodity.source.clone(), params), || {
                fit(series, &params)
            })
    }

    fn build_timeline(&self, commodity: &CommodityConfig) -> Result<Timeline> {
        let series = self.series(commodity)?;
        let model = self.model(commodity, &series)?;
        let predicted = forecast(&model, self.config.horizon)?;
        compose(&series, &predicted)
    }

    /// Composed timeline for `commodity`, or `None` when it is not supported.
    pub fn timeline(&self, commodity: &str) -> Result<Option<Timeline>> {
        match self.registry.get(commodity) {
            Some(config) => self.build_timeline(config).map(Some).inspect_err(|e| {
                if e.is_internal() {
                    tracing::error!(commodity, error = %e, "internal pipeline failure");
                }
            }),
            None => Ok(None),
        }
    }

    /// First and last year covered by history plus forecast.
    pub fn year_range(&self, commodity: &str) -> Result<Option<(i32, i32)>> {
        Ok(self.timeline(commodity)?.map(|t| t.year_range()))
    }

    /// Value for `(year, month)` of `commodity`.
    ///
    /// The query is validated before anything is loaded or fitted.
    pub fn predict(&self, commodity: &str, year: i32, month: u32) -> Result<Prediction> {
        let lookup = Lookup::new(year, month)?;

        let Some(timeline) = self.timeline(commodity)? else {
            tracing::warn!(commodity, "commodity not yet supported");
            return Ok(Prediction::NotSupported {
                commodity: commodity.to_string(),
            });
        };

        let prediction = Prediction::from(resolve_lookup(&timeline, lookup));
        tracing::info!(commodity, date = %lookup.date(), outcome = ?prediction, "prediction");
        Ok(prediction)
    }
}
