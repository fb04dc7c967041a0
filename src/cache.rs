//! Memoization of loaded series and fitted models.
//!
//! Policy: entries are never evicted; callers drop them explicitly with
//! [`FitCache::invalidate_source`] or [`FitCache::clear`]. Each key has at
//! most one computation in flight: concurrent callers for the same key block
//! until the first caller's load or fit finishes and then share its result.
//!
//! Fit outcomes, including failures, are retained because refitting
//! identical inputs gives the same outcome. Failed loads are not retained so
//! that a data file added later is picked up.

use crate::core::ObservationSeries;
use crate::error::Result;
use crate::models::{FittedModel, HyperparameterSet};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

type Slot<T> = Arc<OnceLock<Result<Arc<T>>>>;

/// Key identifying one fitted model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FitKey {
    pub source: String,
    pub params: HyperparameterSet,
}

impl FitKey {
    pub fn new(source: impl Into<String>, params: HyperparameterSet) -> Self {
        Self {
            source: source.into(),
            params,
        }
    }
}

/// Cache of observation series by source id and fitted models by
/// (source id, hyperparameters).
#[derive(Debug, Default)]
pub struct FitCache {
    series: Mutex<HashMap<String, Slot<ObservationSeries>>>,
    models: Mutex<HashMap<FitKey, Slot<FittedModel>>>,
}

fn lock<K, T>(map: &Mutex<HashMap<K, Slot<T>>>) -> MutexGuard<'_, HashMap<K, Slot<T>>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slot<K: Hash + Eq, T>(map: &Mutex<HashMap<K, Slot<T>>>, key: K) -> Slot<T> {
    lock(map).entry(key).or_default().clone()
}

impl FitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached series for `source`, loading it on first use.
    pub fn series_or_load<F>(&self, source: &str, load: F) -> Result<Arc<ObservationSeries>>
    where
        F: FnOnce() -> Result<ObservationSeries>,
    {
        let entry = slot(&self.series, source.to_string());
        let result = entry
            .get_or_init(|| {
                tracing::info!(source, "loading series");
                load().map(Arc::new)
            })
            .clone();

        if result.is_err() {
            let mut map = lock(&self.series);
            if map.get(source).is_some_and(|current| Arc::ptr_eq(current, &entry)) {
                map.remove(source);
            }
        }
        result
    }

    /// Return the cached model for `key`, fitting it on first use.
    pub fn model_or_fit<F>(&self, key: FitKey, fit: F) -> Result<Arc<FittedModel>>
    where
        F: FnOnce() -> Result<FittedModel>,
    {
        let entry = slot(&self.models, key.clone());
        entry
            .get_or_init(|| {
                tracing::info!(source = %key.source, model = %key.params, "fitting model");
                fit().map(Arc::new)
            })
            .clone()
    }

    /// Drop the series for `source` and every model fitted on it.
    pub fn invalidate_source(&self, source: &str) {
        lock(&self.series).remove(source);
        lock(&self.models).retain(|key, _| key.source != source);
    }

    /// Drop everything.
    pub fn clear(&self) {
        lock(&self.series).clear();
        lock(&self.models).clear();
    }

    /// Number of cached series entries.
    pub fn cached_series(&self) -> usize {
        lock(&self.series).len()
    }

    /// Number of cached model entries, successful or failed.
    pub fn cached_models(&self) -> usize {
        lock(&self.models).len()
    }
}
