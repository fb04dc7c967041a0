//! Forecast series holding dated point predictions.

use crate::core::calendar::{add_months, is_month_start};
use crate::error::{Error, Result};
use chrono::NaiveDate;

/// Point predictions for consecutive months starting at `start_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ForecastSeries {
    /// Create a forecast whose first prediction is for `start`.
    ///
    /// `start` must be the first of a month and `values` must be non-empty.
    pub fn new(start: NaiveDate, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidHorizon(0));
        }
        if !is_month_start(start) {
            return Err(Error::InvalidSeries(format!(
                "forecast start {start} is not anchored on the first of the month"
            )));
        }

        let dates = (0..values.len())
            .map(|i| add_months(start, i as u32).ok_or(Error::InvalidHorizon(values.len())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { dates, values })
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Prediction for the `step`-th month (0-based).
    pub fn get(&self, step: usize) -> Option<f64> {
        self.values.get(step).copied()
    }

    /// Iterate over `(date, value)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn forecast_dates_advance_monthly() {
        let forecast = ForecastSeries::new(ymd(2023, 11, 1), vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(forecast.horizon(), 3);
        assert_eq!(
            forecast.dates(),
            &[ymd(2023, 11, 1), ymd(2023, 12, 1), ymd(2024, 1, 1)]
        );
        assert_eq!(forecast.start_date(), ymd(2023, 11, 1));
        assert_eq!(forecast.end_date(), ymd(2024, 1, 1));
        assert_eq!(forecast.get(1), Some(2.0));
        assert_eq!(forecast.get(3), None);
    }

    #[test]
    fn forecast_rejects_empty_values() {
        assert!(matches!(
            ForecastSeries::new(ymd(2024, 1, 1), vec![]),
            Err(Error::InvalidHorizon(0))
        ));
    }

    #[test]
    fn forecast_rejects_mid_month_start() {
        assert!(matches!(
            ForecastSeries::new(ymd(2024, 1, 2), vec![1.0]),
            Err(Error::InvalidSeries(_))
        ));
    }

    #[test]
    fn forecast_iter_pairs_dates_and_values() {
        let forecast = ForecastSeries::new(ymd(2024, 12, 1), vec![7.0, 8.0]).unwrap();
        let pairs: Vec<_> = forecast.iter().collect();
        assert_eq!(pairs, vec![(ymd(2024, 12, 1), 7.0), (ymd(2025, 1, 1), 8.0)]);
    }
}
