//! Combined observed + forecast timeline.

use crate::core::{months_between, next_month, ForecastSeries, ObservationSeries};
use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Where a timeline value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// An actual historical observation.
    Observed,
    /// A model-generated prediction.
    Forecast,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Observed => f.write_str("observed"),
            Provenance::Forecast => f.write_str("forecast"),
        }
    }
}

/// A single dated value on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub value: f64,
    pub provenance: Provenance,
}

/// Observed history followed by its forecast, one point per month.
///
/// The observed points form one contiguous run and the forecast points a
/// second run starting exactly one month after the last observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    points: Vec<TimelinePoint>,
    observed_len: usize,
}

/// Splice a forecast onto the series it continues.
///
/// The forecast must start exactly one month after the last observation.
/// Overlap or a gap is a pipeline misuse and fails with
/// [`Error::Composition`].
pub fn compose(observed: &ObservationSeries, forecast: &ForecastSeries) -> Result<Timeline> {
    let last_observed = observed.last_date();
    let forecast_start = forecast.start_date();

    if forecast_start <= last_observed {
        return Err(Error::Composition(format!(
            "forecast starting {forecast_start} overlaps observations ending {last_observed}"
        )));
    }
    let expected = next_month(last_observed).ok_or_else(|| {
        Error::Composition(format!("no month follows {last_observed}"))
    })?;
    if forecast_start != expected {
        return Err(Error::Composition(format!(
            "forecast starts {forecast_start} but observations end {last_observed} (expected {expected})"
        )));
    }

    let points: Vec<TimelinePoint> = observed
        .iter()
        .map(|(date, value)| TimelinePoint {
            date,
            value,
            provenance: Provenance::Observed,
        })
        .chain(forecast.iter().map(|(date, value)| TimelinePoint {
            date,
            value,
            provenance: Provenance::Forecast,
        }))
        .collect();

    if points.windows(2).any(|w| w[1].date <= w[0].date) {
        return Err(Error::Composition(
            "timeline dates are not strictly increasing".to_string(),
        ));
    }

    Ok(Timeline {
        points,
        observed_len: observed.len(),
    })
}

impl Timeline {
    /// Total number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimelinePoint] {
        &self.points
    }

    /// The observed run.
    pub fn observed(&self) -> &[TimelinePoint] {
        &self.points[..self.observed_len]
    }

    /// The forecast run.
    pub fn forecast(&self) -> &[TimelinePoint] {
        &self.points[self.observed_len..]
    }

    /// Number of forecast points.
    pub fn horizon(&self) -> usize {
        self.points.len() - self.observed_len
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Date of the last observation, the handoff point to the forecast.
    pub fn last_observed_date(&self) -> NaiveDate {
        self.points[self.observed_len - 1].date
    }

    /// First and last calendar year covered.
    pub fn year_range(&self) -> (i32, i32) {
        (self.first_date().year(), self.last_date().year())
    }

    /// The point dated exactly `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&TimelinePoint> {
        let offset = usize::try_from(months_between(self.first_date(), date)).ok()?;
        self.points.get(offset).filter(|p| p.date == date)
    }
}
