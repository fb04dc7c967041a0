//! Point-in-time lookups against a composed timeline.

use crate::core::month_start;
use crate::error::Result;
use crate::timeline::{Provenance, Timeline};
use chrono::NaiveDate;

/// A validated (year, month) query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lookup {
    date: NaiveDate,
}

impl Lookup {
    /// Validate the pair and anchor it on the first of the month.
    ///
    /// Fails with [`crate::Error::InvalidInput`] for a month outside
    /// `1..=12` or an unrepresentable year.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        Ok(Self {
            date: month_start(year, month)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A value found on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedValue {
    pub date: NaiveDate,
    pub value: f64,
    pub provenance: Provenance,
}

impl ResolvedValue {
    pub fn is_forecast(&self) -> bool {
        self.provenance == Provenance::Forecast
    }
}

/// A well-formed query that falls outside the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub target: NaiveDate,
    /// First date covered by the timeline.
    pub first: NaiveDate,
    /// Last date covered by the timeline.
    pub last: NaiveDate,
}

/// Outcome of resolving a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Found(ResolvedValue),
    OutOfRange(OutOfRange),
}

impl Resolution {
    pub fn value(&self) -> Option<f64> {
        match self {
            Resolution::Found(found) => Some(found.value),
            Resolution::OutOfRange(_) => None,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Resolution::OutOfRange(_))
    }
}

/// Resolve `(year, month)` against the timeline.
///
/// Invalid months are rejected before the timeline is consulted; dates
/// outside the timeline resolve to [`Resolution::OutOfRange`].
pub fn resolve(timeline: &Timeline, year: i32, month: u32) -> Result<Resolution> {
    let lookup = Lookup::new(year, month)?;
    Ok(resolve_lookup(timeline, lookup))
}

/// Resolve an already-validated lookup.
pub fn resolve_lookup(timeline: &Timeline, lookup: Lookup) -> Resolution {
    let target = lookup.date();
    let out_of_range = Resolution::OutOfRange(OutOfRange {
        target,
        first: timeline.first_date(),
        last: timeline.last_date(),
    });

    if target < timeline.first_date() || target > timeline.last_date() {
        return out_of_range;
    }

    match timeline.get(target) {
        Some(point) => Resolution::Found(ResolvedValue {
            date: point.date,
            value: point.value,
            provenance: point.provenance,
        }),
        None => out_of_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ForecastSeries, ObservationSeries};
    use crate::error::Error;
    use crate::timeline::compose;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timeline() -> Timeline {
        let observed =
            ObservationSeries::from_start(ymd(2023, 10, 1), vec![10.0, 11.0, 100.0]).unwrap();
        let forecast = ForecastSeries::new(ymd(2024, 1, 1), vec![101.5, 102.5, 103.5]).unwrap();
        compose(&observed, &forecast).unwrap()
    }

    #[test]
    fn resolves_observed_values_unmodified() {
        let timeline = timeline();
        let found = resolve(&timeline, 2023, 11).unwrap();
        assert_eq!(
            found,
            Resolution::Found(ResolvedValue {
                date: ymd(2023, 11, 1),
                value: 11.0,
                provenance: Provenance::Observed,
            })
        );
    }

    #[test]
    fn handoff_month_is_observed() {
        match resolve(&timeline(), 2023, 12).unwrap() {
            Resolution::Found(found) => {
                assert_eq!(found.provenance, Provenance::Observed);
                assert_eq!(found.value, 100.0);
                assert!(!found.is_forecast());
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn month_after_handoff_is_first_forecast() {
        match resolve(&timeline(), 2024, 1).unwrap() {
            Resolution::Found(found) => {
                assert!(found.is_forecast());
                assert_eq!(found.value, 101.5);
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn dates_outside_timeline_are_out_of_range() {
        let timeline = timeline();

        let before = resolve(&timeline, 2023, 9).unwrap();
        assert_eq!(
            before,
            Resolution::OutOfRange(OutOfRange {
                target: ymd(2023, 9, 1),
                first: ymd(2023, 10, 1),
                last: ymd(2024, 3, 1),
            })
        );
        assert!(resolve(&timeline, 2024, 4).unwrap().is_out_of_range());
        assert!(resolve(&timeline, 1900, 1).unwrap().is_out_of_range());
        assert_eq!(resolve(&timeline, 2030, 6).unwrap().value(), None);
    }

    #[test]
    fn invalid_months_are_input_errors() {
        let timeline = timeline();
        assert!(matches!(
            resolve(&timeline, 2024, 0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            resolve(&timeline, 2024, 13),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn resolve_is_idempotent() {
        let timeline = timeline();
        let first = resolve(&timeline, 2024, 2).unwrap();
        let second = resolve(&timeline, 2024, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.value(), Some(102.5));
    }
}
