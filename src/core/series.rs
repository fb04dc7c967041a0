//! Monthly observation series.

use crate::core::calendar::{add_months, is_month_start, months_between};
use crate::error::{Error, Result};
use chrono::NaiveDate;

/// A gap-free monthly series of observed values.
///
/// Invariants enforced on construction:
/// - at least one observation
/// - every date is the first day of its month
/// - consecutive dates are exactly one calendar month apart
/// - every value is finite
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    label: Option<String>,
}

impl ObservationSeries {
    /// Create a series from parallel date and value vectors.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(Error::InvalidSeries(format!(
                "expected {} values, got {}",
                dates.len(),
                values.len()
            )));
        }
        if dates.is_empty() {
            return Err(Error::InvalidSeries("empty input data".to_string()));
        }

        for (i, date) in dates.iter().enumerate() {
            if !is_month_start(*date) {
                return Err(Error::InvalidSeries(format!(
                    "date {date} is not anchored on the first of the month"
                )));
            }
            if i > 0 {
                let step = months_between(dates[i - 1], *date);
                if step < 1 {
                    return Err(Error::InvalidSeries(
                        "dates must be strictly increasing".to_string(),
                    ));
                }
                if step > 1 {
                    return Err(Error::InvalidSeries(format!(
                        "missing {} month(s) between {} and {}",
                        step - 1,
                        dates[i - 1],
                        date
                    )));
                }
            }
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidSeries(format!(
                "non-finite value at {}",
                dates[pos]
            )));
        }

        Ok(Self {
            dates,
            values,
            label: None,
        })
    }

    /// Create a series of consecutive months beginning at `start`.
    pub fn from_start(start: NaiveDate, values: Vec<f64>) -> Result<Self> {
        let dates = (0..values.len())
            .map(|i| {
                add_months(start, i as u32).ok_or_else(|| {
                    Error::InvalidSeries(format!("date {i} months after {start} overflows"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(dates, values)
    }

    /// Create a series from `(date, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let (dates, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Attach a descriptive label (typically the data source id).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn last_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Value observed at `date`, if the date lies in the series.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        if !is_month_start(date) {
            return None;
        }
        let offset = months_between(self.first_date(), date);
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.values.get(i).copied())
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
    fn series_constructs_from_start_date() {
        let series = ObservationSeries::from_start(ymd(2023, 11, 1), vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.first_date(), ymd(2023, 11, 1));
        assert_eq!(series.last_date(), ymd(2024, 1, 1));
        assert_eq!(series.last_value(), 3.0);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn series_rejects_empty_and_mismatched_input() {
        assert!(matches!(
            ObservationSeries::new(vec![], vec![]),
            Err(Error::InvalidSeries(_))
        ));
        assert!(matches!(
            ObservationSeries::new(vec![ymd(2024, 1, 1)], vec![1.0, 2.0]),
            Err(Error::InvalidSeries(_))
        ));
    }

    #[test]
    fn series_rejects_non_increasing_dates() {
        let result = ObservationSeries::new(
            vec![ymd(2024, 2, 1), ymd(2024, 2, 1)],
            vec![1.0, 2.0],
        );
        assert!(matches!(result, Err(Error::InvalidSeries(_))));

        let result = ObservationSeries::new(
            vec![ymd(2024, 2, 1), ymd(2024, 1, 1)],
            vec![1.0, 2.0],
        );
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn series_rejects_gaps() {
        let result = ObservationSeries::new(
            vec![ymd(2024, 1, 1), ymd(2024, 3, 1)],
            vec![1.0, 2.0],
        );
        match result {
            Err(Error::InvalidSeries(msg)) => assert!(msg.contains("missing 1 month")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn series_rejects_mid_month_dates() {
        let result = ObservationSeries::new(vec![ymd(2024, 1, 15)], vec![1.0]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn series_rejects_non_finite_values() {
        let result = ObservationSeries::from_start(ymd(2024, 1, 1), vec![1.0, f64::NAN]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn series_lookup_by_date() {
        let series =
            ObservationSeries::from_start(ymd(2022, 12, 1), vec![10.0, 20.0, 30.0]).unwrap();

        assert_eq!(series.get(ymd(2022, 12, 1)), Some(10.0));
        assert_eq!(series.get(ymd(2023, 2, 1)), Some(30.0));
        assert_eq!(series.get(ymd(2022, 11, 1)), None);
        assert_eq!(series.get(ymd(2023, 3, 1)), None);
        assert_eq!(series.get(ymd(2023, 1, 2)), None);
    }

    #[test]
    fn series_from_pairs_and_label() {
        let series = ObservationSeries::from_pairs(vec![
            (ymd(2024, 1, 1), 5.0),
            (ymd(2024, 2, 1), 6.0),
        ])
        .unwrap()
        .with_label("Chini.csv");

        assert_eq!(series.label(), Some("Chini.csv"));
        let pairs: Vec<_> = series.iter().collect();
        assert_eq!(pairs, vec![(ymd(2024, 1, 1), 5.0), (ymd(2024, 2, 1), 6.0)]);
    }
}
