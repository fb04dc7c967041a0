//! First-of-month calendar arithmetic.
//!
//! Every date handled by the pipeline is anchored on day 1 of its month, so
//! the helpers here only ever move whole calendar months.

use crate::error::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};

/// Build the first day of `(year, month)`.
///
/// Fails with [`Error::InvalidInput`] when `month` is outside `1..=12` or the
/// year cannot be represented.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidInput(format!(
            "month must be in 1..=12, got {month}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidInput(format!("year {year} is outside the supported calendar")))
}

/// Anchor a date on the first day of its month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whether the date is already anchored on the first of its month.
pub fn is_month_start(date: NaiveDate) -> bool {
    date.day() == 1
}

/// Advance a date by `months` calendar months.
///
/// Returns `None` if the result falls outside the representable calendar.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// The first day of the month following `date`.
pub fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    add_months(first_of_month(date), 1)
}

/// Signed number of whole months from `from` to `to`, ignoring the day.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_start_builds_first_day() {
        assert_eq!(month_start(2024, 1).unwrap(), ymd(2024, 1, 1));
        assert_eq!(month_start(1999, 12).unwrap(), ymd(1999, 12, 1));
    }

    #[test]
    fn month_start_rejects_invalid_months() {
        assert!(matches!(month_start(2024, 0), Err(Error::InvalidInput(_))));
        assert!(matches!(month_start(2024, 13), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn month_start_rejects_unrepresentable_years() {
        assert!(matches!(
            month_start(i32::MAX, 1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn next_month_rolls_over_year_end() {
        assert_eq!(next_month(ymd(2023, 12, 1)), Some(ymd(2024, 1, 1)));
        assert_eq!(next_month(ymd(2023, 1, 31)), Some(ymd(2023, 2, 1)));
    }

    #[test]
    fn add_months_spans_multiple_years() {
        assert_eq!(add_months(ymd(2023, 12, 1), 120), Some(ymd(2033, 12, 1)));
        assert_eq!(add_months(ymd(2023, 12, 1), 0), Some(ymd(2023, 12, 1)));
    }

    #[test]
    fn months_between_is_signed() {
        assert_eq!(months_between(ymd(2023, 12, 1), ymd(2034, 1, 1)), 121);
        assert_eq!(months_between(ymd(2024, 3, 1), ymd(2023, 3, 1)), -12);
        assert_eq!(months_between(ymd(2024, 3, 15), ymd(2024, 3, 1)), 0);
    }

    #[test]
    fn first_of_month_anchors_any_day() {
        assert_eq!(first_of_month(ymd(2024, 2, 29)), ymd(2024, 2, 1));
        assert!(is_month_start(first_of_month(ymd(2024, 7, 17))));
        assert!(!is_month_start(ymd(2024, 7, 17)));
    }
}
