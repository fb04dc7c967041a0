//! Observation series sources.
//!
//! A source turns a data source identifier into a validated
//! [`ObservationSeries`]. The CSV source reads two-column files (month,
//! value) from a directory, drops rows with missing cells and anchors every
//! date on the first of its month.

use crate::core::{first_of_month, ObservationSeries};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies observation series by identifier.
pub trait SeriesSource {
    /// Load the series for `source`.
    ///
    /// Must fail with [`Error::SourceNotFound`] when the identifier does not
    /// resolve to any data.
    fn load(&self, source: &str) -> Result<ObservationSeries>;
}

/// Type alias for boxed series sources.
pub type BoxedSource = Box<dyn SeriesSource + Send + Sync>;

/// Reads `<root>/<source>` CSV files.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SeriesSource for CsvDirectorySource {
    fn load(&self, source: &str) -> Result<ObservationSeries> {
        let path = self.root.join(source);
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.display().to_string()));
        }
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| Error::SourceNotFound(format!("{}: {e}", path.display())))?;

        let series = parse_records(source, reader)?;
        tracing::info!(
            source,
            observations = series.len(),
            start = %series.first_date(),
            end = %series.last_date(),
            "loaded observation series"
        );
        Ok(series)
    }
}

/// Parse month/value rows into a series.
///
/// The first two columns are read regardless of their header names.
/// Rows with an empty or missing cell are skipped.
pub fn parse_records<R: std::io::Read>(
    source: &str,
    mut reader: csv::Reader<R>,
) -> Result<ObservationSeries> {
    let malformed = |reason: String| Error::MalformedSource {
        source_id: source.to_string(),
        reason,
    };

    let mut pairs = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = record.map_err(|e| malformed(e.to_string()))?;
        let date_cell = record.get(0).unwrap_or("");
        let value_cell = record.get(1).unwrap_or("");

        if is_missing(date_cell) || is_missing(value_cell) {
            tracing::warn!(source, line, "skipping row with missing cells");
            continue;
        }

        let date = parse_month(date_cell)
            .ok_or_else(|| malformed(format!("line {line}: unrecognised date {date_cell:?}")))?;
        let value = parse_value(value_cell)
            .ok_or_else(|| malformed(format!("line {line}: unrecognised value {value_cell:?}")))?;
        if value.is_nan() {
            tracing::warn!(source, line, "skipping row with NaN value");
            continue;
        }
        pairs.push((date, value));
    }

    if pairs.is_empty() {
        return Err(malformed("no observations".to_string()));
    }

    ObservationSeries::from_pairs(pairs)
        .map(|series| series.with_label(source))
        .map_err(|e| malformed(e.to_string()))
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || matches!(cell.to_ascii_lowercase().as_str(), "na" | "n/a" | "null")
}

fn parse_value(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
// Two-digit years are tried first; `%Y` would otherwise read "23" as year 23.
const MONTH_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y", "%d %B %Y", "%d %b %Y"];

/// Parse a date cell and anchor it on the first of its month.
///
/// Accepts full dates (`2023-12-01`, `2023/12/01`, `12/01/2023`,
/// `01-12-2023`), optionally followed by a time, and month-only forms
/// (`2023-12`, `Dec-2023`, `Dec-23`, `December 2023`).
pub fn parse_month(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    let date_part = cell
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(cell);

    let full = DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(cell, fmt)
            .or_else(|_| NaiveDate::parse_from_str(date_part, fmt))
            .ok()
    });
    if let Some(date) = full {
        return Some(first_of_month(date));
    }

    let (padded, dashed) = (format!("{cell}-01"), format!("01-{cell}"));
    let spaced = format!("01 {cell}");
    [padded.as_str(), dashed.as_str(), spaced.as_str()]
        .iter()
        .find_map(|candidate| {
            MONTH_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
        })
}

/// In-memory source keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, ObservationSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, source: impl Into<String>, series: ObservationSeries) -> Self {
        self.insert(source, series);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, series: ObservationSeries) {
        self.series.insert(source.into(), series);
    }
}

impl SeriesSource for MemorySource {
    fn load(&self, source: &str) -> Result<ObservationSeries> {
        self.series
            .get(source)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound(source.to_string()))
    }
}
