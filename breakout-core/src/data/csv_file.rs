//! CSV import/export of observation series.
//!
//! Reads any CSV with `date`, `close` and `volume` columns (matched
//! case-insensitively, other columns ignored), which covers both the files
//! written by `write_csv` and Yahoo's own history download.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use super::provider::{check_range, DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Observation, Series};

/// Serves a series from a local CSV file.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        check_range(start, end)?;
        let all = read_csv(&self.path)?;
        let in_range: Vec<Observation> = all
            .into_inner()
            .into_iter()
            .filter(|o| o.date >= start && o.date <= end)
            .collect();
        info!(symbol, path = %self.path.display(), observations = in_range.len(), "loaded CSV series");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series: Series::new(in_range)?,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn unavailable_reason(&self) -> DataError {
        DataError::Csv {
            path: self.path.display().to_string(),
            reason: "file not found".to_string(),
        }
    }
}

struct Columns {
    date: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord, path: &Path) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| csv_error(path, format!("missing '{name}' column")))
        };
        Ok(Self {
            date: find("date")?,
            close: find("close")?,
            volume: find("volume")?,
        })
    }
}

/// Read and validate a series from `path`.
///
/// Rows whose close is empty or `null` (Yahoo's marker for a missing value)
/// are skipped. Rows are sorted by date and repeated dates dropped.
pub fn read_csv(path: &Path) -> Result<Series, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e.to_string()))?
        .clone();
    let cols = Columns::locate(&headers, path)?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e.to_string()))?;
        let line = row + 2;

        let raw_close = record.get(cols.close).unwrap_or("");
        if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
            skipped += 1;
            continue;
        }

        let date = parse_date(record.get(cols.date).unwrap_or(""))
            .ok_or_else(|| csv_error(path, format!("line {line}: invalid date")))?;
        let close: f64 = raw_close
            .parse()
            .map_err(|_| csv_error(path, format!("line {line}: invalid close '{raw_close}'")))?;
        let volume = parse_volume(record.get(cols.volume).unwrap_or(""))
            .ok_or_else(|| csv_error(path, format!("line {line}: invalid volume")))?;

        observations.push(Observation::new(date, close, volume));
    }

    if skipped > 0 {
        debug!(path = %path.display(), skipped, "skipped rows without a close");
    }

    Ok(Series::from_unordered(observations)?)
}

/// Write a series as `date,close,volume`.
pub fn write_csv(series: &Series, path: &Path) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e.to_string()))?;
    for obs in series.observations() {
        writer
            .serialize(obs)
            .map_err(|e| csv_error(path, e.to_string()))?;
    }
    writer.flush().map_err(|e| csv_error(path, e.to_string()))
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part
/// (`2024-01-02 00:00:00-05:00`, `2024-01-02T00:00:00Z`).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split(&[' ', 'T'][..]).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Integer volumes, or whole-number floats such as `1200.0`.
fn parse_volume(raw: &str) -> Option<u64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Some(0);
    }
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

fn csv_error(path: &Path, reason: String) -> DataError {
    DataError::Csv {
        path: path.display().to_string(),
        reason,
    }
}
