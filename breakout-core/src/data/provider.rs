//! Data provider trait and structured error types.
//!
//! `DataProvider` abstracts over where a price/volume series comes from
//! (Yahoo Finance, a local CSV export, synthetic data) so the runner can swap
//! sources and tests can inject fixtures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Series, SeriesError};

/// Structured error types for data operations.
///
/// Displayable as the "no analysis performed" reason in the CLI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("CSV error in {path}: {reason}")]
    Csv { path: String, reason: String },

    #[error("invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("data error: {0}")]
    Other(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub series: Series,
    pub source: DataSource,
}

/// Trait for series providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the daily series for a symbol over `[start, end]`.
    ///
    /// An empty range may legitimately produce an empty series; providers
    /// that cannot tell "no data" from "unknown symbol" report
    /// `SymbolNotFound` instead.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;

    /// Why `is_available` returned false.
    fn unavailable_reason(&self) -> DataError {
        DataError::Other(format!("{} is unavailable", self.name()))
    }
}

pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DataError> {
    if start > end {
        return Err(DataError::InvalidRange { start, end });
    }
    Ok(())
}
