//! Observation — the fundamental input unit — and the values derived from it
//! as a series moves through the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price/volume data for a single security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

impl Observation {
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// An observation plus its derived per-day metrics.
///
/// `None` means "not enough history to compute", never an error. Both fields
/// depend only on observations at or before this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedObservation {
    #[serde(flatten)]
    pub observation: Observation,
    /// Mean volume over the trailing 20-day window ending at this day.
    pub rolling_avg_volume: Option<f64>,
    /// Percent change of close versus the previous day's close.
    pub daily_pct_change: Option<f64>,
}

impl EnrichedObservation {
    pub fn date(&self) -> NaiveDate {
        self.observation.date
    }

    pub fn close(&self) -> f64 {
        self.observation.close
    }

    pub fn volume(&self) -> u64 {
        self.observation.volume
    }
}

/// A day selected by the classifier, anchored to its absolute position in the
/// original series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakout {
    pub index: usize,
    pub observation: EnrichedObservation,
}

/// A breakout annotated with its forward return over the holding period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakoutRecord {
    /// Position of the breakout day in the original series.
    pub index: usize,
    #[serde(flatten)]
    pub observation: EnrichedObservation,
    /// Percent return from this close to the close `holding_period` days later.
    /// `None` when the series ends before the exit day.
    pub holding_return: Option<f64>,
}

impl BreakoutRecord {
    pub fn date(&self) -> NaiveDate {
        self.observation.date()
    }

    pub fn close(&self) -> f64 {
        self.observation.close()
    }

    pub fn volume(&self) -> u64 {
        self.observation.volume()
    }
}
