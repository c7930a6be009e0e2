//! Validated, date-ordered observation series.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::Observation;

/// Violations of the series data-model invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dates must be strictly increasing: index {index} has {current}, previous was {previous}")]
    NonIncreasingDate {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("close must be a positive finite number: index {index} ({date}) has {close}")]
    InvalidClose {
        index: usize,
        date: NaiveDate,
        close: f64,
    },
}

/// An immutable observation series with strictly increasing dates and
/// positive closes. An empty series is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Result<Self, SeriesError> {
        for (i, obs) in observations.iter().enumerate() {
            if !obs.close.is_finite() || obs.close <= 0.0 {
                return Err(SeriesError::InvalidClose {
                    index: i,
                    date: obs.date,
                    close: obs.close,
                });
            }
            if i > 0 && obs.date <= observations[i - 1].date {
                return Err(SeriesError::NonIncreasingDate {
                    index: i,
                    previous: observations[i - 1].date,
                    current: obs.date,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Sort by date and drop repeated dates (first occurrence wins), then validate.
    pub fn from_unordered(mut observations: Vec<Observation>) -> Result<Self, SeriesError> {
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self::new(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_inner(self) -> Vec<Observation> {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}
