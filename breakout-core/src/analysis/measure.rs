//! Forward-return measurement for breakout days.
//!
//! The exit day is found by absolute offset into the full series
//! (`breakout.index + holding_period`), never by position within the
//! breakout subset, which is sparse.

use crate::domain::{Breakout, BreakoutRecord, EnrichedObservation};

use super::params::validate_holding_period;
use super::AnalysisError;

/// Attach a holding-period return to every breakout, one record per input.
pub fn measure(
    full_series: &[EnrichedObservation],
    breakouts: &[Breakout],
    holding_period: usize,
) -> Result<Vec<BreakoutRecord>, AnalysisError> {
    validate_holding_period(holding_period)?;

    breakouts
        .iter()
        .map(|b| {
            let entry = full_series
                .get(b.index)
                .ok_or(AnalysisError::IndexOutOfRange {
                    index: b.index,
                    len: full_series.len(),
                })?;

            let holding_return = b
                .index
                .checked_add(holding_period)
                .and_then(|exit| full_series.get(exit))
                .map(|exit| holding_return(entry.close(), exit.close()));

            Ok(BreakoutRecord {
                index: b.index,
                observation: entry.clone(),
                holding_return,
            })
        })
        .collect()
}

/// `(exit - entry) / entry * 100`.
pub fn holding_return(entry_close: f64, exit_close: f64) -> f64 {
    (exit_close - entry_close) / entry_close * 100.0
}
