//! The breakout pipeline: enrich → classify → measure.
//!
//! Every stage borrows its input and returns a new value; nothing is mutated
//! in place. Insufficient history or future data shows up as `None` fields,
//! never as an error. Errors are reserved for nonsensical parameters.

pub mod classify;
pub mod enrich;
pub mod measure;
pub mod params;
pub mod stats;

pub use classify::classify;
pub use enrich::{enrich, VOLUME_WINDOW};
pub use measure::{holding_return, measure};
pub use params::AnalysisParams;
pub use stats::ReturnStats;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{BreakoutRecord, EnrichedObservation, Observation};

/// Errors from the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("breakout index {index} is outside the series (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Output of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub enriched: Vec<EnrichedObservation>,
    pub records: Vec<BreakoutRecord>,
}

impl Analysis {
    pub fn stats(&self) -> ReturnStats {
        ReturnStats::from_records(&self.records)
    }
}

/// Run the whole pipeline over a date-ordered series.
///
/// Parameters are validated before any computation.
pub fn analyze(series: &[Observation], params: &AnalysisParams) -> Result<Analysis, AnalysisError> {
    params.validate()?;

    let enriched = enrich(series);
    let breakouts = classify(
        &enriched,
        params.volume_threshold_pct,
        params.price_change_threshold_pct,
    )?;
    let records = measure(&enriched, &breakouts, params.holding_period)?;

    debug!(
        observations = enriched.len(),
        breakouts = records.len(),
        measured = records.iter().filter(|r| r.holding_return.is_some()).count(),
        "breakout pipeline complete"
    );

    Ok(Analysis { enriched, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn analyze_rejects_params_before_computing() {
        let params = AnalysisParams {
            holding_period: 0,
            ..Default::default()
        };
        assert!(analyze(&[], &params).is_err());
    }

    #[test]
    fn analyze_empty_series_is_empty() {
        let analysis = analyze(&[], &AnalysisParams::default()).unwrap();
        assert!(analysis.enriched.is_empty());
        assert!(analysis.records.is_empty());
        assert_eq!(analysis.stats().breakout_count, 0);
    }

    #[test]
    fn analyze_short_series_has_no_breakouts() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let series: Vec<Observation> = (0..10)
            .map(|i| Observation::new(base + chrono::Duration::days(i), 100.0 + i as f64 * 5.0, 1_000_000 * (i as u64 + 1)))
            .collect();
        let analysis = analyze(&series, &AnalysisParams::default()).unwrap();
        assert_eq!(analysis.enriched.len(), 10);
        assert!(analysis.records.is_empty());
    }
}
