//! Breakout classification.
//!
//! A day is a breakout when its volume exceeds `volume_threshold_pct` percent
//! of the rolling average AND its daily change is strictly above
//! `price_change_threshold_pct`. Days missing either metric never qualify.

use crate::domain::{Breakout, EnrichedObservation};

use super::params::validate_thresholds;
use super::AnalysisError;

/// Select breakout days, keeping their original indices and order.
pub fn classify(
    series: &[EnrichedObservation],
    volume_threshold_pct: f64,
    price_change_threshold_pct: f64,
) -> Result<Vec<Breakout>, AnalysisError> {
    validate_thresholds(volume_threshold_pct, price_change_threshold_pct)?;

    let volume_multiple = volume_threshold_pct / 100.0;

    Ok(series
        .iter()
        .enumerate()
        .filter(|(_, obs)| is_breakout(obs, volume_multiple, price_change_threshold_pct))
        .map(|(index, obs)| Breakout {
            index,
            observation: obs.clone(),
        })
        .collect())
}

fn is_breakout(obs: &EnrichedObservation, volume_multiple: f64, price_threshold: f64) -> bool {
    match (obs.rolling_avg_volume, obs.daily_pct_change) {
        (Some(avg), Some(change)) => {
            obs.volume() as f64 > volume_multiple * avg && change > price_threshold
        }
        _ => false,
    }
}
