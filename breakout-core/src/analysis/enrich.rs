//! Series enrichment: rolling average volume and daily percent change.
//!
//! Both metrics at index t read only observations 0..=t.
//! Rolling volume lookback: VOLUME_WINDOW - 1 (first value at index 19).
//! Daily change lookback: 1.

use crate::domain::{EnrichedObservation, Observation};

/// Trailing window length for the rolling average volume.
pub const VOLUME_WINDOW: usize = 20;

/// Derive per-day metrics for every observation, preserving length and order.
pub fn enrich(series: &[Observation]) -> Vec<EnrichedObservation> {
    let rolling = rolling_avg_volume(series, VOLUME_WINDOW);

    series
        .iter()
        .zip(rolling)
        .enumerate()
        .map(|(i, (obs, rolling_avg_volume))| EnrichedObservation {
            observation: obs.clone(),
            rolling_avg_volume,
            daily_pct_change: i
                .checked_sub(1)
                .map(|prev| pct_change(series[prev].close, obs.close)),
        })
        .collect()
}

/// `(current / previous - 1) * 100`.
pub(crate) fn pct_change(previous: f64, current: f64) -> f64 {
    (current / previous - 1.0) * 100.0
}

fn rolling_avg_volume(series: &[Observation], window: usize) -> Vec<Option<f64>> {
    let n = series.len();
    let mut result = vec![None; n];

    if n < window {
        return result;
    }

    // Integer running sum keeps the mean exact regardless of window position.
    let mut sum: u128 = series[..window].iter().map(|o| o.volume as u128).sum();
    result[window - 1] = Some(sum as f64 / window as f64);

    for i in window..n {
        sum = sum + series[i].volume as u128 - series[i - window].volume as u128;
        result[i] = Some(sum as f64 / window as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64], volumes: &[u64]) -> Vec<Observation> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                Observation::new(base + chrono::Duration::days(i as i64), close, volume)
            })
            .collect()
    }

    #[test]
    fn empty_series_enriches_to_empty() {
        assert!(enrich(&[]).is_empty());
    }

    #[test]
    fn first_day_has_no_pct_change() {
        let series = make_series(&[100.0, 110.0, 99.0], &[1, 2, 3]);
        let enriched = enrich(&series);
        assert_eq!(enriched[0].daily_pct_change, None);
        assert!((enriched[1].daily_pct_change.unwrap() - 10.0).abs() < 1e-10);
        assert!((enriched[2].daily_pct_change.unwrap() + 10.0).abs() < 1e-10);
    }

    #[test]
    fn rolling_volume_undefined_before_window_fills() {
        let volumes: Vec<u64> = (1..=19).collect();
        let closes = vec![50.0; 19];
        let enriched = enrich(&make_series(&closes, &volumes));
        assert_eq!(enriched.len(), 19);
        assert!(enriched.iter().all(|e| e.rolling_avg_volume.is_none()));
    }

    #[test]
    fn rolling_volume_is_trailing_mean_of_twenty() {
        // volumes 1..=25
        let volumes: Vec<u64> = (1..=25).collect();
        let closes = vec![50.0; 25];
        let enriched = enrich(&make_series(&closes, &volumes));

        assert_eq!(enriched[18].rolling_avg_volume, None);
        // mean(1..=20) = 10.5
        assert_eq!(enriched[19].rolling_avg_volume, Some(10.5));
        // mean(6..=25) = 15.5
        assert_eq!(enriched[24].rolling_avg_volume, Some(15.5));
    }

    #[test]
    fn enrich_preserves_observations() {
        let series = make_series(&[10.0, 11.0], &[500, 600]);
        let enriched = enrich(&series);
        assert_eq!(enriched[0].observation, series[0]);
        assert_eq!(enriched[1].observation, series[1]);
    }
}
