//! Integration tests for the analysis runner: config → load → analyze.

use breakout_core::data::{write_csv, CsvProvider, DataProvider, DataSource, YahooProvider};
use breakout_core::{Observation, Series};
use breakout_runner::{run_analysis, AnalysisConfig, LoadError, RunError};
use chrono::NaiveDate;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + chrono::Duration::days(offset)
}

/// 40 days, one surge at day 30 (+4%, 5x volume).
fn fixture_csv(dir: &std::path::Path) -> std::path::PathBuf {
    let observations: Vec<Observation> = (0..40)
        .map(|i| {
            let (close, volume) = match i {
                0..=29 => (50.0, 2_000_000),
                30 => (52.0, 10_000_000),
                _ => (52.0 + (i - 30) as f64, 2_000_000),
            };
            Observation::new(day(i), close, volume)
        })
        .collect();
    let path = dir.join("FIX.csv");
    write_csv(&Series::new(observations).unwrap(), &path).unwrap();
    path
}

fn config(holding_period: usize) -> AnalysisConfig {
    let mut config = AnalysisConfig::new("FIX", day(0), day(60));
    config.analysis.holding_period = holding_period;
    config
}

#[test]
fn runs_end_to_end_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvProvider::new(fixture_csv(dir.path()));

    let report = run_analysis(&config(5), &[&provider], false).unwrap();
    assert_eq!(report.ticker, "FIX");
    assert_eq!(report.source, DataSource::CsvImport);
    assert_eq!(report.observation_count, 40);
    assert_eq!(report.first_observation, Some(day(0)));
    assert_eq!(report.last_observation, Some(day(39)));
    assert_eq!(report.dataset_hash.len(), 64);

    assert_eq!(report.records.len(), 1);
    let rec = &report.records[0];
    assert_eq!(rec.index, 30);
    // exit at day 35: close 52 + 5 = 57
    assert_eq!(rec.holding_return, Some((57.0 - 52.0) / 52.0 * 100.0));
    assert_eq!(report.stats.measured_count, 1);
    assert_eq!(report.stats.win_rate, Some(1.0));
}

#[test]
fn strict_thresholds_give_explicit_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvProvider::new(fixture_csv(dir.path()));
    let mut cfg = config(5);
    cfg.analysis.price_change_threshold_pct = 10.0;

    let report = run_analysis(&cfg, &[&provider], false).unwrap();
    assert!(report.has_no_breakouts());
    assert_eq!(report.stats.breakout_count, 0);
}

#[test]
fn breakout_near_end_keeps_undefined_return() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvProvider::new(fixture_csv(dir.path()));

    let report = run_analysis(&config(20), &[&provider], false).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].holding_return, None);
    assert_eq!(report.stats.unmeasured_count, 1);
}

#[test]
fn failed_load_means_no_analysis() {
    let provider = CsvProvider::new("/nonexistent/FIX.csv");
    let err = run_analysis(&config(5), &[&provider], false).unwrap_err();
    assert!(matches!(err, RunError::Load(LoadError::AllProvidersFailed { .. })));
    let reason = err.to_string();
    assert!(reason.contains("/nonexistent/FIX.csv"), "{reason}");
    assert!(reason.contains("file not found"), "{reason}");
}

#[test]
fn synthetic_fallback_when_providers_fail() {
    let provider = CsvProvider::new("/nonexistent/FIX.csv");
    let report = run_analysis(&config(5), &[&provider], true).unwrap();
    assert!(report.is_synthetic());
    assert!(report.observation_count > 0);
}

#[test]
fn invalid_config_is_rejected_before_loading() {
    let mut cfg = config(5);
    cfg.analysis.volume_threshold_pct = 0.0;
    let err = run_analysis(&cfg, &[], true).unwrap_err();
    assert!(matches!(err, RunError::Config(_)));
}

#[test]
fn yahoo_provider_constructs_offline() {
    let breaker = std::sync::Arc::new(breakout_core::data::CircuitBreaker::default_provider());
    let provider = YahooProvider::new(breaker.clone()).unwrap();
    assert_eq!(provider.name(), "yahoo_finance");
    assert!(provider.is_available());
    breaker.trip();
    assert!(!provider.is_available());
}

#[test]
fn tripped_yahoo_reports_circuit_breaker() {
    let breaker = std::sync::Arc::new(breakout_core::data::CircuitBreaker::default_provider());
    breaker.trip();
    let provider = YahooProvider::new(breaker).unwrap();
    let err = run_analysis(&config(5), &[&provider], false).unwrap_err();
    assert!(err.to_string().contains("yahoo_finance: hard stop"), "{err}");
}
