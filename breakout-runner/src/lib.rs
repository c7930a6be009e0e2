//! Breakout Runner — analysis orchestration and reporting.
//!
//! This crate builds on `breakout-core` to provide:
//! - TOML analysis configuration
//! - Series loading with provider fallback and dataset hashing
//! - Single-ticker analysis runner
//! - Report export (CSV, JSON, Markdown)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{AnalysisConfig, AnalysisSection, ConfigError};
pub use data_loader::{load_series, LoadError, LoadOptions, LoadedSeries};
pub use export::{
    export_json, export_records_csv, generate_markdown, import_json, load_report, save_report,
    ReportPaths,
};
pub use runner::{analyze_loaded, run_analysis, AnalysisReport, RunError, SCHEMA_VERSION};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<AnalysisConfig>();
        assert_sync::<AnalysisConfig>();
        assert_send::<LoadOptions>();
        assert_sync::<LoadOptions>();
    }

    #[test]
    fn report_is_send_sync() {
        assert_send::<AnalysisReport>();
        assert_sync::<AnalysisReport>();
        assert_send::<LoadedSeries>();
        assert_sync::<LoadedSeries>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
