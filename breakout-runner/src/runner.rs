//! Single-ticker analysis runner.
//!
//! Loads the series, runs the breakout pipeline, and packages everything the
//! reporting layer needs into an `AnalysisReport`.

use breakout_core::data::{DataProvider, DataSource};
use breakout_core::{analyze, AnalysisError, AnalysisParams, BreakoutRecord, ReturnStats};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{AnalysisConfig, ConfigError};
use crate::data_loader::{load_series, LoadError, LoadOptions, LoadedSeries};

/// Current report schema version. Bumped on breaking layout changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub params: AnalysisParams,
    pub source: DataSource,
    pub dataset_hash: String,
    pub observation_count: usize,
    /// First and last dates actually present in the loaded series.
    pub first_observation: Option<NaiveDate>,
    pub last_observation: Option<NaiveDate>,
    pub generated_at: DateTime<Utc>,
    pub records: Vec<BreakoutRecord>,
    pub stats: ReturnStats,
}

impl AnalysisReport {
    /// True when the analysis ran but no day qualified.
    pub fn has_no_breakouts(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Load the configured ticker through `providers` and analyze it.
pub fn run_analysis(
    config: &AnalysisConfig,
    providers: &[&dyn DataProvider],
    synthetic: bool,
) -> Result<AnalysisReport, RunError> {
    config.validate()?;

    let opts = LoadOptions {
        start: config.analysis.start_date,
        end: config.analysis.end_date,
        synthetic,
    };
    let loaded = load_series(config.ticker(), providers, &opts)?;

    Ok(analyze_loaded(config, &loaded)?)
}

/// Analyze an already-loaded series under `config`.
pub fn analyze_loaded(
    config: &AnalysisConfig,
    loaded: &LoadedSeries,
) -> Result<AnalysisReport, AnalysisError> {
    let params = config.params();
    let analysis = analyze(loaded.series.observations(), &params)?;
    let stats = analysis.stats();

    info!(
        ticker = %loaded.symbol,
        observations = loaded.series.len(),
        breakouts = stats.breakout_count,
        measured = stats.measured_count,
        "analysis complete"
    );

    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        ticker: loaded.symbol.clone(),
        start_date: config.analysis.start_date,
        end_date: config.analysis.end_date,
        params,
        source: loaded.source,
        dataset_hash: loaded.dataset_hash.clone(),
        observation_count: loaded.series.len(),
        first_observation: loaded.series.first_date(),
        last_observation: loaded.series.last_date(),
        generated_at: Utc::now(),
        records: analysis.records,
        stats,
    })
}
