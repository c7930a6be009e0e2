//! Series loading for the runner.
//!
//! Providers are tried in the order given; the first one that is available
//! and returns data wins. If every provider fails:
//! - with `synthetic` enabled → generate a deterministic synthetic series (tagged)
//! - otherwise → fail with every provider's reason
//!
//! Synthetic data is a developer-only mode; reports built on it say so.

use breakout_core::data::{DataError, DataProvider, DataSource, SyntheticProvider};
use breakout_core::Series;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data provider configured for '{symbol}' (use --synthetic for synthetic data)")]
    NoProvider { symbol: String },

    #[error("could not load '{symbol}': {}", format_failures(.failures))]
    AllProvidersFailed {
        symbol: String,
        failures: Vec<(String, DataError)>,
    },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

fn format_failures(failures: &[(String, DataError)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Options controlling how a series is loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// First date to include.
    pub start: NaiveDate,
    /// Last date to include.
    pub end: NaiveDate,
    /// Fall back to synthetic data when no provider succeeds.
    pub synthetic: bool,
}

/// A loaded series with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub symbol: String,
    pub series: Series,
    pub source: DataSource,
    /// BLAKE3 over the observations, for reproducibility.
    pub dataset_hash: String,
}

impl LoadedSeries {
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Load a series for `symbol`, falling back across `providers`.
pub fn load_series(
    symbol: &str,
    providers: &[&dyn DataProvider],
    opts: &LoadOptions,
) -> Result<LoadedSeries, LoadError> {
    let mut failures = Vec::new();

    for provider in providers {
        if !provider.is_available() {
            let reason = provider.unavailable_reason();
            warn!(symbol, provider = provider.name(), error = %reason, "provider unavailable, skipping");
            failures.push((provider.name().to_string(), reason));
            continue;
        }
        match provider.fetch(symbol, opts.start, opts.end) {
            Ok(fetched) => {
                info!(
                    symbol,
                    provider = provider.name(),
                    observations = fetched.series.len(),
                    "series loaded"
                );
                return Ok(loaded(symbol, fetched.series, fetched.source));
            }
            Err(e) => {
                warn!(symbol, provider = provider.name(), error = %e, "provider failed");
                failures.push((provider.name().to_string(), e));
            }
        }
    }

    if opts.synthetic {
        let fetched = SyntheticProvider.fetch(symbol, opts.start, opts.end)?;
        return Ok(loaded(symbol, fetched.series, fetched.source));
    }

    if providers.is_empty() {
        return Err(LoadError::NoProvider {
            symbol: symbol.to_string(),
        });
    }

    Err(LoadError::AllProvidersFailed {
        symbol: symbol.to_string(),
        failures,
    })
}

fn loaded(symbol: &str, series: Series, source: DataSource) -> LoadedSeries {
    let dataset_hash = compute_dataset_hash(symbol, &series);
    LoadedSeries {
        symbol: symbol.to_string(),
        series,
        source,
        dataset_hash,
    }
}

/// Deterministic BLAKE3 hash over the symbol and every observation.
pub fn compute_dataset_hash(symbol: &str, series: &Series) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    for obs in series.observations() {
        hasher.update(obs.date.to_string().as_bytes());
        hasher.update(&obs.close.to_le_bytes());
        hasher.update(&obs.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
