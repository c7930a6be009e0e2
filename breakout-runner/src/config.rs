//! Serializable analysis configuration.
//!
//! ```toml
//! [analysis]
//! ticker = "AAPL"
//! start_date = "2023-01-01"
//! end_date = "2024-01-01"
//! volume_threshold_pct = 200.0
//! price_change_threshold_pct = 2.0
//! holding_period = 10
//! ```
//!
//! The three numeric parameters are optional and default to 200 / 2 / 10.

use std::path::Path;

use breakout_core::{AnalysisError, AnalysisParams};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("ticker must not be empty")]
    EmptyTicker,

    #[error("start_date {start} is after end_date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    InvalidParameter(#[from] AnalysisError),
}

/// Top-level config file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub analysis: AnalysisSection,
}

/// Everything needed to reproduce one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_volume_threshold")]
    pub volume_threshold_pct: f64,
    #[serde(default = "default_price_threshold")]
    pub price_change_threshold_pct: f64,
    #[serde(default = "default_holding_period")]
    pub holding_period: usize,
}

fn default_volume_threshold() -> f64 {
    AnalysisParams::default().volume_threshold_pct
}

fn default_price_threshold() -> f64 {
    AnalysisParams::default().price_change_threshold_pct
}

fn default_holding_period() -> usize {
    AnalysisParams::default().holding_period
}

impl AnalysisConfig {
    /// Build a config from explicit values with default parameters.
    pub fn new(ticker: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let params = AnalysisParams::default();
        Self {
            analysis: AnalysisSection {
                ticker: ticker.into(),
                start_date,
                end_date,
                volume_threshold_pct: params.volume_threshold_pct,
                price_change_threshold_pct: params.price_change_threshold_pct,
                holding_period: params.holding_period,
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        if a.ticker.trim().is_empty() {
            return Err(ConfigError::EmptyTicker);
        }
        if a.start_date > a.end_date {
            return Err(ConfigError::InvalidRange {
                start: a.start_date,
                end: a.end_date,
            });
        }
        self.params().validate()?;
        Ok(())
    }

    pub fn ticker(&self) -> &str {
        &self.analysis.ticker
    }

    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            volume_threshold_pct: self.analysis.volume_threshold_pct,
            price_change_threshold_pct: self.analysis.price_change_threshold_pct,
            holding_period: self.analysis.holding_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = AnalysisConfig::from_toml(
            r#"
[analysis]
ticker = "MSFT"
start_date = "2023-01-03"
end_date = "2023-12-29"
volume_threshold_pct = 250.0
price_change_threshold_pct = 3.5
holding_period = 5
"#,
        )
        .unwrap();
        assert_eq!(config.ticker(), "MSFT");
        assert_eq!(config.analysis.start_date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        let params = config.params();
        assert_eq!(params.volume_threshold_pct, 250.0);
        assert_eq!(params.price_change_threshold_pct, 3.5);
        assert_eq!(params.holding_period, 5);
    }

    #[test]
    fn missing_parameters_take_defaults() {
        let config = AnalysisConfig::from_toml(
            r#"
[analysis]
ticker = "AAPL"
start_date = "2023-01-01"
end_date = "2024-01-01"
"#,
        )
        .unwrap();
        assert_eq!(config.params(), AnalysisParams::default());
    }

    #[test]
    fn rejects_inverted_dates() {
        let err = AnalysisConfig::from_toml(
            r#"
[analysis]
ticker = "AAPL"
start_date = "2024-01-01"
end_date = "2023-01-01"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_zero_holding_period() {
        let err = AnalysisConfig::from_toml(
            r#"
[analysis]
ticker = "AAPL"
start_date = "2023-01-01"
end_date = "2024-01-01"
holding_period = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_blank_ticker_and_bad_toml() {
        let mut config = AnalysisConfig::new(
            " ",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        );
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTicker)));
        config.analysis.ticker = "AAPL".into();
        assert!(config.validate().is_ok());

        assert!(matches!(
            AnalysisConfig::from_toml("analysis = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
