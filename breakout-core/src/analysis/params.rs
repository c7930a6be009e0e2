//! Analysis parameters as an explicit, immutable configuration value.

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// Thresholds and holding period for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Volume must exceed this percentage of the rolling average (200 = double).
    pub volume_threshold_pct: f64,
    /// Daily change must be strictly greater than this many percentage points.
    pub price_change_threshold_pct: f64,
    /// Trading days between the breakout close and the exit close.
    pub holding_period: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            volume_threshold_pct: 200.0,
            price_change_threshold_pct: 2.0,
            holding_period: 10,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        validate_thresholds(self.volume_threshold_pct, self.price_change_threshold_pct)?;
        validate_holding_period(self.holding_period)
    }
}

pub(crate) fn validate_thresholds(
    volume_threshold_pct: f64,
    price_change_threshold_pct: f64,
) -> Result<(), AnalysisError> {
    if !volume_threshold_pct.is_finite() || volume_threshold_pct <= 0.0 {
        return Err(AnalysisError::InvalidParameter {
            name: "volume_threshold_pct",
            value: volume_threshold_pct.to_string(),
            reason: "must be a positive finite percentage",
        });
    }
    if !price_change_threshold_pct.is_finite() {
        return Err(AnalysisError::InvalidParameter {
            name: "price_change_threshold_pct",
            value: price_change_threshold_pct.to_string(),
            reason: "must be a finite percentage",
        });
    }
    Ok(())
}

pub(crate) fn validate_holding_period(holding_period: usize) -> Result<(), AnalysisError> {
    if holding_period == 0 {
        return Err(AnalysisError::InvalidParameter {
            name: "holding_period",
            value: holding_period.to_string(),
            reason: "must be at least one trading day",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = AnalysisParams::default();
        assert_eq!(params.volume_threshold_pct, 200.0);
        assert_eq!(params.price_change_threshold_pct, 2.0);
        assert_eq!(params.holding_period, 10);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn negative_price_threshold_is_allowed() {
        let params = AnalysisParams {
            price_change_threshold_pct: -1.5,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_volume_threshold() {
        for bad in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let params = AnalysisParams {
                volume_threshold_pct: bad,
                ..Default::default()
            };
            let err = params.validate().unwrap_err();
            assert!(matches!(
                err,
                AnalysisError::InvalidParameter {
                    name: "volume_threshold_pct",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_zero_holding_period() {
        let params = AnalysisParams {
            holding_period: 0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter holding_period = 0: must be at least one trading day"
        );
    }
}
