//! Descriptive statistics over measured holding returns.
//!
//! Records whose return is undefined are counted but excluded from every
//! aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::BreakoutRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnStats {
    pub breakout_count: usize,
    /// Records with a defined holding return.
    pub measured_count: usize,
    /// Records whose exit day lies beyond the series end.
    pub unmeasured_count: usize,
    pub mean_return: Option<f64>,
    pub median_return: Option<f64>,
    pub best_return: Option<f64>,
    pub worst_return: Option<f64>,
    /// Fraction of measured returns strictly above zero.
    pub win_rate: Option<f64>,
}

impl ReturnStats {
    pub fn from_records(records: &[BreakoutRecord]) -> Self {
        let mut returns: Vec<f64> = records.iter().filter_map(|r| r.holding_return).collect();
        let measured = returns.len();

        let mut stats = Self {
            breakout_count: records.len(),
            measured_count: measured,
            unmeasured_count: records.len() - measured,
            ..Default::default()
        };

        if measured == 0 {
            return stats;
        }

        returns.sort_by(|a, b| a.total_cmp(b));

        stats.mean_return = Some(returns.iter().sum::<f64>() / measured as f64);
        stats.median_return = Some(if measured % 2 == 1 {
            returns[measured / 2]
        } else {
            (returns[measured / 2 - 1] + returns[measured / 2]) / 2.0
        });
        stats.worst_return = returns.first().copied();
        stats.best_return = returns.last().copied();
        stats.win_rate =
            Some(returns.iter().filter(|&&r| r > 0.0).count() as f64 / measured as f64);

        stats
    }
}
