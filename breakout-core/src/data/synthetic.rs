//! Deterministic synthetic series for offline development.
//!
//! A weekday-only random walk seeded from the symbol name, with occasional
//! volume surges on up days so that the breakout pipeline has something to
//! find. Results built on it are tagged `DataSource::Synthetic`.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::provider::{check_range, DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Observation, Series};

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider;

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        check_range(start, end)?;
        warn!(symbol, "generating synthetic data; results are not market data");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series: Series::new(generate_series(symbol, start, end))?,
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Same symbol and range always yield the same series.
pub fn generate_series(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Observation> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut observations = Vec::new();
    let mut price = 100.0_f64;

    for date in start.iter_days().take_while(|d| *d <= end) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let surge = rng.gen_bool(0.04);
        let daily_return: f64 = if surge {
            rng.gen_range(0.01..0.06)
        } else {
            rng.gen_range(-0.025..0.025)
        };
        price = (price * (1.0 + daily_return)).max(1.0);

        let base_volume = rng.gen_range(800_000..1_600_000u64);
        let volume = if surge {
            base_volume * rng.gen_range(2..5)
        } else {
            base_volume
        };

        observations.push(Observation::new(date, price, volume));
    }

    observations
}
