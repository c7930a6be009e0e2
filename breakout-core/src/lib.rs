//! Breakout Core — domain types, the breakout pipeline, and data providers.
//!
//! This crate contains:
//! - Domain types (observations, enriched observations, breakout records)
//! - Series validation (strictly increasing dates, positive closes)
//! - The three-stage pipeline: enrich → classify → measure
//! - Return statistics over measured breakouts
//! - Data providers (Yahoo Finance, CSV, synthetic)

pub mod analysis;
pub mod data;
pub mod domain;

pub use analysis::{analyze, Analysis, AnalysisError, AnalysisParams, ReturnStats};
pub use domain::{Breakout, BreakoutRecord, EnrichedObservation, Observation, Series};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything handed across the pipeline is Send + Sync,
    /// so independent securities can be analyzed on separate threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Observation>();
        require_sync::<Observation>();
        require_send::<EnrichedObservation>();
        require_sync::<EnrichedObservation>();
        require_send::<Breakout>();
        require_sync::<Breakout>();
        require_send::<BreakoutRecord>();
        require_sync::<BreakoutRecord>();
        require_send::<Series>();
        require_sync::<Series>();
        require_send::<Analysis>();
        require_sync::<Analysis>();
        require_send::<AnalysisParams>();
        require_sync::<AnalysisParams>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<ReturnStats>();
        require_sync::<ReturnStats>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
    }

    /// Architecture contract: the return measurer looks up exits in the full
    /// series, so its signature must take the full enriched series alongside
    /// the breakout subset.
    #[test]
    fn measure_takes_full_series_and_subset() {
        fn _check(
            full: &[EnrichedObservation],
            subset: &[Breakout],
        ) -> Result<Vec<BreakoutRecord>, AnalysisError> {
            analysis::measure(full, subset, 1)
        }
    }
}
