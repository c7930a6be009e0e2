//! Domain types for the breakout analyzer

pub mod observation;
pub mod series;

pub use observation::{Breakout, BreakoutRecord, EnrichedObservation, Observation};
pub use series::{Series, SeriesError};
