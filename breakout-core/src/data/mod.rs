//! Data providers: Yahoo Finance, CSV files, synthetic series

pub mod circuit_breaker;
pub mod csv_file;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_file::{read_csv, write_csv, CsvProvider};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
