//! storm-ingest: storm events CSV loading into pipeline records.

pub mod types;
pub mod storm_data;

pub use types::{StormEvent, since_year, to_raw_records};
pub use storm_data::{load_storm_csv, parse_storm_csv};
