//! Loaded transit data.
//!
//! A `DataSet` is the JSON snapshot of what the surrounding planner supplies:
//! stops, trip patterns and constrained transfers. `TransitData` is the
//! validated, indexed form of one snapshot. It is immutable once built; a
//! reload builds a new one.

mod error;
mod snapshot;
mod transit_data;

pub use error::{LoadError, QueryError};
pub use snapshot::{DataSet, PatternRecord, StopRecord, TripRecord};
pub use transit_data::{EarliestBoard, TransferQuery, TransitData};
