//! Data loading and query errors.

use std::path::PathBuf;

use crate::domain::{PatternId, StopId, TripId};
use crate::timetable::TimetableError;

/// Errors from reading or validating a data set.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data is not a valid snapshot
    #[error("invalid transit data: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop, pattern or trip failed validation
    #[error(transparent)]
    Timetable(#[from] TimetableError),

    /// A pattern refers to a stop that is not in the stop list
    #[error("pattern {pattern} refers to unknown stop {stop}")]
    UnknownStop { pattern: PatternId, stop: StopId },

    /// Two patterns share an id
    #[error("duplicate pattern {0}")]
    DuplicatePattern(PatternId),

    /// Two trips share an id
    #[error("duplicate trip {0}")]
    DuplicateTrip(TripId),
}

/// Errors from looking up the entities a transfer query names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown pattern {0}")]
    UnknownPattern(PatternId),

    #[error("unknown trip {0}")]
    UnknownTrip(TripId),

    #[error("unknown stop {0}")]
    UnknownStop(StopId),
}
