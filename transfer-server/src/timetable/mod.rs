//! In-memory timetable model supplied by the surrounding planner.
//!
//! The stop index maps stop ids to dense ordinals and answers station
//! membership. Trip patterns hold a fixed stop sequence and the trips that
//! run along it, ordered so that no trip overtakes another.

mod error;
mod pattern;
mod stop_index;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::TimetableError;
pub use pattern::{TripPattern, TripSchedule};
pub use stop_index::StopIndex;
