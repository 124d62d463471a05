//! Timetable consistency errors.

use crate::domain::{PatternId, RouteId, StopId, StopPosition, TripId};

/// Errors raised while assembling stops, trips and patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A stop id was registered twice
    #[error("duplicate stop {0}")]
    DuplicateStop(StopId),

    /// A pattern has no stops
    #[error("pattern {0} has no stops")]
    EmptyPattern(PatternId),

    /// A trip has no stop times
    #[error("trip {0} has no stop times")]
    EmptyTrip(TripId),

    /// Arrival and departure lists differ in length
    #[error("trip {trip} has {arrivals} arrivals but {departures} departures")]
    TimeCountMismatch {
        trip: TripId,
        arrivals: usize,
        departures: usize,
    },

    /// A trip's stop times do not line up with its pattern's stops
    #[error("trip {trip} has {actual} stop times but pattern {pattern} has {expected} stops")]
    StopCountMismatch {
        pattern: PatternId,
        trip: TripId,
        expected: usize,
        actual: usize,
    },

    /// Times go backwards within a trip
    #[error("trip {trip} goes back in time at stop position {stop_position}")]
    DecreasingTimes {
        trip: TripId,
        stop_position: StopPosition,
    },

    /// A trip belongs to a different route than its pattern
    #[error("trip {trip} runs on route {actual} but pattern {pattern} belongs to route {expected}")]
    RouteMismatch {
        pattern: PatternId,
        trip: TripId,
        expected: RouteId,
        actual: RouteId,
    },

    /// A trip overtakes another trip of the same pattern
    #[error("trip {trip} overtakes an earlier trip of {pattern} at position {stop_position}")]
    Overtaking {
        pattern: PatternId,
        trip: TripId,
        stop_position: StopPosition,
    },
}
