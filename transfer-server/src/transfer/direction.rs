//! Search direction.
//!
//! The reverse search is the mirror image of the forward search: trips are
//! scanned by decreasing alight time instead of increasing board time, and
//! durations are subtracted instead of added. Everything direction-specific
//! lives here so the search itself is written once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{StopPosition, TransitTime};
use crate::timetable::TripSchedule;

/// Direction of the journey search driving a transfer lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    /// Depart-after search: find a trip to board after arriving.
    #[default]
    Forward,
    /// Arrive-by search: find a trip to have alighted from before departing.
    Reverse,
}

impl SearchDirection {
    /// Returns true for the forward direction.
    pub fn is_forward(self) -> bool {
        self == SearchDirection::Forward
    }

    /// Board time (forward) or alight time (reverse) of a trip.
    pub fn event_time(self, trip: &TripSchedule, pos: StopPosition) -> Option<TransitTime> {
        match self {
            SearchDirection::Forward => trip.departure(pos),
            SearchDirection::Reverse => trip.arrival(pos),
        }
    }

    /// Returns true if `time` comes before `limit` in search order.
    pub fn is_before(self, time: TransitTime, limit: TransitTime) -> bool {
        match self {
            SearchDirection::Forward => time < limit,
            SearchDirection::Reverse => time > limit,
        }
    }

    /// Moves `time` forward in search order by `secs`.
    pub fn plus(self, time: TransitTime, secs: i32) -> TransitTime {
        match self {
            SearchDirection::Forward => time.plus_secs(secs),
            SearchDirection::Reverse => time.minus_secs(secs),
        }
    }

    /// The later of two times in search order.
    pub fn later_of(self, a: TransitTime, b: TransitTime) -> TransitTime {
        match self {
            SearchDirection::Forward => a.max(b),
            SearchDirection::Reverse => a.min(b),
        }
    }

    /// Trip indexes of a timetable in scan order.
    pub fn scan_order(self, trip_count: usize) -> impl Iterator<Item = usize> {
        (0..trip_count).map(move |k| match self {
            SearchDirection::Forward => k,
            SearchDirection::Reverse => trip_count - 1 - k,
        })
    }
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::Forward => f.write_str("forward"),
            SearchDirection::Reverse => f.write_str("reverse"),
        }
    }
}
