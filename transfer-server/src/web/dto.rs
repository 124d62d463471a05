//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StopPosition, TransferConstraint};
use crate::timetable::StopIndex;
use crate::transfer::{ConstrainedBoarding, SearchDirection};

/// Query string of the existence check.
///
/// Kept as text so a bad value gets a JSON error from the handler.
#[derive(Debug, Default, Deserialize)]
pub struct TransferExistQuery {
    /// "forward" (boarding) or "reverse" (alighting); forward if absent
    pub direction: Option<String>,
}

/// Response of the existence check.
#[derive(Debug, Serialize)]
pub struct TransferExistResponse {
    pub exists: bool,
}

/// Request to run the constrained boarding search.
#[derive(Debug, Deserialize)]
pub struct TransferSearchRequest {
    /// Pattern to board (forward) or to have alighted from (reverse)
    pub pattern: String,

    /// Stop position in that pattern
    pub stop_position: usize,

    #[serde(default)]
    pub direction: SearchDirection,

    /// Trip the rider is on
    pub source_trip: String,

    /// Stop where the rider leaves (forward) or joins (reverse) the source trip
    pub source_stop: String,

    /// Arrival (forward) or departure (reverse) time there, "HH:MM[:SS]"
    pub source_time: String,

    /// Earliest regular board time, "HH:MM[:SS]"
    pub earliest_board_time: Option<String>,

    /// Slack in seconds, used instead of `earliest_board_time`
    pub transfer_slack_secs: Option<i64>,
}

/// A trip found by the search.
#[derive(Debug, Serialize)]
pub struct BoardingResult {
    /// Index of the trip within the pattern
    pub trip_index: usize,

    /// Trip id
    pub trip: String,

    pub stop_position: StopPosition,

    /// Stop id
    pub stop: String,

    /// Station the stop belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    /// Board (forward) or alight (reverse) time
    pub time: String,

    /// Earliest regular board time used by the search
    pub earliest_board_time: String,

    /// Rule the boarding is made under
    pub constraint: TransferConstraint,
}

impl BoardingResult {
    /// Convert a search result, resolving the stop ordinal to its id.
    pub fn from_boarding(boarding: &ConstrainedBoarding, stops: &StopIndex) -> Self {
        Self {
            trip_index: boarding.trip_index,
            trip: boarding.trip.to_string(),
            stop_position: boarding.stop_position,
            stop: stops
                .stop_id(boarding.stop)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            station: stops.station_of(boarding.stop).map(|id| id.to_string()),
            time: boarding.time.to_string(),
            earliest_board_time: boarding.earliest_board_time.to_string(),
            constraint: boarding.constraint,
        }
    }
}

/// Response of the boarding search.
#[derive(Debug, Serialize)]
pub struct TransferSearchResponse {
    /// `null` when no constrained transfer decides the boarding
    pub boarding: Option<BoardingResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
