//! Where a transfer rule applies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RouteId, StationId, StopId, StopPosition, TripId};

/// How precisely a transfer point identifies a boarding or alighting.
///
/// Ordered so that a more specific class compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specificity {
    /// A stop or a station, any trip.
    Location = 1,
    /// Trips of one route at a stop or station.
    Route = 2,
    /// One trip at one stop position.
    Trip = 3,
}

impl Specificity {
    /// Numeric rank, higher is more specific.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// The source or target side of a constrained transfer.
///
/// Station-based points match every stop that is a member of the station;
/// membership is looked up in the stop index when transfers are indexed.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::{RouteId, Specificity, StopId, TransferPoint};
///
/// let stop = TransferPoint::Stop { stop: StopId::new("B").unwrap() };
/// let route = TransferPoint::RouteAndStop {
///     route: RouteId::new("R1").unwrap(),
///     stop: StopId::new("B").unwrap(),
/// };
/// assert_eq!(stop.specificity(), Specificity::Location);
/// assert!(route.specificity() > stop.specificity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferPoint {
    Station { station: StationId },
    Stop { stop: StopId },
    RouteAndStation { route: RouteId, station: StationId },
    RouteAndStop { route: RouteId, stop: StopId },
    Trip { trip: TripId, stop_position: StopPosition },
}

impl TransferPoint {
    /// Returns the specificity class of this point.
    pub fn specificity(&self) -> Specificity {
        match self {
            TransferPoint::Station { .. } | TransferPoint::Stop { .. } => Specificity::Location,
            TransferPoint::RouteAndStation { .. } | TransferPoint::RouteAndStop { .. } => {
                Specificity::Route
            }
            TransferPoint::Trip { .. } => Specificity::Trip,
        }
    }

    /// Returns the route this point is restricted to, if any.
    pub fn route(&self) -> Option<&RouteId> {
        match self {
            TransferPoint::RouteAndStation { route, .. }
            | TransferPoint::RouteAndStop { route, .. } => Some(route),
            TransferPoint::Station { .. }
            | TransferPoint::Stop { .. }
            | TransferPoint::Trip { .. } => None,
        }
    }

    /// Returns true if this point refers to a station rather than a stop.
    pub fn is_station(&self) -> bool {
        matches!(
            self,
            TransferPoint::Station { .. } | TransferPoint::RouteAndStation { .. }
        )
    }
}

impl fmt::Display for TransferPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferPoint::Station { station } => write!(f, "station {station}"),
            TransferPoint::Stop { stop } => write!(f, "stop {stop}"),
            TransferPoint::RouteAndStation { route, station } => {
                write!(f, "route {route} at station {station}")
            }
            TransferPoint::RouteAndStop { route, stop } => {
                write!(f, "route {route} at stop {stop}")
            }
            TransferPoint::Trip {
                trip,
                stop_position,
            } => write!(f, "trip {trip} at stop position {stop_position}"),
        }
    }
}
