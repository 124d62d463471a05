//! Resolved transfer entries stored in the per-pattern index.

use crate::domain::{
    RouteId, Specificity, StopOrdinal, TransferConstraint, TransferId, TransferPoint, TripId,
};
use crate::timetable::TripSchedule;

/// The trip-dependent part of a transfer point.
///
/// Stop and station points become `Any` once they are expanded to concrete
/// stops; route and trip points keep the key that must be checked against
/// the live trip at search time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripMatcher {
    Any,
    Route(RouteId),
    Trip(TripId),
}

impl TripMatcher {
    /// Extract the trip-dependent key of a transfer point.
    pub fn for_point(point: &TransferPoint) -> Self {
        match point {
            TransferPoint::Station { .. } | TransferPoint::Stop { .. } => TripMatcher::Any,
            TransferPoint::RouteAndStation { route, .. }
            | TransferPoint::RouteAndStop { route, .. } => TripMatcher::Route(route.clone()),
            TransferPoint::Trip { trip, .. } => TripMatcher::Trip(trip.clone()),
        }
    }

    /// Returns the specificity class of this matcher.
    pub fn specificity(&self) -> Specificity {
        match self {
            TripMatcher::Any => Specificity::Location,
            TripMatcher::Route(_) => Specificity::Route,
            TripMatcher::Trip(_) => Specificity::Trip,
        }
    }

    /// Check whether a trip satisfies this matcher.
    pub fn matches(&self, trip: &TripSchedule) -> bool {
        match self {
            TripMatcher::Any => true,
            TripMatcher::Route(route) => trip.route() == route,
            TripMatcher::Trip(id) => trip.trip_id() == id,
        }
    }
}

/// A constrained transfer resolved to one stop position of one pattern.
///
/// "Source" is the side the search comes from: the arriving trip in the
/// forward index, the departing trip in the reverse index. "Target" is the
/// side being searched for in the pattern that owns the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferForPattern {
    source_stop: StopOrdinal,
    source: TripMatcher,
    target: TripMatcher,
    constraint: TransferConstraint,
    transfer: TransferId,
}

impl TransferForPattern {
    /// Create a resolved entry.
    pub fn new(
        source_stop: StopOrdinal,
        source: TripMatcher,
        target: TripMatcher,
        constraint: TransferConstraint,
        transfer: TransferId,
    ) -> Self {
        Self {
            source_stop,
            source,
            target,
            constraint,
            transfer,
        }
    }

    /// The stop the source trip must be at.
    pub fn source_stop(&self) -> StopOrdinal {
        self.source_stop
    }

    /// The source side matcher.
    pub fn source(&self) -> &TripMatcher {
        &self.source
    }

    /// The target side matcher.
    pub fn target(&self) -> &TripMatcher {
        &self.target
    }

    /// The rule this entry applies.
    pub fn constraint(&self) -> TransferConstraint {
        self.constraint
    }

    /// The transfer record this entry was resolved from.
    pub fn transfer_id(&self) -> &TransferId {
        &self.transfer
    }

    /// Specificity class of the source side.
    pub fn source_specificity(&self) -> Specificity {
        self.source.specificity()
    }

    /// Specificity class of the target side.
    pub fn target_specificity(&self) -> Specificity {
        self.target.specificity()
    }

    /// Check whether the entry applies to a source trip at a stop.
    pub fn matches_source(&self, stop: StopOrdinal, trip: &TripSchedule) -> bool {
        self.source_stop == stop && self.source.matches(trip)
    }

    /// Check whether the entry applies to a candidate target trip.
    pub fn matches_target(&self, trip: &TripSchedule) -> bool {
        self.target.matches(trip)
    }

    /// Two entries with the same keys address the same source/target pair.
    pub(crate) fn same_keys(&self, other: &Self) -> bool {
        self.source_stop == other.source_stop
            && self.source == other.source
            && self.target == other.target
    }

    /// Sort key: source specificity first, then target specificity.
    pub(crate) fn rank(&self) -> (Specificity, Specificity) {
        (self.source_specificity(), self.target_specificity())
    }
}
