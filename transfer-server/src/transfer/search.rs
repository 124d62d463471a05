//! Constrained boarding and alighting search.
//!
//! Given a trip the rider is on and a pattern they want to change to, find
//! the trip of that pattern the constrained transfers lead to. The forward
//! search looks for a trip to board after arriving; the reverse search looks
//! for a trip to have alighted from before departing. Both are the same scan
//! over the timetable, parameterised by [`SearchDirection`].
//!
//! The search only answers for stop positions that carry constrained
//! transfers. Where it returns `None`, the caller falls back to its ordinary
//! minimum-connection-time boarding logic.

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{StopOrdinal, StopPosition, TransferConstraint, TransitTime, TripId};
use crate::timetable::{TripPattern, TripSchedule};

use super::config::TransferSearchConfig;
use super::direction::SearchDirection;
use super::entry::{TransferForPattern, TripMatcher};
use super::index::TransferIndex;

/// A trip found by the constrained search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstrainedBoarding {
    /// Index of the trip within the searched pattern.
    pub trip_index: usize,
    pub trip: TripId,
    pub stop_position: StopPosition,
    pub stop: StopOrdinal,
    /// Board time (forward) or alight time (reverse).
    pub time: TransitTime,
    /// The default earliest board time the search was given.
    pub earliest_board_time: TransitTime,
    /// The rule the boarding is made under.
    pub constraint: TransferConstraint,
}

/// The rider's side of a transfer lookup.
#[derive(Debug, Clone, Copy)]
pub struct BoardingRequest<'a> {
    /// Trip the rider arrives on (forward) or departs on (reverse).
    pub source_trip: &'a TripSchedule,
    /// Stop where the source trip is left (forward) or boarded (reverse).
    pub source_stop: StopOrdinal,
    /// Arrival (forward) or departure (reverse) time of the source trip.
    pub source_time: TransitTime,
    /// Earliest time a regular, unconstrained transfer can be made.
    pub earliest_board_time: TransitTime,
}

impl<'a> BoardingRequest<'a> {
    /// Create a request with an explicit earliest board time.
    pub fn new(
        source_trip: &'a TripSchedule,
        source_stop: StopOrdinal,
        source_time: TransitTime,
        earliest_board_time: TransitTime,
    ) -> Self {
        Self {
            source_trip,
            source_stop,
            source_time,
            earliest_board_time,
        }
    }

    /// Create a request whose earliest board time is the source time moved
    /// by `slack` in the search direction.
    pub fn with_transfer_slack(
        direction: SearchDirection,
        source_trip: &'a TripSchedule,
        source_stop: StopOrdinal,
        source_time: TransitTime,
        slack: Duration,
    ) -> Self {
        let earliest_board_time = if direction.is_forward() {
            source_time + slack
        } else {
            source_time - slack
        };
        Self::new(source_trip, source_stop, source_time, earliest_board_time)
    }
}

/// Transfer lookup for one pattern in one direction.
#[derive(Debug, Clone)]
pub struct ConstrainedTransferSearch {
    direction: SearchDirection,
    index: TransferIndex,
}

impl ConstrainedTransferSearch {
    /// Wrap a built index.
    pub fn new(direction: SearchDirection, index: TransferIndex) -> Self {
        Self { direction, index }
    }

    /// Returns the underlying index.
    pub fn index(&self) -> &TransferIndex {
        &self.index
    }

    /// Check whether any constrained transfer may apply at a stop position.
    ///
    /// The journey search calls this for every stop it reaches, so it only
    /// looks at the slot and never at the trips.
    pub fn transfer_exist(&self, stop_position: StopPosition) -> bool {
        self.index.transfer_exist(stop_position)
    }

    /// Find the trip a constrained transfer leads to.
    ///
    /// `timetable` is the pattern this index belongs to; `stop_position` is
    /// where the rider boards it (forward) or alights from it (reverse).
    ///
    /// Only the most specific class of entries matching the source trip is
    /// considered. Trips from the source time on are scanned in timetable
    /// order: forbidden trips are skipped, facilitated ones accepted at once,
    /// and minimum transfer times checked against their required time.
    ///
    /// A rule forbidding the transfer to every trip at the stop returns the
    /// first reachable trip marked `NotAllowed`, so the caller blocks the
    /// transfer instead of falling back to ordinary boarding. Once a trip or
    /// route level rule has skipped a forbidden trip, the next trip a regular
    /// transfer could reach is returned as the fallback. Otherwise the scan
    /// gives up after `abort_after_normal_trips` regular trips, since the
    /// ordinary boarding logic would already have found one of those.
    pub fn find(
        &self,
        timetable: &TripPattern,
        stop_position: StopPosition,
        request: &BoardingRequest<'_>,
        config: &TransferSearchConfig,
    ) -> Option<ConstrainedBoarding> {
        let class = select_class(self.index.transfers_at(stop_position), request);
        if class.is_empty() {
            return None;
        }

        let direction = self.direction;
        let stop = timetable.stop_at(stop_position)?;
        trace!(
            pattern = %timetable.id(),
            %stop_position,
            source_trip = %request.source_trip.trip_id(),
            %direction,
            entries = class.len(),
            "Constrained transfer search"
        );

        let boarding = |trip: &TripSchedule, time, constraint| ConstrainedBoarding {
            trip_index: trip.index(),
            trip: trip.trip_id().clone(),
            stop_position,
            stop,
            time,
            earliest_board_time: request.earliest_board_time,
            constraint,
        };

        let mut normal_trips = 0;
        let mut skipped_not_allowed = false;

        for trip_index in direction.scan_order(timetable.trip_count()) {
            let trip = timetable.trip(trip_index)?;
            let time = direction.event_time(trip, stop_position)?;
            if direction.is_before(time, request.source_time) {
                continue;
            }

            let rule = target_rule(&class, trip);
            match rule.map(|e| e.constraint()) {
                Some(TransferConstraint::NotAllowed) if rule.is_some_and(forbids_every_trip) => {
                    debug!(trip = %trip.trip_id(), "Transfer forbidden for every trip");
                    return Some(boarding(trip, time, TransferConstraint::NotAllowed));
                }
                Some(TransferConstraint::NotAllowed) => {
                    trace!(trip = %trip.trip_id(), "Skipping forbidden trip");
                    skipped_not_allowed = true;
                }
                Some(
                    constraint @ (TransferConstraint::Guaranteed | TransferConstraint::StaySeated),
                ) => {
                    debug!(trip = %trip.trip_id(), %constraint, "Facilitated transfer found");
                    return Some(boarding(trip, time, constraint));
                }
                Some(constraint @ TransferConstraint::MinTransferTime { seconds }) => {
                    let required = min_time_board(direction, request, seconds, config);
                    if !direction.is_before(time, required) {
                        debug!(trip = %trip.trip_id(), %constraint, "Minimum transfer time met");
                        return Some(boarding(trip, time, constraint));
                    }
                }
                Some(TransferConstraint::Regular) | None => {
                    if direction.is_before(time, request.earliest_board_time) {
                        continue;
                    }
                    if skipped_not_allowed {
                        debug!(trip = %trip.trip_id(), "Next trip after forbidden transfer");
                        return Some(boarding(trip, time, TransferConstraint::Regular));
                    }
                    normal_trips += 1;
                    if normal_trips >= config.abort_after_normal_trips {
                        debug!(normal_trips, "Constrained transfer search aborted");
                        return None;
                    }
                }
            }
        }

        None
    }
}

/// Forward and reverse lookups of one pattern.
#[derive(Debug, Clone)]
pub struct PatternTransfers {
    /// Used when boarding this pattern.
    pub forward: ConstrainedTransferSearch,
    /// Used when alighting from this pattern in an arrive-by search.
    pub reverse: ConstrainedTransferSearch,
}

impl PatternTransfers {
    /// Returns the lookup for a direction.
    pub fn search(&self, direction: SearchDirection) -> &ConstrainedTransferSearch {
        match direction {
            SearchDirection::Forward => &self.forward,
            SearchDirection::Reverse => &self.reverse,
        }
    }
}

/// Entries of the most specific source class matching the request.
///
/// Slots are sorted by source specificity, so the first match fixes the
/// class and the rest of it follows contiguously.
fn select_class<'e>(
    entries: &'e [TransferForPattern],
    request: &BoardingRequest<'_>,
) -> Vec<&'e TransferForPattern> {
    let mut matching = entries
        .iter()
        .filter(|e| e.matches_source(request.source_stop, request.source_trip));
    let Some(first) = matching.next() else {
        return Vec::new();
    };
    let level = first.source_specificity();

    std::iter::once(first)
        .chain(matching.take_while(|e| e.source_specificity() == level))
        .collect()
}

/// The rule for a candidate trip: the most specific target match in the class.
fn target_rule<'e>(
    class: &[&'e TransferForPattern],
    trip: &TripSchedule,
) -> Option<&'e TransferForPattern> {
    class.iter().copied().find(|e| e.matches_target(trip))
}

/// Location level rules cover every trip of the pattern.
fn forbids_every_trip(entry: &TransferForPattern) -> bool {
    entry.target() == &TripMatcher::Any
}

fn min_time_board(
    direction: SearchDirection,
    request: &BoardingRequest<'_>,
    seconds: u32,
    config: &TransferSearchConfig,
) -> TransitTime {
    let secs = i32::try_from(seconds).unwrap_or(i32::MAX);
    let required = direction.plus(request.source_time, secs);
    if config.definitive_min_time {
        required
    } else {
        direction.later_of(required, request.earliest_board_time)
    }
}
