//! Builds the per-pattern transfer indexes from constrained transfer records.
//!
//! Each side of a transfer is expanded into the concrete pattern locations it
//! covers: a stop or station point becomes every position of every pattern
//! visiting the stop (or a member stop of the station), optionally limited
//! to one route; a trip point becomes the one position of the trip's own
//! pattern. Every pair of from/to locations is then registered twice:
//!
//! - in the forward index of the *to* pattern at the *to* position, with the
//!   from side as source;
//! - in the reverse index of the *from* pattern at the *from* position, with
//!   the to side as source.
//!
//! Problems are collected as [`TransferIssue`]s and never stop generation.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::domain::{
    ConstrainedTransfer, PatternId, RouteId, StopOrdinal, StopPosition, TransferPoint, TripId,
};
use crate::timetable::{StopIndex, TripPattern};

use super::direction::SearchDirection;
use super::entry::{TransferForPattern, TripMatcher};
use super::index::{Registration, TransferIndexBuilder};
use super::issue::{TransferIssue, TransferSide};
use super::search::{ConstrainedTransferSearch, PatternTransfers};

/// Output of [`TransferIndexGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedTransfers {
    /// One entry per input pattern, in input order.
    pub patterns: Vec<PatternTransfers>,
    /// Transfers dropped and entries rejected, in the order found.
    pub issues: Vec<TransferIssue>,
}

/// One concrete place a transfer point covers.
#[derive(Debug, Clone)]
struct Location {
    /// Index into the generator's pattern slice.
    pattern: usize,
    position: StopPosition,
    stop: StopOrdinal,
    matcher: TripMatcher,
}

/// Resolves constrained transfers against a fixed set of patterns.
#[derive(Debug)]
pub struct TransferIndexGenerator<'a> {
    stops: &'a StopIndex,
    patterns: &'a [TripPattern],
    /// Stop -> indexes of the patterns visiting it.
    patterns_by_stop: HashMap<StopOrdinal, Vec<usize>>,
    /// Trip -> index of its pattern.
    pattern_by_trip: HashMap<&'a TripId, usize>,
}

impl<'a> TransferIndexGenerator<'a> {
    /// Prepare lookup tables for a stop index and its patterns.
    pub fn new(stops: &'a StopIndex, patterns: &'a [TripPattern]) -> Self {
        let mut patterns_by_stop: HashMap<StopOrdinal, Vec<usize>> = HashMap::new();
        let mut pattern_by_trip = HashMap::new();

        for (index, pattern) in patterns.iter().enumerate() {
            for &stop in pattern.stops() {
                let visiting = patterns_by_stop.entry(stop).or_default();
                // Looping patterns visit a stop more than once
                if visiting.last() != Some(&index) {
                    visiting.push(index);
                }
            }
            for trip in pattern.trips() {
                pattern_by_trip.insert(trip.trip_id(), index);
            }
        }

        Self {
            stops,
            patterns,
            patterns_by_stop,
            pattern_by_trip,
        }
    }

    /// Index a set of constrained transfers.
    pub fn generate(&self, transfers: &[ConstrainedTransfer]) -> GeneratedTransfers {
        let mut forward: Vec<_> = self
            .patterns
            .iter()
            .map(|p| TransferIndexBuilder::new(p.stop_count()))
            .collect();
        let mut reverse: Vec<_> = self
            .patterns
            .iter()
            .map(|p| TransferIndexBuilder::new(p.stop_count()))
            .collect();

        let mut issues = IssueLog::default();
        let mut indexed = 0usize;
        let mut entries = 0usize;

        for transfer in transfers {
            let from = self.expand(&transfer.from);
            if from.is_empty() {
                issues.push(unresolvable(transfer, TransferSide::From));
                continue;
            }
            let to = self.expand(&transfer.to);
            if to.is_empty() {
                issues.push(unresolvable(transfer, TransferSide::To));
                continue;
            }

            indexed += 1;
            for source in &from {
                for target in &to {
                    let entry = TransferForPattern::new(
                        source.stop,
                        source.matcher.clone(),
                        target.matcher.clone(),
                        transfer.constraint,
                        transfer.id.clone(),
                    );
                    let outcome = forward[target.pattern].add(target.position, entry);
                    entries += issues.record(
                        outcome,
                        transfer,
                        self.pattern_id(target.pattern),
                        target.position,
                        SearchDirection::Forward,
                    );

                    let mirrored = TransferForPattern::new(
                        target.stop,
                        target.matcher.clone(),
                        source.matcher.clone(),
                        transfer.constraint,
                        transfer.id.clone(),
                    );
                    let outcome = reverse[source.pattern].add(source.position, mirrored);
                    entries += issues.record(
                        outcome,
                        transfer,
                        self.pattern_id(source.pattern),
                        source.position,
                        SearchDirection::Reverse,
                    );
                }
            }
        }

        let issues = issues.into_vec();
        info!(
            transfers = transfers.len(),
            indexed,
            entries,
            issues = issues.len(),
            "Indexed constrained transfers"
        );

        let patterns = forward
            .into_iter()
            .zip(reverse)
            .map(|(forward, reverse)| PatternTransfers {
                forward: ConstrainedTransferSearch::new(SearchDirection::Forward, forward.build()),
                reverse: ConstrainedTransferSearch::new(SearchDirection::Reverse, reverse.build()),
            })
            .collect();

        GeneratedTransfers { patterns, issues }
    }

    /// Every pattern location a transfer point covers.
    fn expand(&self, point: &TransferPoint) -> Vec<Location> {
        let matcher = TripMatcher::for_point(point);
        let mut locations = Vec::new();

        match point {
            TransferPoint::Stop { stop } | TransferPoint::RouteAndStop { stop, .. } => {
                if let Some(ordinal) = self.stops.ordinal(stop) {
                    self.locations_at(ordinal, point.route(), &matcher, &mut locations);
                }
            }
            TransferPoint::Station { station } | TransferPoint::RouteAndStation { station, .. } => {
                for &ordinal in self.stops.stops_in_station(station) {
                    self.locations_at(ordinal, point.route(), &matcher, &mut locations);
                }
            }
            TransferPoint::Trip {
                trip,
                stop_position,
            } => {
                let location = self.pattern_by_trip.get(trip).and_then(|&pattern| {
                    let stop = self.patterns[pattern].stop_at(*stop_position)?;
                    Some(Location {
                        pattern,
                        position: *stop_position,
                        stop,
                        matcher: matcher.clone(),
                    })
                });
                locations.extend(location);
            }
        }

        locations
    }

    fn locations_at(
        &self,
        stop: StopOrdinal,
        route: Option<&RouteId>,
        matcher: &TripMatcher,
        out: &mut Vec<Location>,
    ) {
        let Some(visiting) = self.patterns_by_stop.get(&stop) else {
            return;
        };

        for &pattern in visiting {
            let timetable = &self.patterns[pattern];
            if route.is_some_and(|r| timetable.route() != r) {
                continue;
            }
            out.extend(timetable.positions_of(stop).map(|position| Location {
                pattern,
                position,
                stop,
                matcher: matcher.clone(),
            }));
        }
    }

    fn pattern_id(&self, index: usize) -> &PatternId {
        self.patterns[index].id()
    }
}

fn unresolvable(transfer: &ConstrainedTransfer, side: TransferSide) -> TransferIssue {
    let point = match side {
        TransferSide::From => &transfer.from,
        TransferSide::To => &transfer.to,
    };
    TransferIssue::Unresolvable {
        transfer: transfer.id.clone(),
        side,
        point: point.clone(),
    }
}

/// Issues in discovery order, each reported once.
#[derive(Debug, Default)]
struct IssueLog {
    issues: Vec<TransferIssue>,
    seen: HashSet<TransferIssue>,
}

impl IssueLog {
    fn push(&mut self, issue: TransferIssue) {
        if self.seen.insert(issue.clone()) {
            warn!(transfer = %issue.transfer(), "{issue}");
            self.issues.push(issue);
        }
    }

    /// Note the outcome of a registration; returns the number of entries added.
    fn record(
        &mut self,
        outcome: Registration,
        transfer: &ConstrainedTransfer,
        pattern: &PatternId,
        stop_position: StopPosition,
        direction: SearchDirection,
    ) -> usize {
        match outcome {
            Registration::Added => 1,
            Registration::Duplicate | Registration::OutOfRange => 0,
            Registration::Conflict { kept } => {
                self.push(TransferIssue::Conflict {
                    transfer: transfer.id.clone(),
                    kept,
                    pattern: pattern.clone(),
                    stop_position,
                    direction,
                });
                0
            }
        }
    }

    fn into_vec(self) -> Vec<TransferIssue> {
        self.issues
    }
}
