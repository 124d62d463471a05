//! Validated and indexed transit data.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use chrono::Duration;
use tracing::info;

use crate::domain::{PatternId, StopId, StopPosition, TransitTime, TripId};
use crate::timetable::{StopIndex, TripPattern, TripSchedule};
use crate::transfer::{
    BoardingRequest, ConstrainedBoarding, PatternTransfers, SearchDirection, TransferIndexGenerator,
    TransferIssue, TransferSearchConfig,
};

use super::{DataSet, LoadError, PatternRecord, QueryError};

/// How the default earliest board time of a query is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarliestBoard {
    /// An explicit time.
    At(TransitTime),
    /// A slack applied to the source time in the search direction.
    Slack(Duration),
}

/// A constrained boarding lookup expressed in ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    /// Pattern to board (forward) or to have alighted from (reverse).
    pub pattern: PatternId,
    pub stop_position: StopPosition,
    pub direction: SearchDirection,
    pub source_trip: TripId,
    pub source_stop: StopId,
    pub source_time: TransitTime,
    pub earliest_board: EarliestBoard,
}

/// Stops, patterns and their generated transfer indexes.
#[derive(Debug)]
pub struct TransitData {
    stops: StopIndex,
    patterns: Vec<TripPattern>,
    /// Aligned with `patterns`.
    transfers: Vec<PatternTransfers>,
    patterns_by_id: HashMap<PatternId, usize>,
    /// Trip -> (pattern index, trip index).
    trips_by_id: HashMap<TripId, (usize, usize)>,
    issues: Vec<TransferIssue>,
}

impl TransitData {
    /// Read a JSON data set from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&json)?;
        info!(path = %path.display(), "Loaded transit data");
        Ok(data)
    }

    /// Parse a JSON data set.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let data: DataSet = serde_json::from_str(json)?;
        Self::build(data)
    }

    /// Validate a data set and index its constrained transfers.
    ///
    /// Timetable problems fail the whole build. Transfer problems do not:
    /// the affected transfers are left out and reported by [`issues`].
    ///
    /// [`issues`]: TransitData::issues
    pub fn build(data: DataSet) -> Result<Self, LoadError> {
        let mut stops = StopIndex::new();
        for stop in data.stops {
            stops.add_stop(stop.id, stop.station)?;
        }

        let mut patterns = Vec::with_capacity(data.patterns.len());
        let mut patterns_by_id = HashMap::new();
        for record in data.patterns {
            match patterns_by_id.entry(record.id.clone()) {
                Entry::Occupied(_) => return Err(LoadError::DuplicatePattern(record.id)),
                Entry::Vacant(slot) => {
                    slot.insert(patterns.len());
                }
            }
            patterns.push(build_pattern(&stops, record)?);
        }

        let mut trips_by_id = HashMap::new();
        for (p, pattern) in patterns.iter().enumerate() {
            for trip in pattern.trips() {
                if trips_by_id
                    .insert(trip.trip_id().clone(), (p, trip.index()))
                    .is_some()
                {
                    return Err(LoadError::DuplicateTrip(trip.trip_id().clone()));
                }
            }
        }

        let generated = TransferIndexGenerator::new(&stops, &patterns).generate(&data.transfers);

        info!(
            stops = stops.len(),
            patterns = patterns.len(),
            trips = trips_by_id.len(),
            transfers = data.transfers.len(),
            issues = generated.issues.len(),
            "Built transit data"
        );

        Ok(Self {
            stops,
            patterns,
            transfers: generated.patterns,
            patterns_by_id,
            trips_by_id,
            issues: generated.issues,
        })
    }

    /// Returns the stop index.
    pub fn stop_index(&self) -> &StopIndex {
        &self.stops
    }

    /// Returns all patterns, in data set order.
    pub fn patterns(&self) -> &[TripPattern] {
        &self.patterns
    }

    /// Returns a pattern by id.
    pub fn pattern(&self, id: &PatternId) -> Option<&TripPattern> {
        self.patterns_by_id.get(id).map(|&i| &self.patterns[i])
    }

    /// Returns the forward and reverse transfer lookups of a pattern.
    pub fn pattern_transfers(&self, id: &PatternId) -> Option<&PatternTransfers> {
        self.patterns_by_id.get(id).map(|&i| &self.transfers[i])
    }

    /// Find a trip and the pattern it runs on.
    pub fn locate_trip(&self, id: &TripId) -> Option<(&TripPattern, &TripSchedule)> {
        let &(p, t) = self.trips_by_id.get(id)?;
        let pattern = &self.patterns[p];
        Some((pattern, pattern.trip(t)?))
    }

    /// Problems found while indexing constrained transfers.
    pub fn issues(&self) -> &[TransferIssue] {
        &self.issues
    }

    /// Check whether constrained transfers may apply at a pattern position.
    pub fn transfer_exist(
        &self,
        pattern: &PatternId,
        direction: SearchDirection,
        stop_position: StopPosition,
    ) -> Result<bool, QueryError> {
        let transfers = self
            .pattern_transfers(pattern)
            .ok_or_else(|| QueryError::UnknownPattern(pattern.clone()))?;
        Ok(transfers.search(direction).transfer_exist(stop_position))
    }

    /// Run the constrained boarding search for a query.
    ///
    /// `Ok(None)` means no constrained transfer decides the boarding.
    pub fn find_boarding(
        &self,
        query: &TransferQuery,
        config: &TransferSearchConfig,
    ) -> Result<Option<ConstrainedBoarding>, QueryError> {
        let &index = self
            .patterns_by_id
            .get(&query.pattern)
            .ok_or_else(|| QueryError::UnknownPattern(query.pattern.clone()))?;
        let (_, source_trip) = self
            .locate_trip(&query.source_trip)
            .ok_or_else(|| QueryError::UnknownTrip(query.source_trip.clone()))?;
        let source_stop = self
            .stops
            .ordinal(&query.source_stop)
            .ok_or_else(|| QueryError::UnknownStop(query.source_stop.clone()))?;

        let request = match query.earliest_board {
            EarliestBoard::At(time) => {
                BoardingRequest::new(source_trip, source_stop, query.source_time, time)
            }
            EarliestBoard::Slack(slack) => BoardingRequest::with_transfer_slack(
                query.direction,
                source_trip,
                source_stop,
                query.source_time,
                slack,
            ),
        };

        Ok(self.transfers[index].search(query.direction).find(
            &self.patterns[index],
            query.stop_position,
            &request,
            config,
        ))
    }
}

fn build_pattern(stops: &StopIndex, record: PatternRecord) -> Result<TripPattern, LoadError> {
    let mut ordinals = Vec::with_capacity(record.stops.len());
    for stop in record.stops {
        match stops.ordinal(&stop) {
            Some(ordinal) => ordinals.push(ordinal),
            None => {
                return Err(LoadError::UnknownStop {
                    pattern: record.id,
                    stop,
                });
            }
        }
    }

    let trips = record
        .trips
        .into_iter()
        .map(|trip| {
            let departures = trip.departures.unwrap_or_else(|| trip.arrivals.clone());
            TripSchedule::new(trip.id, record.route.clone(), trip.arrivals, departures)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TripPattern::new(record.id, record.route, ordinals, trips)?)
}
