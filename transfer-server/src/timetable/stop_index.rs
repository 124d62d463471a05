//! Stop index: stop ids to global ordinals, plus station membership.

use std::collections::HashMap;

use crate::domain::{StationId, StopId, StopOrdinal};

use super::TimetableError;

#[derive(Debug, Clone)]
struct StopEntry {
    id: StopId,
    station: Option<StationId>,
}

/// Index of all stops in the data set.
///
/// Ordinals are dense and assigned in registration order, so they can be
/// used to index plain vectors.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    stops: Vec<StopEntry>,
    by_id: HashMap<StopId, StopOrdinal>,
    by_station: HashMap<StationId, Vec<StopOrdinal>>,
}

impl StopIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop, optionally as a member of a station.
    ///
    /// Returns the ordinal assigned to the stop.
    pub fn add_stop(
        &mut self,
        id: StopId,
        station: Option<StationId>,
    ) -> Result<StopOrdinal, TimetableError> {
        if self.by_id.contains_key(&id) {
            return Err(TimetableError::DuplicateStop(id));
        }

        let ordinal = StopOrdinal(self.stops.len());
        if let Some(station) = &station {
            self.by_station
                .entry(station.clone())
                .or_default()
                .push(ordinal);
        }
        self.by_id.insert(id.clone(), ordinal);
        self.stops.push(StopEntry { id, station });

        Ok(ordinal)
    }

    /// Look up the ordinal of a stop.
    pub fn ordinal(&self, id: &StopId) -> Option<StopOrdinal> {
        self.by_id.get(id).copied()
    }

    /// Look up the id of a stop by ordinal.
    pub fn stop_id(&self, ordinal: StopOrdinal) -> Option<&StopId> {
        self.stops.get(ordinal.0).map(|s| &s.id)
    }

    /// Returns the station a stop belongs to, if any.
    pub fn station_of(&self, ordinal: StopOrdinal) -> Option<&StationId> {
        self.stops.get(ordinal.0).and_then(|s| s.station.as_ref())
    }

    /// Returns the member stops of a station.
    ///
    /// Unknown stations have no members.
    pub fn stops_in_station(&self, station: &StationId) -> &[StopOrdinal] {
        self.by_station
            .get(station)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if no stops are registered.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
