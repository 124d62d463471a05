//! Trip patterns and trip schedules.
//!
//! A `TripPattern` is the timetable of one stop sequence of a route. Its trips
//! are sorted by departure from the first stop and never overtake each other,
//! so at every stop position the trips are also ordered by board and alight
//! time. The boarding search relies on this ordering.

use crate::domain::{PatternId, RouteId, StopOrdinal, StopPosition, TransitTime, TripId};

use super::TimetableError;

/// One scheduled run of a pattern, with its own per-stop times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSchedule {
    trip: TripId,
    route: RouteId,
    /// Position of the trip within its pattern; assigned by the pattern.
    index: usize,
    arrivals: Vec<TransitTime>,
    departures: Vec<TransitTime>,
}

impl TripSchedule {
    /// Create a trip schedule from per-stop arrival and departure times.
    ///
    /// Times must not go backwards: each departure is at or after the
    /// arrival at the same stop, and each arrival is at or after the
    /// previous departure.
    pub fn new(
        trip: TripId,
        route: RouteId,
        arrivals: Vec<TransitTime>,
        departures: Vec<TransitTime>,
    ) -> Result<Self, TimetableError> {
        if arrivals.is_empty() {
            return Err(TimetableError::EmptyTrip(trip));
        }
        if arrivals.len() != departures.len() {
            return Err(TimetableError::TimeCountMismatch {
                trip,
                arrivals: arrivals.len(),
                departures: departures.len(),
            });
        }

        for (pos, (arr, dep)) in arrivals.iter().zip(&departures).enumerate() {
            let after_previous = pos == 0 || departures[pos - 1] <= *arr;
            if dep < arr || !after_previous {
                return Err(TimetableError::DecreasingTimes {
                    trip,
                    stop_position: StopPosition(pos),
                });
            }
        }

        Ok(Self {
            trip,
            route,
            index: 0,
            arrivals,
            departures,
        })
    }

    /// Returns the trip id.
    pub fn trip_id(&self) -> &TripId {
        &self.trip
    }

    /// Returns the route the trip runs on.
    pub fn route(&self) -> &RouteId {
        &self.route
    }

    /// Returns the index of this trip within its pattern.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Arrival time at a stop position.
    pub fn arrival(&self, pos: StopPosition) -> Option<TransitTime> {
        self.arrivals.get(pos.0).copied()
    }

    /// Departure (board) time at a stop position.
    pub fn departure(&self, pos: StopPosition) -> Option<TransitTime> {
        self.departures.get(pos.0).copied()
    }

    /// Returns the number of stop times.
    pub fn stop_count(&self) -> usize {
        self.arrivals.len()
    }
}

/// A fixed stop sequence with the trips that serve it.
#[derive(Debug, Clone)]
pub struct TripPattern {
    id: PatternId,
    route: RouteId,
    stops: Vec<StopOrdinal>,
    trips: Vec<TripSchedule>,
}

impl TripPattern {
    /// Build a pattern from its stops and trips.
    ///
    /// Trips are sorted by departure from the first stop (ties by trip id)
    /// and assigned their index. Construction fails if a trip does not fit
    /// the stop sequence, runs on another route, or overtakes another trip.
    pub fn new(
        id: PatternId,
        route: RouteId,
        stops: Vec<StopOrdinal>,
        mut trips: Vec<TripSchedule>,
    ) -> Result<Self, TimetableError> {
        if stops.is_empty() {
            return Err(TimetableError::EmptyPattern(id));
        }

        for trip in &trips {
            if trip.stop_count() != stops.len() {
                return Err(TimetableError::StopCountMismatch {
                    pattern: id,
                    trip: trip.trip.clone(),
                    expected: stops.len(),
                    actual: trip.stop_count(),
                });
            }
            if trip.route != route {
                return Err(TimetableError::RouteMismatch {
                    pattern: id,
                    trip: trip.trip.clone(),
                    expected: route,
                    actual: trip.route.clone(),
                });
            }
        }

        trips.sort_by(|a, b| {
            a.departures[0]
                .cmp(&b.departures[0])
                .then_with(|| a.trip.cmp(&b.trip))
        });

        for pair in trips.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            let overtaken = (0..stops.len()).find(|&pos| {
                later.arrivals[pos] < earlier.arrivals[pos]
                    || later.departures[pos] < earlier.departures[pos]
            });
            if let Some(pos) = overtaken {
                return Err(TimetableError::Overtaking {
                    pattern: id,
                    trip: later.trip.clone(),
                    stop_position: StopPosition(pos),
                });
            }
        }

        for (index, trip) in trips.iter_mut().enumerate() {
            trip.index = index;
        }

        Ok(Self {
            id,
            route,
            stops,
            trips,
        })
    }

    /// Returns the pattern id.
    pub fn id(&self) -> &PatternId {
        &self.id
    }

    /// Returns the route of this pattern.
    pub fn route(&self) -> &RouteId {
        &self.route
    }

    /// Returns the stop sequence.
    pub fn stops(&self) -> &[StopOrdinal] {
        &self.stops
    }

    /// Returns the number of stops in the sequence.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the stop at a position.
    pub fn stop_at(&self, pos: StopPosition) -> Option<StopOrdinal> {
        self.stops.get(pos.0).copied()
    }

    /// Returns every position at which the pattern visits a stop.
    ///
    /// A looping pattern may visit the same stop more than once.
    pub fn positions_of(&self, stop: StopOrdinal) -> impl Iterator<Item = StopPosition> + '_ {
        self.stops
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == stop)
            .map(|(pos, _)| StopPosition(pos))
    }

    /// Returns the trips, ordered by time.
    pub fn trips(&self) -> &[TripSchedule] {
        &self.trips
    }

    /// Returns the trip at an index.
    pub fn trip(&self, index: usize) -> Option<&TripSchedule> {
        self.trips.get(index)
    }

    /// Returns the number of trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}
