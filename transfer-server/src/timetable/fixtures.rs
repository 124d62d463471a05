//! Small networks shared by tests.

use crate::domain::{PatternId, RouteId, StationId, StopId, StopOrdinal, TransitTime, TripId};

use super::{StopIndex, TripPattern, TripSchedule};

/// A stop index with the patterns that run through it.
pub(crate) struct Network {
    pub stops: StopIndex,
    pub patterns: Vec<TripPattern>,
}

impl Network {
    /// Two routes sharing stops B and C.
    ///
    /// ```text
    /// R1: A -> B -> C        R1-1 10:00 10:10 10:20
    ///                        R1-2 10:05 10:15 10:25
    /// R2:      B -> C -> D   R2-1 10:15 10:30 10:40, then every 5 min to R2-6
    /// ```
    ///
    /// B is the only member of station STATION_B. Pattern ids equal route ids.
    pub fn two_routes() -> Self {
        let mut stops = StopIndex::new();
        for (id, station) in [("A", None), ("B", Some("STATION_B")), ("C", None), ("D", None)] {
            stops
                .add_stop(
                    StopId::new(id).unwrap(),
                    station.map(|s| StationId::new(s).unwrap()),
                )
                .unwrap();
        }

        let r1 = pattern(
            &stops,
            "R1",
            &["A", "B", "C"],
            &[("R1-1", "10:00 10:10 10:20"), ("R1-2", "10:05 10:15 10:25")],
        );

        let r2_trips: Vec<(String, String)> = (0..6)
            .map(|i| {
                let shift = |t: &str| TransitTime::parse(t).unwrap().plus_secs(i * 300).to_string();
                (
                    format!("R2-{}", i + 1),
                    format!("{} {} {}", shift("10:15"), shift("10:30"), shift("10:40")),
                )
            })
            .collect();
        let r2_trips: Vec<(&str, &str)> = r2_trips
            .iter()
            .map(|(id, times)| (id.as_str(), times.as_str()))
            .collect();
        let r2 = pattern(&stops, "R2", &["B", "C", "D"], &r2_trips);

        Self {
            stops,
            patterns: vec![r1, r2],
        }
    }

    pub fn pattern_index(&self, id: &str) -> usize {
        self.patterns
            .iter()
            .position(|p| p.id().as_str() == id)
            .unwrap()
    }

    pub fn pattern(&self, id: &str) -> &TripPattern {
        &self.patterns[self.pattern_index(id)]
    }

    pub fn trip(&self, id: &str) -> &TripSchedule {
        let id = TripId::new(id).unwrap();
        self.patterns
            .iter()
            .flat_map(|p| p.trips())
            .find(|t| t.trip_id() == &id)
            .unwrap()
    }

    pub fn stop(&self, id: &str) -> StopOrdinal {
        self.stops.ordinal(&StopId::new(id).unwrap()).unwrap()
    }
}

/// Build a pattern whose id is its route id; arrival equals departure.
pub(crate) fn pattern(
    stops: &StopIndex,
    route: &str,
    stop_ids: &[&str],
    trips: &[(&str, &str)],
) -> TripPattern {
    let route_id = RouteId::new(route).unwrap();
    let ordinals = stop_ids
        .iter()
        .map(|s| stops.ordinal(&StopId::new(*s).unwrap()).unwrap())
        .collect();
    let schedules = trips
        .iter()
        .map(|(id, times)| {
            let times: Vec<_> = times
                .split_whitespace()
                .map(|t| TransitTime::parse(t).unwrap())
                .collect();
            TripSchedule::new(TripId::new(*id).unwrap(), route_id.clone(), times.clone(), times)
                .unwrap()
        })
        .collect();

    TripPattern::new(PatternId::new(route).unwrap(), route_id, ordinals, schedules).unwrap()
}
