//! Serialized form of the collaborator data.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ConstrainedTransfer, PatternId, RouteId, StationId, StopId, TransitTime, TripId,
};

/// A complete data set as stored on disk.
///
/// ```json
/// {
///   "stops": [{"id": "B", "station": "STATION_B"}],
///   "patterns": [{
///     "id": "P1", "route": "R1", "stops": ["A", "B"],
///     "trips": [{"id": "T1", "arrivals": ["10:00", "10:10"]}]
///   }],
///   "transfers": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub patterns: Vec<PatternRecord>,
    #[serde(default)]
    pub transfers: Vec<ConstrainedTransfer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: StopId,
    /// Station the stop belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<StationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: PatternId,
    pub route: RouteId,
    /// Stop sequence; a stop may appear more than once
    pub stops: Vec<StopId>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: TripId,
    /// Arrival time at each stop of the pattern
    pub arrivals: Vec<TransitTime>,
    /// Departure time at each stop; same as the arrivals when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departures: Option<Vec<TransitTime>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let data: DataSet = serde_json::from_str("{}").unwrap();
        assert_eq!(data, DataSet::default());
    }

    #[test]
    fn parse_full() {
        let json = r#"{
            "stops": [{"id": "A"}, {"id": "B", "station": "S"}],
            "patterns": [{
                "id": "P1", "route": "R1", "stops": ["A", "B"],
                "trips": [
                    {"id": "T1", "arrivals": ["10:00", "10:10"]},
                    {"id": "T2", "arrivals": ["10:05", "10:15"], "departures": ["10:06", "10:16"]}
                ]
            }],
            "transfers": [{
                "id": "TX1",
                "from": {"type": "stop", "stop": "B"},
                "to": {"type": "station", "station": "S"},
                "constraint": {"type": "guaranteed"}
            }]
        }"#;

        let data: DataSet = serde_json::from_str(json).unwrap();
        assert_eq!(data.stops.len(), 2);
        assert_eq!(data.stops[1].station, Some(StationId::new("S").unwrap()));
        assert_eq!(data.patterns[0].trips[0].departures, None);
        assert_eq!(
            data.patterns[0].trips[1].departures.as_deref().map(|d| d[0].to_string()),
            Some("10:06".to_string())
        );
        assert_eq!(data.transfers[0].id.as_str(), "TX1");
    }

    #[test]
    fn reject_empty_ids() {
        let json = r#"{"stops": [{"id": ""}]}"#;
        assert!(serde_json::from_str::<DataSet>(json).is_err());
    }
}
