//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Duration;
use tracing::warn;

use crate::data::{EarliestBoard, QueryError, TransferQuery};
use crate::domain::{DomainError, PatternId, StopId, StopPosition, TransitTime, TripId};
use crate::transfer::SearchDirection;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/patterns/:pattern/transfers/:stop_position",
            get(transfer_exists),
        )
        .route("/transfers/search", post(search_transfer))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check whether constrained transfers may apply at a pattern position.
async fn transfer_exists(
    State(state): State<AppState>,
    Path((pattern, stop_position)): Path<(String, String)>,
    Query(query): Query<TransferExistQuery>,
) -> Result<Json<TransferExistResponse>, AppError> {
    let pattern = PatternId::new(pattern).map_err(DomainError::from)?;
    let stop_position = stop_position
        .parse()
        .map(StopPosition)
        .map_err(|_| AppError::BadRequest {
            message: format!("invalid stop position: {stop_position}"),
        })?;
    let direction = parse_direction(query.direction.as_deref())?;

    let exists = state.data.transfer_exist(&pattern, direction, stop_position)?;

    Ok(Json(TransferExistResponse { exists }))
}

/// Run the constrained boarding search.
async fn search_transfer(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TransferSearchResponse>, AppError> {
    // Parse JSON manually so malformed bodies get a JSON error
    let req: TransferSearchRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "Invalid search request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let query = parse_query(req)?;
    let boarding = state.data.find_boarding(&query, &state.config)?;

    Ok(Json(TransferSearchResponse {
        boarding: boarding
            .map(|b| BoardingResult::from_boarding(&b, state.data.stop_index())),
    }))
}

fn parse_direction(direction: Option<&str>) -> Result<SearchDirection, AppError> {
    match direction {
        None | Some("forward") => Ok(SearchDirection::Forward),
        Some("reverse") => Ok(SearchDirection::Reverse),
        Some(other) => Err(AppError::BadRequest {
            message: format!("invalid direction: {other}"),
        }),
    }
}

fn parse_query(req: TransferSearchRequest) -> Result<TransferQuery, AppError> {
    let earliest_board = match (req.earliest_board_time, req.transfer_slack_secs) {
        (Some(time), None) => {
            EarliestBoard::At(TransitTime::parse(&time).map_err(DomainError::from)?)
        }
        (None, Some(secs)) => {
            let slack = Duration::try_seconds(secs)
                .filter(|_| secs >= 0)
                .ok_or_else(|| AppError::BadRequest {
                    message: format!("invalid transfer_slack_secs: {secs}"),
                })?;
            EarliestBoard::Slack(slack)
        }
        _ => {
            return Err(AppError::BadRequest {
                message: "exactly one of earliest_board_time and transfer_slack_secs is required"
                    .to_string(),
            });
        }
    };

    Ok(TransferQuery {
        pattern: PatternId::new(req.pattern).map_err(DomainError::from)?,
        stop_position: StopPosition(req.stop_position),
        direction: req.direction,
        source_trip: TripId::new(req.source_trip).map_err(DomainError::from)?,
        source_stop: StopId::new(req.source_stop).map_err(DomainError::from)?,
        source_time: TransitTime::parse(&req.source_time).map_err(DomainError::from)?,
        earliest_board,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");
        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TransitData;
    use crate::domain::TransferConstraint;
    use crate::transfer::TransferSearchConfig;

    const NETWORK: &str = r#"{
        "stops": [{"id": "A"}, {"id": "B", "station": "STATION_B"}, {"id": "C"}],
        "patterns": [
            {
                "id": "P1", "route": "R1", "stops": ["A", "B"],
                "trips": [{"id": "T1", "arrivals": ["10:00", "10:10"]}]
            },
            {
                "id": "P2", "route": "R2", "stops": ["B", "C"],
                "trips": [
                    {"id": "T2", "arrivals": ["10:10", "10:20"]},
                    {"id": "T3", "arrivals": ["10:20", "10:30"]}
                ]
            }
        ],
        "transfers": [{
            "id": "TX1",
            "from": {"type": "route_and_stop", "route": "R1", "stop": "B"},
            "to": {"type": "route_and_stop", "route": "R2", "stop": "B"},
            "constraint": {"type": "stay_seated"}
        }]
    }"#;

    fn state() -> AppState {
        AppState::new(
            TransitData::from_json(NETWORK).unwrap(),
            TransferSearchConfig::default(),
        )
    }

    async fn search(body: &str) -> Result<Json<TransferSearchResponse>, AppError> {
        search_transfer(State(state()), Bytes::from(body.to_string())).await
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    async fn exists(
        pattern: &str,
        stop_position: &str,
        direction: Option<&str>,
    ) -> Result<Json<TransferExistResponse>, AppError> {
        let query = TransferExistQuery {
            direction: direction.map(str::to_string),
        };
        transfer_exists(
            State(state()),
            Path((pattern.to_string(), stop_position.to_string())),
            Query(query),
        )
        .await
    }

    #[tokio::test]
    async fn exists_endpoint() {
        let Json(response) = exists("P2", "0", None).await.unwrap();
        assert!(response.exists);

        let Json(response) = exists("P2", "0", Some("forward")).await.unwrap();
        assert!(response.exists);

        let Json(response) = exists("P2", "0", Some("reverse")).await.unwrap();
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn exists_unknown_pattern_is_not_found() {
        let err = exists("P9", "0", None).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn exists_bad_path_or_query_is_json_bad_request() {
        for (stop_position, direction) in [("x", None), ("-1", None), ("0", Some("sideways"))] {
            let err = exists("P2", stop_position, direction).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest { .. }), "{stop_position}");

            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert!(json["error"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn search_finds_stay_seated_trip() {
        let Json(response) = search(
            r#"{
                "pattern": "P2", "stop_position": 0, "direction": "forward",
                "source_trip": "T1", "source_stop": "B", "source_time": "10:10",
                "transfer_slack_secs": 120
            }"#,
        )
        .await
        .unwrap();

        let boarding = response.boarding.unwrap();
        assert_eq!(boarding.trip, "T2");
        assert_eq!(boarding.stop, "B");
        assert_eq!(boarding.station.as_deref(), Some("STATION_B"));
        assert_eq!(boarding.time, "10:10");
        assert_eq!(boarding.earliest_board_time, "10:12");
        assert_eq!(boarding.constraint, TransferConstraint::StaySeated);
    }

    #[tokio::test]
    async fn search_without_rule_returns_null() {
        let Json(response) = search(
            r#"{
                "pattern": "P2", "stop_position": 1,
                "source_trip": "T1", "source_stop": "B", "source_time": "10:10",
                "earliest_board_time": "10:12"
            }"#,
        )
        .await
        .unwrap();

        assert!(response.boarding.is_none());
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"boarding":null}"#
        );
    }

    #[tokio::test]
    async fn search_bad_requests() {
        let bodies = [
            "not json",
            // Both earliest board time and slack
            r#"{"pattern": "P2", "stop_position": 0, "source_trip": "T1", "source_stop": "B",
                "source_time": "10:10", "earliest_board_time": "10:12",
                "transfer_slack_secs": 60}"#,
            // Neither
            r#"{"pattern": "P2", "stop_position": 0, "source_trip": "T1", "source_stop": "B",
                "source_time": "10:10"}"#,
            r#"{"pattern": "P2", "stop_position": 0, "source_trip": "T1", "source_stop": "B",
                "source_time": "ten past", "transfer_slack_secs": 60}"#,
            r#"{"pattern": "", "stop_position": 0, "source_trip": "T1", "source_stop": "B",
                "source_time": "10:10", "transfer_slack_secs": 60}"#,
            r#"{"pattern": "P2", "stop_position": 0, "source_trip": "T1", "source_stop": "B",
                "source_time": "10:10", "transfer_slack_secs": -5}"#,
        ];

        for body in bodies {
            let err = search(body).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest { .. }), "{body}");
        }
    }

    #[tokio::test]
    async fn search_unknown_trip_is_not_found() {
        let err = search(
            r#"{"pattern": "P2", "stop_position": 0, "source_trip": "T9", "source_stop": "B",
                "source_time": "10:10", "transfer_slack_secs": 60}"#,
        )
        .await
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
