//! Point query handlers.
//!
//! All three endpoints take a coordinate in plain `lat`/`lon` query
//! parameters. A coordinate outside the composite grid maps to 404, a
//! query before the first successful refresh to 503.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use nowcast::{QueryError, RainEvent};
use radar_common::GeoCoordinate;

use crate::state::AppState;

/// Query parameters shared by the point endpoints.
#[derive(Debug, Deserialize)]
pub struct PointQueryParams {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Query parameters for the value endpoint.
#[derive(Debug, Deserialize)]
pub struct ValueQueryParams {
    pub lat: f64,
    pub lon: f64,
    /// RFC 3339 instant; defaults to the query time.
    pub time: Option<String>,
}

#[derive(Serialize)]
pub struct SeriesSample {
    pub timestamp: DateTime<Utc>,
    pub rate_mm_h: f64,
}

#[derive(Serialize)]
pub struct SeriesResponse {
    pub coordinate: GeoCoordinate,
    pub samples: Vec<SeriesSample>,
}

#[derive(Serialize)]
pub struct ValueResponse {
    pub coordinate: GeoCoordinate,
    pub timestamp: DateTime<Utc>,
    pub rate_mm_h: f64,
}

#[derive(Serialize)]
pub struct RainEventResponse {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub peak_mm_h: f64,
    pub total_mm: f64,
    pub length_minutes: Option<i64>,
    pub expected_within_15m: bool,
    pub expected_within_30m: bool,
    pub expected_within_60m: bool,
}

impl RainEventResponse {
    /// Shape a rain event as seen from `now`: an event already underway
    /// reports `now` as its start, never a time in the past. The length
    /// still covers the whole event.
    fn from_event(event: RainEvent, now: DateTime<Utc>) -> Self {
        Self {
            start: event.start.map(|start| start.max(now)),
            end: event.end,
            peak_mm_h: event.peak_mm_h,
            total_mm: event.total_mm,
            length_minutes: event.length().map(|length| length.num_minutes()),
            expected_within_15m: event.starts_within(now, Duration::minutes(15)),
            expected_within_30m: event.starts_within(now, Duration::minutes(30)),
            expected_within_60m: event.starts_within(now, Duration::minutes(60)),
        }
    }
}

/// GET /v1/series - full precipitation series at a coordinate
pub async fn series_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<PointQueryParams>,
) -> Response {
    let coordinate = GeoCoordinate::new(params.lat, params.lon);

    match state.service.precipitation_series(coordinate).await {
        Ok(series) => {
            let samples = series
                .samples()
                .iter()
                .map(|sample| SeriesSample {
                    timestamp: sample.timestamp,
                    rate_mm_h: sample.rate_mm_h,
                })
                .collect();
            json_response(StatusCode::OK, &SeriesResponse { coordinate, samples })
        }
        Err(e) => query_error_response(e),
    }
}

/// GET /v1/value - interpolated rate at a coordinate and instant
pub async fn value_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ValueQueryParams>,
) -> Response {
    let coordinate = GeoCoordinate::new(params.lat, params.lon);

    let timestamp = match &params.time {
        None => Utc::now(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid time parameter: {}", e),
                );
            }
        },
    };

    match state.service.value_at(coordinate, timestamp).await {
        Ok(rate_mm_h) => json_response(
            StatusCode::OK,
            &ValueResponse {
                coordinate,
                timestamp,
                rate_mm_h,
            },
        ),
        Err(e) => query_error_response(e),
    }
}

/// GET /v1/next-event - the next rain event at a coordinate
pub async fn next_event_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<PointQueryParams>,
) -> Response {
    let coordinate = GeoCoordinate::new(params.lat, params.lon);

    match state.service.next_rain_event(coordinate).await {
        Ok(event) => json_response(
            StatusCode::OK,
            &RainEventResponse::from_event(event, Utc::now()),
        ),
        Err(e) => query_error_response(e),
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn query_error_response(err: QueryError) -> Response {
    let status = match err {
        QueryError::OutOfDomain(_) => StatusCode::NOT_FOUND,
        QueryError::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    json_response(status, &ErrorBody { error: message })
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let json = serde_json::to_string(body).unwrap_or_default();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(json.into())
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 25, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_event_response_clamps_past_start_to_now() {
        let event = RainEvent {
            start: Some(t0()),
            end: Some(t0() + Duration::minutes(30)),
            peak_mm_h: 6.0,
            total_mm: 1.5,
        };

        let now = t0() + Duration::minutes(10);
        let response = RainEventResponse::from_event(event, now);

        assert_eq!(response.start, Some(now));
        assert_eq!(response.length_minutes, Some(30));
        assert!(response.expected_within_15m);
    }

    #[test]
    fn test_event_response_horizon_flags() {
        let event = RainEvent {
            start: Some(t0() + Duration::minutes(20)),
            end: None,
            peak_mm_h: 2.4,
            total_mm: 0.4,
        };

        let response = RainEventResponse::from_event(event, t0());

        assert!(!response.expected_within_15m);
        assert!(response.expected_within_30m);
        assert!(response.expected_within_60m);
        assert_eq!(response.length_minutes, None);
    }

    #[test]
    fn test_event_response_without_rain() {
        let event = RainEvent {
            start: None,
            end: None,
            peak_mm_h: 0.0,
            total_mm: 0.0,
        };

        let response = RainEventResponse::from_event(event, t0());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["start"], serde_json::Value::Null);
        assert_eq!(json["length_minutes"], serde_json::Value::Null);
        assert_eq!(json["expected_within_60m"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_query_error_statuses() {
        let out_of_domain = QueryError::OutOfDomain(nowcast::OutOfDomainError {
            x_km: -4881.0,
            y_km: 2000.0,
        });
        assert_eq!(
            query_error_response(out_of_domain).status(),
            StatusCode::NOT_FOUND
        );

        assert_eq!(
            query_error_response(QueryError::DataUnavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
