//! Handler behavior against live application state.
//!
//! The handlers take their state through an axum Extension, so they can
//! be exercised directly without binding a listener.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use nowcast::SnapshotSet;
use nowcast_api::handlers::health::ready_handler;
use nowcast_api::handlers::point::{
    next_event_handler, series_handler, value_handler, PointQueryParams, ValueQueryParams,
};
use nowcast_api::state::AppState;
use radar_common::{GridIndex, DE1200_EXTENT};
use radolan_parser::RadarFrame;
use test_utils::{code_for_rate, codes_with};

// (51.0°N, 10.0°E) projects to cell (543, 599) on the DE1200 grid
const TARGET_LAT: f64 = 51.0;
const TARGET_LON: f64 = 10.0;

fn de1200_frame(timestamp: DateTime<Utc>, target_rate: f64) -> RadarFrame {
    let cell = GridIndex::new(543, 599);
    let codes = codes_with(DE1200_EXTENT, &[(cell, code_for_rate(target_rate))]);
    RadarFrame::from_codes(timestamp, DE1200_EXTENT, codes).unwrap()
}

fn empty_state() -> Arc<AppState> {
    Arc::new(AppState::new("http://localhost:1/unused".to_string()).unwrap())
}

async fn state_with_frames(frames: Vec<RadarFrame>) -> Arc<AppState> {
    let state = empty_state();
    state
        .service
        .publish(SnapshotSet::from_frames(frames).unwrap())
        .await
        .unwrap();
    state
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_series_endpoint_returns_samples() {
    let base = Utc::now();
    let state = state_with_frames(vec![
        de1200_frame(base, 12.0),
        de1200_frame(base + Duration::minutes(5), 6.0),
    ])
    .await;

    let response = series_handler(
        Extension(state),
        Query(PointQueryParams {
            lat: TARGET_LAT,
            lon: TARGET_LON,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let samples = json["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0]["rate_mm_h"], 12.0);
    assert_eq!(samples[1]["rate_mm_h"], 6.0);
    assert_eq!(json["coordinate"]["latitude"], TARGET_LAT);
}

#[tokio::test]
async fn test_value_endpoint_interpolates_at_explicit_time() {
    let base = Utc::now();
    let state = state_with_frames(vec![
        de1200_frame(base, 0.0),
        de1200_frame(base + Duration::minutes(10), 6.0),
    ])
    .await;

    let response = value_handler(
        Extension(state),
        Query(ValueQueryParams {
            lat: TARGET_LAT,
            lon: TARGET_LON,
            time: Some((base + Duration::minutes(5)).to_rfc3339()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["rate_mm_h"], 3.0);
}

#[tokio::test]
async fn test_value_endpoint_rejects_malformed_time() {
    let base = Utc::now();
    let state = state_with_frames(vec![de1200_frame(base, 0.0)]).await;

    let response = value_handler(
        Extension(state),
        Query(ValueQueryParams {
            lat: TARGET_LAT,
            lon: TARGET_LON,
            time: Some("yesterday-ish".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_next_event_endpoint_reports_upcoming_rain() {
    let base = Utc::now();
    let state = state_with_frames(vec![
        de1200_frame(base, 0.0),
        de1200_frame(base + Duration::minutes(5), 6.0),
        de1200_frame(base + Duration::minutes(10), 2.4),
    ])
    .await;

    let response = next_event_handler(
        Extension(state),
        Query(PointQueryParams {
            lat: TARGET_LAT,
            lon: TARGET_LON,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let start: DateTime<Utc> = serde_json::from_value(json["start"].clone()).unwrap();
    assert_eq!(start, base + Duration::minutes(5));
    assert_eq!(json["end"], serde_json::Value::Null);
    assert_eq!(json["peak_mm_h"], 6.0);
    assert_eq!(json["expected_within_15m"], true);
}

#[tokio::test]
async fn test_out_of_domain_coordinate_is_not_found() {
    let base = Utc::now();
    let state = state_with_frames(vec![de1200_frame(base, 0.0)]).await;

    let response = series_handler(
        Extension(state),
        Query(PointQueryParams {
            lat: 40.7,
            lon: -74.0,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("outside"));
}

#[tokio::test]
async fn test_query_before_first_refresh_is_unavailable() {
    let state = empty_state();

    let response = series_handler(
        Extension(state),
        Query(PointQueryParams {
            lat: TARGET_LAT,
            lon: TARGET_LON,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_readiness_follows_published_state() {
    let state = empty_state();

    let (status, Json(body)) = ready_handler(Extension(state.clone())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body.ready);

    let base = Utc::now();
    state
        .service
        .publish(SnapshotSet::from_frames(vec![de1200_frame(base, 0.0)]).unwrap())
        .await
        .unwrap();

    let (status, Json(body)) = ready_handler(Extension(state)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.ready);
    assert_eq!(body.frames, 1);
}
