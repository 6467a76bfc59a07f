//! Integration tests for the dashboard API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, against a cache populated with fixture
//! events. This validates handler logic and routing without any live
//! upstream connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Days, Utc};
use geowatch_feed::EventCache;
use geowatch_observer::router::build_router;
use geowatch_observer::state::AppState;
use geowatch_types::{Category, CategoryRef, Event, Geometry, MagnitudeScalar};
use serde_json::Value;
use tower::ServiceExt;

/// Calendar date `days` days before today (UTC), as `YYYY-MM-DD`.
fn days_ago(days: u64) -> String {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

fn fixture_event(
    id: &str,
    category_id: &str,
    category_title: &str,
    date: &str,
    latitude: f64,
    magnitude: Option<f64>,
) -> Event {
    Event {
        id: String::from(id),
        title: format!("Event {id}"),
        description: None,
        categories: vec![CategoryRef {
            id: String::from(category_id),
            title: String::from(category_title),
        }],
        geometry: vec![Geometry {
            date: format!("{date}T12:00:00Z"),
            coordinates: [0.0, latitude],
            magnitude_value: magnitude.map(MagnitudeScalar::Number),
            magnitude_unit: magnitude.map(|_| String::from("kts")),
        }],
        magnitude_value: None,
        magnitude_unit: None,
    }
}

/// State over a cache holding the two-event reference scenario:
/// E1 (Wildfires, magnitude 2.0, lat 10) and E2 (Earthquakes, no
/// magnitude, lat -40), both dated within the last week.
async fn make_test_state() -> Arc<AppState> {
    let cache = Arc::new(EventCache::new());

    cache
        .replace_events(
            vec![
                fixture_event("E1", "wildfires", "Wildfires", &days_ago(5), 10.0, Some(2.0)),
                fixture_event("E2", "earthquakes", "Earthquakes", &days_ago(1), -40.0, None),
            ],
            Utc::now(),
        )
        .await;
    cache
        .replace_categories(vec![
            Category {
                id: String::from("wildfires"),
                title: String::from("Wildfires"),
            },
            Category {
                id: String::from("earthquakes"),
                title: String::from("Earthquakes"),
            },
        ])
        .await;

    Arc::new(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_json(path: &str) -> (StatusCode, Value) {
    let state = make_test_state().await;
    let router = build_router(state);
    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let json = body_to_json(response.into_body()).await;
    (status, json)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_list_events_unfiltered() {
    let (status, json) = get_json("/api/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["events"][0]["id"], "E1");
    assert_eq!(json["events"][1]["id"], "E2");
}

#[tokio::test]
async fn test_magnitude_filter_keeps_magnitude_less_events() {
    let (status, json) = get_json("/api/events?min_magnitude=1").await;
    assert_eq!(status, StatusCode::OK);
    // E1 passes on magnitude; E2 has none and passes unconditionally.
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn test_magnitude_filter_excludes_out_of_range() {
    let (status, json) = get_json("/api/events?min_magnitude=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["events"][0]["id"], "E2");
}

#[tokio::test]
async fn test_category_filter() {
    let (status, json) = get_json("/api/events?event_type=wildfires").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["events"][0]["id"], "E1");
}

#[tokio::test]
async fn test_invalid_magnitude_is_bad_request() {
    let (status, json) = get_json("/api/events?min_magnitude=strong").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("min_magnitude"));
}

#[tokio::test]
async fn test_get_categories() {
    let (status, json) = get_json("/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categories"].as_array().unwrap().len(), 2);
    assert_eq!(json["categories"][0]["id"], "wildfires");
}

#[tokio::test]
async fn test_get_categories_empty_when_uninitialized() {
    let state = Arc::new(AppState::new(Arc::new(EventCache::new())));
    let router = build_router(state);
    let response = router
        .oneshot(Request::get("/api/categories").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["categories"], serde_json::json!([]));
}

#[tokio::test]
async fn test_summary_statistics() {
    let (status, json) = get_json("/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_count"], 2);
    // E1 (2.0) is medium; E2 has no magnitude and defaults to low.
    assert_eq!(json["magnitudes"]["low"], 1);
    assert_eq!(json["magnitudes"]["medium"], 1);
    assert_eq!(json["magnitudes"]["high"], 0);
    assert_eq!(json["categories"]["Wildfires"], 1);
    assert_eq!(json["categories"]["Earthquakes"], 1);
}

#[tokio::test]
async fn test_trends_default_period() {
    let (status, json) = get_json("/api/trends").await;
    assert_eq!(status, StatusCode::OK);
    let total: u64 = json["counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_trends_with_category_filter() {
    let (status, json) = get_json("/api/trends?category=wildfires&period=daily").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["counts"], serde_json::json!([1]));
    assert_eq!(json["periods"][0], days_ago(5));
}

#[tokio::test]
async fn test_trends_unknown_period_is_bad_request() {
    let (status, json) = get_json("/api/trends?period=hourly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("hourly"));
}

#[tokio::test]
async fn test_analysis_report_geographic_facet() {
    let (status, json) = get_json("/api/analysis/data?period=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["geographic"]["Tropics (North)"], 1);
    assert_eq!(json["geographic"]["Southern Hemisphere"], 1);
    // E1 resolves a magnitude and is a wildfire; E2 has no magnitude
    // and is excluded from the severity lists.
    assert_eq!(json["severity"]["wildfires"].as_array().unwrap().len(), 1);
    assert_eq!(json["severity"]["earthquakes"], serde_json::json!([]));
    assert_eq!(json["weekday"]["labels"][0], "Monday");
}

#[tokio::test]
async fn test_refresh_without_client_is_internal_error() {
    let state = make_test_state().await;
    let router = build_router(state);
    let response = router
        .oneshot(
            Request::post("/api/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let state = make_test_state().await;
    let router = build_router(state);
    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
