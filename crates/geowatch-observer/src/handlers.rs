//! REST API endpoint handlers for the dashboard server.
//!
//! All handlers read an immutable snapshot from the shared
//! [`EventCache`](geowatch_feed::EventCache) via [`AppState`] and run
//! the pure aggregation functions from `geowatch-core` against it.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/events` | Filtered event list |
//! | `GET` | `/api/categories` | Cached category taxonomy |
//! | `GET` | `/api/summary` | Summary statistics |
//! | `GET` | `/api/trends` | Trend analysis |
//! | `GET` | `/api/analysis/data` | Multi-facet analysis report |
//! | `POST` | `/api/refresh` | Manual feed refresh |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use geowatch_core::{
    EventFilter, TrendPeriod, analysis_report, filter_events, summary_statistics, trend_analysis,
};

use crate::error::ObserverError;
use crate::state::AppState;

/// Default lookback window for the analysis report, in days.
const DEFAULT_ANALYSIS_PERIOD_DAYS: u64 = 365;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/events` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Inclusive lower calendar-date bound (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Inclusive upper calendar-date bound (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Category id the primary category must match.
    pub event_type: Option<String>,
    /// Inclusive lower magnitude bound.
    pub min_magnitude: Option<String>,
    /// Inclusive upper magnitude bound.
    pub max_magnitude: Option<String>,
}

/// Query parameters for the `GET /api/trends` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct TrendsQuery {
    /// Restrict the analysis to one category id.
    pub category: Option<String>,
    /// Bucket granularity: `monthly` (default), `weekly`, or `daily`.
    pub period: Option<String>,
}

/// Query parameters for the `GET /api/analysis/data` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct AnalysisQuery {
    /// Lookback window in days (default 365).
    pub period: Option<u64>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing cache status and API links.
///
/// This is the placeholder dashboard; the full frontend consumes the
/// JSON endpoints below.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.cache.snapshot().await;
    let event_count = snapshot.events.len();
    let category_count = snapshot.categories.len();
    let fetched_at = snapshot
        .fetched_at
        .map_or_else(|| String::from("never"), |t| t.to_rfc3339());

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>GeoWatch</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>GeoWatch</h1>
    <p class="subtitle">Natural-hazard event dashboard</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Events</div>
            <div class="value">{event_count}</div>
        </div>
        <div class="metric">
            <div class="label">Categories</div>
            <div class="value">{category_count}</div>
        </div>
        <div class="metric">
            <div class="label">Last fetch</div>
            <div class="value">{fetched_at}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/events">/api/events</a> -- Filtered events (?start_date, ?end_date, ?event_type, ?min_magnitude, ?max_magnitude)</li>
        <li><a href="/api/categories">/api/categories</a> -- Category taxonomy</li>
        <li><a href="/api/summary">/api/summary</a> -- Summary statistics</li>
        <li><a href="/api/trends">/api/trends</a> -- Trend analysis (?category, ?period=monthly|weekly|daily)</li>
        <li><a href="/api/analysis/data">/api/analysis/data</a> -- Analysis report (?period=days)</li>
    </ul>
    <p>POST <a href="/api/refresh">/api/refresh</a> -- re-fetch the upstream feed</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/events -- filtered event list
// ---------------------------------------------------------------------------

/// Return the cached events matching the supplied filter criteria.
///
/// Events without resolvable magnitude always pass the magnitude
/// bounds; an empty or uninitialized cache yields an empty list, not an
/// error.
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    let filter = build_filter(&params)?;
    let snapshot = state.cache.snapshot().await;
    let events = filter_events(&snapshot.events, &filter);

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}

/// Translate the raw query parameters into filter criteria.
fn build_filter(params: &EventsQuery) -> Result<EventFilter, ObserverError> {
    let mut filter = EventFilter::new();
    if let Some(start) = &params.start_date {
        filter = filter.with_start_date(start.clone());
    }
    if let Some(end) = &params.end_date {
        filter = filter.with_end_date(end.clone());
    }
    if let Some(category) = &params.event_type {
        filter = filter.with_category(category.clone());
    }
    if let Some(min) = parse_magnitude("min_magnitude", params.min_magnitude.as_deref())? {
        filter = filter.with_min_magnitude(min);
    }
    if let Some(max) = parse_magnitude("max_magnitude", params.max_magnitude.as_deref())? {
        filter = filter.with_max_magnitude(max);
    }
    Ok(filter)
}

/// Parse an optional magnitude query parameter.
fn parse_magnitude(name: &str, raw: Option<&str>) -> Result<Option<f64>, ObserverError> {
    raw.map(|s| {
        s.parse::<f64>()
            .map_err(|e| ObserverError::InvalidQuery(format!("{name}: {e}")))
    })
    .transpose()
}

// ---------------------------------------------------------------------------
// GET /api/categories -- cached category taxonomy
// ---------------------------------------------------------------------------

/// Return the cached category list (empty when uninitialized).
pub async fn get_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.cache.snapshot().await;
    Json(serde_json::json!({
        "categories": *snapshot.categories,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/summary -- summary statistics
// ---------------------------------------------------------------------------

/// Return summary statistics over the full (unfiltered) cache.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.cache.snapshot().await;
    Json(summary_statistics(&snapshot.events))
}

// ---------------------------------------------------------------------------
// GET /api/trends -- trend analysis
// ---------------------------------------------------------------------------

/// Return the event-frequency trend analysis.
///
/// # Query Parameters
///
/// - `category`: restrict to one category id.
/// - `period`: `monthly` (default) | `weekly` | `daily`; anything else
///   is a 400.
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendsQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    let period = match params.period.as_deref() {
        None => TrendPeriod::default(),
        Some(raw) => raw
            .parse::<TrendPeriod>()
            .map_err(|e| ObserverError::InvalidQuery(e.to_string()))?,
    };

    let snapshot = state.cache.snapshot().await;
    let analysis = trend_analysis(&snapshot.events, params.category.as_deref(), period);
    Ok(Json(analysis))
}

// ---------------------------------------------------------------------------
// GET /api/analysis/data -- multi-facet analysis report
// ---------------------------------------------------------------------------

/// Return the analysis report for the lookback window.
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisQuery>,
) -> impl IntoResponse {
    let period_days = params.period.unwrap_or(DEFAULT_ANALYSIS_PERIOD_DAYS);
    let snapshot = state.cache.snapshot().await;
    let report = analysis_report(&snapshot.events, period_days, Utc::now().date_naive());
    Json(report)
}

// ---------------------------------------------------------------------------
// POST /api/refresh -- manual feed refresh
// ---------------------------------------------------------------------------

/// Re-fetch categories and events from the upstream feed.
///
/// Refresh is manual by design: there is no scheduled re-fetch. Each
/// fetch reports its own boolean; a failed fetch retains the previous
/// snapshot.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let Some(client) = &state.client else {
        return Err(ObserverError::Internal(String::from(
            "no upstream feed client attached",
        )));
    };

    let categories = client.fetch_categories().await;
    let events = client.fetch_events(client.lookback_days()).await;

    Ok(Json(serde_json::json!({
        "categories": categories,
        "events": events,
    })))
}
