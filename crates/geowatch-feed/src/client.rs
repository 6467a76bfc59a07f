//! HTTP client for the upstream geospatial-event feed.
//!
//! The client owns the fetch boundary described by the dashboard
//! contract: every failure (network, status, decode) is caught here,
//! logged, and surfaced to callers as a boolean; the previous cache
//! snapshot is retained on failure. Individual malformed event records
//! are dropped without discarding the rest of the batch.

use std::sync::Arc;

use chrono::{Duration, Utc};
use geowatch_types::{Category, Event};
use serde::Deserialize;
use tracing::{info, warn};

use crate::cache::EventCache;
use crate::config::FeedConfig;
use crate::error::FeedError;

/// Wire envelope for the feed's events endpoint.
#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    /// Raw event records; decoded individually so one malformed record
    /// cannot poison the batch.
    events: Vec<serde_json::Value>,
}

/// Wire envelope for the feed's categories endpoint.
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<Category>,
}

/// Outcome of [`FeedClient::initialize`]: the two fetches are
/// independent, so partial success is possible and is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    /// Whether the category fetch succeeded.
    pub categories: bool,
    /// Whether the event fetch succeeded.
    pub events: bool,
}

impl InitOutcome {
    /// Whether both fetches succeeded.
    pub const fn all_ok(self) -> bool {
        self.categories && self.events
    }
}

/// Client for the upstream hazard feed.
///
/// Holds the shared [`EventCache`] it populates; all fetches replace
/// their half of the snapshot atomically on success.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    lookback_days: u64,
    cache: Arc<EventCache>,
}

impl FeedClient {
    /// Create a client from configuration, attached to a cache.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying HTTP client cannot
    /// be constructed with the configured timeout.
    pub fn new(config: &FeedConfig, cache: Arc<EventCache>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            lookback_days: config.lookback_days,
            cache,
        })
    }

    /// The configured default lookback window in days.
    pub const fn lookback_days(&self) -> u64 {
        self.lookback_days
    }

    /// Fetch events with dates in `[now - days_lookback, now]` (UTC,
    /// calendar-date granularity), all statuses included.
    ///
    /// On success the cache's event collection and fetch timestamp are
    /// replaced atomically and `true` is returned. On any failure the
    /// error is logged, the previous snapshot is retained, and `false`
    /// is returned. Never panics or raises to the caller.
    pub async fn fetch_events(&self, days_lookback: u64) -> bool {
        match self.try_fetch_events(days_lookback).await {
            Ok(count) => {
                info!(count, days_lookback, "event fetch complete");
                true
            }
            Err(e) => {
                warn!(error = %e, "event fetch failed; keeping previous snapshot");
                false
            }
        }
    }

    /// Fetch the category taxonomy.
    ///
    /// Same boolean contract as [`Self::fetch_events`].
    pub async fn fetch_categories(&self) -> bool {
        match self.try_fetch_categories().await {
            Ok(count) => {
                info!(count, "category fetch complete");
                true
            }
            Err(e) => {
                warn!(error = %e, "category fetch failed; keeping previous snapshot");
                false
            }
        }
    }

    /// Run the initial data load: categories first, then events, using
    /// the configured lookback window. The two steps are independent; a
    /// category failure does not block the event fetch.
    pub async fn initialize(&self) -> InitOutcome {
        info!("starting initial data load");
        let categories = self.fetch_categories().await;
        let events = self.fetch_events(self.lookback_days).await;
        let outcome = InitOutcome { categories, events };
        if outcome.all_ok() {
            info!("initial data load completed successfully");
        } else {
            warn!(
                categories_ok = outcome.categories,
                events_ok = outcome.events,
                "initial data load finished with failures"
            );
        }
        outcome
    }

    async fn try_fetch_events(&self, days_lookback: u64) -> Result<usize, FeedError> {
        let end = Utc::now().date_naive();
        let start = end
            .checked_sub_signed(Duration::days(i64::try_from(days_lookback).unwrap_or(i64::MAX)))
            .unwrap_or(chrono::NaiveDate::MIN);

        let url = format!("{}/events", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("start", start.format("%Y-%m-%d").to_string()),
                ("end", end.format("%Y-%m-%d").to_string()),
                ("status", String::from("all")),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let envelope: EventsEnvelope = serde_json::from_slice(&response.bytes().await?)?;
        let events = decode_events(envelope.events);
        let count = events.len();
        self.cache.replace_events(events, Utc::now()).await;
        Ok(count)
    }

    async fn try_fetch_categories(&self) -> Result<usize, FeedError> {
        let url = format!("{}/categories", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let envelope: CategoriesEnvelope = serde_json::from_slice(&response.bytes().await?)?;
        let count = envelope.categories.len();
        self.cache.replace_categories(envelope.categories).await;
        Ok(count)
    }
}

/// Decode raw event records individually, skipping malformed ones.
///
/// The feed occasionally serves records with missing keys or oddly
/// typed fields; those are logged and dropped so the rest of the batch
/// still lands in the cache.
fn decode_events(raw: Vec<serde_json::Value>) -> Vec<Event> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Event>(value) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping malformed event record from feed");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decode_events_skips_only_the_bad_record() {
        let raw = vec![
            serde_json::json!({
                "id": "EONET_1",
                "title": "Fire A",
                "categories": [{"id": "wildfires", "title": "Wildfires"}],
                "geometry": [{"date": "2024-03-01T00:00:00Z", "coordinates": [1.0, 2.0]}]
            }),
            // Missing required keys entirely.
            serde_json::json!({"id": "EONET_2"}),
            serde_json::json!({
                "id": "EONET_3",
                "title": "Fire B",
                "categories": [{"id": "wildfires", "title": "Wildfires"}],
                "geometry": [{
                    "date": "2024-03-02T00:00:00Z",
                    "coordinates": [3.0, 4.0],
                    "magnitudeValue": "120",
                    "magnitudeUnit": "acres"
                }]
            }),
        ];

        let events = decode_events(raw);
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["EONET_1", "EONET_3"]);
    }

    #[test]
    fn decode_events_empty_batch() {
        assert!(decode_events(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn client_construction_with_defaults() {
        let cache = Arc::new(EventCache::new());
        let client = FeedClient::new(&FeedConfig::default(), cache).unwrap();
        assert_eq!(client.lookback_days(), 365);
    }
}
