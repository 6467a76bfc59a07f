//! Read-copy-update cache for the last fetched feed snapshot.
//!
//! The cache is the only shared mutable resource in the workspace. A
//! write builds a fresh [`FeedSnapshot`] and swaps it in under the write
//! lock; readers clone the [`Arc`] under a read lock and then work
//! entirely on their immutable snapshot. A reader can therefore never
//! observe a half-written collection, and a slow aggregation never
//! blocks a fetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use geowatch_types::{Category, Event};
use tokio::sync::RwLock;

/// One immutable snapshot of the cached feed state.
///
/// Events and categories are separately reference-counted because the
/// two fetches replace them independently: an event fetch carries the
/// category list over unchanged, and vice versa.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// The last successfully fetched event collection.
    pub events: Arc<Vec<Event>>,
    /// The last successfully fetched category taxonomy.
    pub categories: Arc<Vec<Category>>,
    /// When the event collection was last replaced. `None` until the
    /// first successful event fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self {
            events: Arc::new(Vec::new()),
            categories: Arc::new(Vec::new()),
            fetched_at: None,
        }
    }
}

/// The shared event cache.
///
/// Created empty at startup; populated by the initial fetch; replaced
/// wholesale by later fetches. There is no expiry and no retry: a failed
/// fetch simply leaves the previous snapshot in place.
#[derive(Debug, Default)]
pub struct EventCache {
    inner: RwLock<Arc<FeedSnapshot>>,
}

impl EventCache {
    /// Create an empty cache (uninitialized state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an immutable reference to the current snapshot.
    pub async fn snapshot(&self) -> Arc<FeedSnapshot> {
        Arc::clone(&*self.inner.read().await)
    }

    /// Atomically replace the event collection and fetch timestamp,
    /// carrying the category list over from the current snapshot.
    pub async fn replace_events(&self, events: Vec<Event>, fetched_at: DateTime<Utc>) {
        let mut guard = self.inner.write().await;
        let next = FeedSnapshot {
            events: Arc::new(events),
            categories: Arc::clone(&guard.categories),
            fetched_at: Some(fetched_at),
        };
        *guard = Arc::new(next);
    }

    /// Atomically replace the category taxonomy, carrying the event
    /// collection and fetch timestamp over from the current snapshot.
    pub async fn replace_categories(&self, categories: Vec<Category>) {
        let mut guard = self.inner.write().await;
        let next = FeedSnapshot {
            events: Arc::clone(&guard.events),
            categories: Arc::new(categories),
            fetched_at: guard.fetched_at,
        };
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geowatch_types::{CategoryRef, Geometry};

    fn sample_event(id: &str) -> Event {
        Event {
            id: String::from(id),
            title: format!("Event {id}"),
            description: None,
            categories: vec![CategoryRef {
                id: String::from("wildfires"),
                title: String::from("Wildfires"),
            }],
            geometry: vec![Geometry {
                date: String::from("2024-03-01T00:00:00Z"),
                coordinates: [0.0, 0.0],
                magnitude_value: None,
                magnitude_unit: None,
            }],
            magnitude_value: None,
            magnitude_unit: None,
        }
    }

    #[tokio::test]
    async fn starts_empty_and_uninitialized() {
        let cache = EventCache::new();
        let snapshot = cache.snapshot().await;
        assert!(snapshot.events.is_empty());
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.fetched_at, None);
    }

    #[tokio::test]
    async fn event_replacement_preserves_categories() {
        let cache = EventCache::new();
        cache
            .replace_categories(vec![Category {
                id: String::from("wildfires"),
                title: String::from("Wildfires"),
            }])
            .await;

        let fetched_at = Utc::now();
        cache
            .replace_events(vec![sample_event("a")], fetched_at)
            .await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.fetched_at, Some(fetched_at));
    }

    #[tokio::test]
    async fn category_replacement_preserves_events_and_timestamp() {
        let cache = EventCache::new();
        let fetched_at = Utc::now();
        cache
            .replace_events(vec![sample_event("a")], fetched_at)
            .await;
        cache.replace_categories(Vec::new()).await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.events.len(), 1);
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.fetched_at, Some(fetched_at));
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_a_replace() {
        let cache = EventCache::new();
        cache
            .replace_events(vec![sample_event("old")], Utc::now())
            .await;

        let held = cache.snapshot().await;
        cache
            .replace_events(vec![sample_event("new1"), sample_event("new2")], Utc::now())
            .await;

        // The held snapshot is unchanged; a fresh read sees the new one.
        assert_eq!(held.events.len(), 1);
        assert_eq!(held.events.first().map(|e| e.id.as_str()), Some("old"));
        let fresh = cache.snapshot().await;
        assert_eq!(fresh.events.len(), 2);
    }
}
