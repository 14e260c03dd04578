//! Time-bounded cache of feed results.
//!
//! Keyed by feed id. An entry is served until it is older than the cache's
//! TTL, after which the next pipeline run refetches the feed. Reload
//! clears the whole cache. Only successful fetches are stored, so a feed
//! that failed is retried on the very next run.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use disaster_dash_source_models::DisasterEvent;

/// Default lifetime of a cached feed result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    events: Vec<DisasterEvent>,
}

/// Per-feed cache of normalized events.
#[derive(Debug, Clone)]
pub struct FeedCache {
    ttl: Duration,
    entries: BTreeMap<String, CacheEntry>,
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl FeedCache {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: BTreeMap::new(),
        }
    }

    /// Returns the configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached events for `feed` if they are still fresh.
    #[must_use]
    pub fn get(&self, feed: &str) -> Option<&[DisasterEvent]> {
        self.get_at(feed, Instant::now())
    }

    /// Like [`FeedCache::get`], evaluated as of `now`.
    #[must_use]
    pub fn get_at(&self, feed: &str, now: Instant) -> Option<&[DisasterEvent]> {
        let entry = self.entries.get(feed)?;
        if now.saturating_duration_since(entry.fetched_at) < self.ttl {
            Some(&entry.events)
        } else {
            None
        }
    }

    /// Stores a successful fetch for `feed`, replacing any previous entry.
    pub fn insert(&mut self, feed: impl Into<String>, events: Vec<DisasterEvent>) {
        self.insert_at(feed, events, Instant::now());
    }

    /// Like [`FeedCache::insert`], stamped with `fetched_at`.
    pub fn insert_at(
        &mut self,
        feed: impl Into<String>,
        events: Vec<DisasterEvent>,
        fetched_at: Instant,
    ) {
        self.entries.insert(feed.into(), CacheEntry { fetched_at, events });
    }

    /// Drops every entry, forcing all feeds to be refetched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
