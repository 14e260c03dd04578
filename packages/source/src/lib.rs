#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard feed adapters and normalization logic.
//!
//! Each feed implements the [`DisasterFeed`] trait to define how its raw
//! `GeoJSON` payload is fetched and mapped to the canonical
//! [`DisasterEvent`] format. Failures never escape a feed: they are logged
//! and reported as [`FeedOutcome::Failed`], which contributes zero rows.

pub mod cache;
pub mod http;
pub mod parsing;
pub mod progress;
pub mod registry;
pub mod sources;
pub mod synthetic;
pub mod type_mapping;

use async_trait::async_trait;
use disaster_dash_geography::GeoError;
use disaster_dash_source_models::{DisasterEvent, FeedOutcome};

/// Errors that can occur while fetching or normalizing a feed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned.
        status: reqwest::StatusCode,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feature carried coordinates outside WGS84 bounds.
    #[error("Invalid coordinates: {0}")]
    Coordinates(#[from] GeoError),

    /// Payload was well-formed JSON but not the shape we expect.
    #[error("Malformed payload: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all hazard feeds must implement.
///
/// Implementors only provide [`DisasterFeed::fetch_events`]; the provided
/// [`DisasterFeed::fetch`] wraps it so callers always get a
/// [`FeedOutcome`] and never an error.
#[async_trait]
pub trait DisasterFeed: Send + Sync {
    /// Returns a unique identifier for this feed (e.g., `"usgs"`).
    fn id(&self) -> &str;

    /// Returns the human-readable name of this feed.
    fn name(&self) -> &str;

    /// Downloads the feed and normalizes every feature.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or any feature cannot
    /// be normalized. A single bad feature fails the whole payload.
    async fn fetch_events(&self, client: &reqwest::Client)
    -> Result<Vec<DisasterEvent>, SourceError>;

    /// Fetches the feed, converting any failure into
    /// [`FeedOutcome::Failed`].
    async fn fetch(&self, client: &reqwest::Client) -> FeedOutcome {
        match self.fetch_events(client).await {
            Ok(events) => {
                log::info!("{}: fetched {} events", self.name(), events.len());
                FeedOutcome::Fetched {
                    feed: self.id().to_string(),
                    events,
                }
            }
            Err(e) => {
                log::warn!("{}: fetch failed, contributing no events: {e}", self.name());
                FeedOutcome::Failed {
                    feed: self.id().to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
