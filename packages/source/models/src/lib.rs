#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feed configuration types and the canonical normalized event format.
//!
//! Every hazard feed (USGS, GDACS, the synthetic fallback) produces
//! [`DisasterEvent`] records built from the shared taxonomy in
//! [`disaster_dash_hazard_models`].

use chrono::{DateTime, Utc};
use disaster_dash_hazard_models::{DisasterType, EventStatus, Region, Severity};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The wire format a feed speaks, which selects the adapter used to
/// normalize it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedKind {
    /// USGS earthquake summary `GeoJSON`.
    UsgsGeojson,
    /// GDACS multi-hazard event list `GeoJSON`.
    GdacsGeojson,
}

/// A hazard feed definition, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDefinition {
    /// Unique feed identifier (e.g., `"usgs"`). Also the cache key.
    pub id: String,
    /// Human-readable name (e.g., "USGS Earthquakes (past week)").
    pub name: String,
    /// Endpoint returning a `GeoJSON` `FeatureCollection`.
    pub url: String,
    /// Which adapter parses this feed.
    pub kind: FeedKind,
}

impl FeedDefinition {
    /// Returns the feed identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable feed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A hazard event normalized to the canonical schema.
///
/// All fields are always populated; adapters backfill anything the source
/// omits (population defaults to 0, region is derived from coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterEvent {
    /// Identifier from the source feed, or a sequence number for synthetic
    /// events. Not guaranteed unique across feeds.
    pub event_id: String,
    /// Mapped hazard type.
    pub disaster_type: DisasterType,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Coarse region.
    pub location: Region,
    /// Severity bucket.
    pub severity: Severity,
    /// Whether the event is still active.
    pub status: EventStatus,
    /// Estimated number of people affected.
    pub affected_population: u64,
    /// When the event was observed or recorded.
    pub timestamp: DateTime<Utc>,
}

/// Result of polling a single feed.
///
/// A feed that answered with zero events is distinguishable from one that
/// could not be reached, even though both contribute no rows downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    /// The feed answered and its payload normalized cleanly.
    Fetched {
        /// Feed identifier.
        feed: String,
        /// Normalized events, possibly empty.
        events: Vec<DisasterEvent>,
    },
    /// The request, payload, or normalization failed.
    Failed {
        /// Feed identifier.
        feed: String,
        /// Description of what went wrong.
        reason: String,
    },
}

impl FeedOutcome {
    /// Returns the identifier of the feed this outcome belongs to.
    #[must_use]
    pub fn feed(&self) -> &str {
        match self {
            Self::Fetched { feed, .. } | Self::Failed { feed, .. } => feed,
        }
    }

    /// Returns `true` if the feed was fetched successfully.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }

    /// Number of events carried by this outcome (0 for failures).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Fetched { events, .. } => events.len(),
            Self::Failed { .. } => 0,
        }
    }

    /// Returns `true` if this outcome contributes no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the outcome, degrading a failure to an empty event list.
    #[must_use]
    pub fn into_events(self) -> Vec<DisasterEvent> {
        match self {
            Self::Fetched { events, .. } => events,
            Self::Failed { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn sample_event() -> DisasterEvent {
        DisasterEvent {
            event_id: "us7000abcd".to_string(),
            disaster_type: DisasterType::Earthquake,
            latitude: 35.0,
            longitude: 139.0,
            location: Region::Asia,
            severity: Severity::Medium,
            status: EventStatus::Resolved,
            affected_population: 12,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn failed_outcome_degrades_to_no_events() {
        let outcome = FeedOutcome::Failed {
            feed: "usgs".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(!outcome.is_fetched());
        assert!(outcome.is_empty());
        assert_eq!(outcome.feed(), "usgs");
        assert!(outcome.into_events().is_empty());
    }

    #[test]
    fn fetched_outcome_keeps_events() {
        let outcome = FeedOutcome::Fetched {
            feed: "usgs".to_string(),
            events: vec![sample_event()],
        };
        assert!(outcome.is_fetched());
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.into_events(), vec![sample_event()]);
    }

    #[test]
    fn event_serializes_with_display_vocabulary() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["location"], "Asia");
        assert_eq!(json["severity"], "Medium");
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["disaster_type"], "Earthquake");
    }

    #[test]
    fn feed_kind_parses_snake_case() {
        assert_eq!("gdacs_geojson".parse::<FeedKind>().unwrap(), FeedKind::GdacsGeojson);
    }
}
