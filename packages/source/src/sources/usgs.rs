//! USGS earthquake feed.
//!
//! Uses the USGS real-time summary `GeoJSON` feed.
//! Docs: <https://earthquake.usgs.gov/earthquakes/feed/v1.0/geojson.php>

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use disaster_dash_geography::region_for;
use disaster_dash_hazard_models::{DisasterType, EventStatus, Severity};
use disaster_dash_source_models::{DisasterEvent, FeedDefinition};
use serde::Deserialize;

use crate::http::fetch_features;
use crate::parsing::{PointGeometry, from_epoch_millis, parse_count};
use crate::{DisasterFeed, SourceError};

/// Magnitude at or above which a quake is [`Severity::High`].
pub const HIGH_MAGNITUDE: f64 = 6.0;

/// Magnitude at or above which a quake is [`Severity::Medium`].
pub const MEDIUM_MAGNITUDE: f64 = 4.0;

/// Quakes younger than this are [`EventStatus::Active`].
pub const ACTIVE_WINDOW: TimeDelta = TimeDelta::hours(24);

/// USGS earthquake feed.
pub struct UsgsFeed {
    definition: FeedDefinition,
}

impl UsgsFeed {
    /// Creates a USGS feed for the given definition.
    #[must_use]
    pub const fn new(definition: FeedDefinition) -> Self {
        Self { definition }
    }
}

/// Raw feature shape from the USGS feed.
#[derive(Debug, Deserialize)]
struct UsgsFeature {
    id: String,
    geometry: PointGeometry,
    properties: UsgsProperties,
}

#[derive(Debug, Deserialize)]
struct UsgsProperties {
    mag: f64,
    /// Epoch milliseconds.
    time: i64,
    /// "Did you feel it?" report count.
    #[serde(default)]
    felt: Option<serde_json::Value>,
}

#[async_trait]
impl DisasterFeed for UsgsFeed {
    fn id(&self) -> &str {
        self.definition.id()
    }

    fn name(&self) -> &str {
        self.definition.name()
    }

    async fn fetch_events(
        &self,
        client: &reqwest::Client,
    ) -> Result<Vec<DisasterEvent>, SourceError> {
        let features = fetch_features(client, &self.definition.url).await?;
        normalize(&features, Utc::now())
    }
}

/// Maps a magnitude to a severity bucket.
#[must_use]
pub fn severity_for_magnitude(magnitude: f64) -> Severity {
    if magnitude >= HIGH_MAGNITUDE {
        Severity::High
    } else if magnitude >= MEDIUM_MAGNITUDE {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// A quake is active while it is less than [`ACTIVE_WINDOW`] old.
#[must_use]
pub fn status_for_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> EventStatus {
    if now.signed_duration_since(timestamp) < ACTIVE_WINDOW {
        EventStatus::Active
    } else {
        EventStatus::Resolved
    }
}

/// Normalizes raw USGS features relative to `now`.
///
/// # Errors
///
/// Returns [`SourceError`] if any feature is missing a required field
/// (`id`, coordinates, `mag`, `time`) or has out-of-range coordinates.
pub fn normalize(
    features: &[serde_json::Value],
    now: DateTime<Utc>,
) -> Result<Vec<DisasterEvent>, SourceError> {
    features
        .iter()
        .map(|value| -> Result<DisasterEvent, SourceError> {
            let feature = UsgsFeature::deserialize(value)?;
            let (latitude, longitude) = feature.geometry.lat_lng()?;

            let timestamp = from_epoch_millis(feature.properties.time).ok_or_else(|| {
                SourceError::Malformed {
                    message: format!(
                        "{}: time {} out of range",
                        feature.id, feature.properties.time
                    ),
                }
            })?;

            Ok(DisasterEvent {
                disaster_type: DisasterType::Earthquake,
                latitude,
                longitude,
                location: region_for(latitude, longitude),
                severity: severity_for_magnitude(feature.properties.mag),
                status: status_for_time(timestamp, now),
                affected_population: feature
                    .properties
                    .felt
                    .as_ref()
                    .and_then(parse_count)
                    .unwrap_or(0),
                timestamp,
                event_id: feature.id,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use disaster_dash_hazard_models::Region;
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
    }

    fn feature(
        id: &str,
        mag: f64,
        time: DateTime<Utc>,
        felt: serde_json::Value,
    ) -> serde_json::Value {
        json!({
            "type": "Feature",
            "id": id,
            "geometry": { "type": "Point", "coordinates": [139.7, 35.7, 10.0] },
            "properties": { "mag": mag, "time": time.timestamp_millis(), "felt": felt }
        })
    }

    #[test]
    fn magnitude_thresholds() {
        assert_eq!(severity_for_magnitude(6.0), Severity::High);
        assert_eq!(severity_for_magnitude(7.3), Severity::High);
        assert_eq!(severity_for_magnitude(5.99), Severity::Medium);
        assert_eq!(severity_for_magnitude(4.0), Severity::Medium);
        assert_eq!(severity_for_magnitude(3.99), Severity::Low);
        assert_eq!(severity_for_magnitude(-0.5), Severity::Low);
    }

    #[test]
    fn status_uses_24_hour_window() {
        let now = now();
        assert_eq!(status_for_time(now - TimeDelta::hours(23), now), EventStatus::Active);
        assert_eq!(status_for_time(now - TimeDelta::hours(24), now), EventStatus::Resolved);
        assert_eq!(status_for_time(now - TimeDelta::days(5), now), EventStatus::Resolved);
    }

    #[test]
    fn normalizes_feature() {
        let features = vec![feature("us7000m1", 6.4, now() - TimeDelta::hours(2), json!(152))];
        let events = normalize(&features, now()).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_id, "us7000m1");
        assert_eq!(event.disaster_type, DisasterType::Earthquake);
        assert!((event.latitude - 35.7).abs() < f64::EPSILON);
        assert!((event.longitude - 139.7).abs() < f64::EPSILON);
        assert_eq!(event.location, Region::Asia);
        assert_eq!(event.severity, Severity::High);
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.affected_population, 152);
    }

    #[test]
    fn missing_felt_defaults_to_zero() {
        let mut raw = feature("ci1", 2.1, now() - TimeDelta::days(3), json!(null));
        let events = normalize(std::slice::from_ref(&raw), now()).unwrap();
        assert_eq!(events[0].affected_population, 0);
        assert_eq!(events[0].status, EventStatus::Resolved);

        raw["properties"].as_object_mut().unwrap().remove("felt");
        let events = normalize(&[raw], now()).unwrap();
        assert_eq!(events[0].affected_population, 0);
    }

    #[test]
    fn missing_magnitude_fails_the_payload() {
        let good = feature("a", 4.5, now(), json!(null));
        let mut bad = feature("b", 4.5, now(), json!(null));
        bad["properties"]["mag"] = json!(null);

        assert!(normalize(&[good, bad], now()).is_err());
    }

    #[test]
    fn empty_payload_is_fine() {
        assert!(normalize(&[], now()).unwrap().is_empty());
    }
}
