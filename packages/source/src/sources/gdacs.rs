//! GDACS multi-hazard alert feed.
//!
//! The Global Disaster Alert and Coordination System publishes current
//! earthquakes, cyclones, floods, fires, droughts, and eruptions as a
//! single `GeoJSON` event list with a colour-coded alert level.

use std::str::FromStr as _;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use disaster_dash_geography::region_for;
use disaster_dash_hazard_models::{EventStatus, Region, Severity};
use disaster_dash_source_models::{DisasterEvent, FeedDefinition};
use serde::Deserialize;

use crate::http::fetch_features;
use crate::parsing::{PointGeometry, capitalize, parse_count, parse_feed_date};
use crate::type_mapping::map_event_type;
use crate::{DisasterFeed, SourceError};

/// GDACS multi-hazard feed.
pub struct GdacsFeed {
    definition: FeedDefinition,
}

impl GdacsFeed {
    /// Creates a GDACS feed for the given definition.
    #[must_use]
    pub const fn new(definition: FeedDefinition) -> Self {
        Self { definition }
    }
}

/// Raw feature shape from the GDACS event list.
#[derive(Debug, Deserialize)]
struct GdacsFeature {
    geometry: PointGeometry,
    properties: GdacsProperties,
}

#[derive(Debug, Deserialize)]
struct GdacsProperties {
    /// Numeric in practice, but only ever used as an opaque id.
    eventid: serde_json::Value,
    eventtype: String,
    alertlevel: String,
    alertscore: f64,
    #[serde(default)]
    population: Option<serde_json::Value>,
    fromdate: String,
    /// Region label, when the payload carries one.
    #[serde(default)]
    location: Option<String>,
}

#[async_trait]
impl DisasterFeed for GdacsFeed {
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
        normalize(&features)
    }
}

/// Maps a GDACS alert level to a severity.
///
/// The level is capitalized first, then parsed as either a canonical
/// severity name or a GDACS alert colour.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] for any other level.
pub fn severity_for_alert(alert_level: &str) -> Result<Severity, SourceError> {
    let level = capitalize(alert_level.trim());
    Severity::from_str(&level).map_err(|_| SourceError::Malformed {
        message: format!("unknown alert level {alert_level:?}"),
    })
}

/// An alert is active while its score is positive.
#[must_use]
pub fn status_for_alert_score(alert_score: f64) -> EventStatus {
    if alert_score > 0.0 {
        EventStatus::Active
    } else {
        EventStatus::Resolved
    }
}

/// Normalizes raw GDACS features.
///
/// # Errors
///
/// Returns [`SourceError`] if any feature is missing a required field, has
/// an unparseable `fromdate`, an unknown alert level, or out-of-range
/// coordinates.
pub fn normalize(features: &[serde_json::Value]) -> Result<Vec<DisasterEvent>, SourceError> {
    features
        .iter()
        .map(|value| -> Result<DisasterEvent, SourceError> {
            let feature = GdacsFeature::deserialize(value)?;
            let props = feature.properties;
            let (latitude, longitude) = feature.geometry.lat_lng()?;

            let event_id = match props.eventid {
                serde_json::Value::String(id) => id,
                other => other.to_string(),
            };

            let timestamp: DateTime<Utc> =
                parse_feed_date(&props.fromdate).ok_or_else(|| SourceError::Malformed {
                    message: format!("{event_id}: unparseable fromdate {:?}", props.fromdate),
                })?;

            let location = props
                .location
                .as_deref()
                .and_then(|label| Region::from_str(label).ok())
                .unwrap_or_else(|| region_for(latitude, longitude));

            Ok(DisasterEvent {
                disaster_type: map_event_type(&props.eventtype),
                latitude,
                longitude,
                location,
                severity: severity_for_alert(&props.alertlevel)?,
                status: status_for_alert_score(props.alertscore),
                affected_population: props.population.as_ref().and_then(parse_count).unwrap_or(0),
                timestamp,
                event_id,
            })
        })
        .collect()
}
