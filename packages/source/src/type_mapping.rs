//! Hazard type mapping utilities.
//!
//! Maps feed-specific event type strings to the canonical [`DisasterType`]
//! taxonomy. GDACS uses two-letter codes (`EQ`, `TC`, ...); other feeds
//! and hand-built tables use full names.

use disaster_dash_hazard_models::DisasterType;

/// Maps a raw event type string from any feed to the canonical type.
///
/// Case-insensitive. Returns [`DisasterType::Other`] when no mapping can
/// be determined.
#[must_use]
pub fn map_event_type(raw: &str) -> DisasterType {
    let lower = raw.trim().to_lowercase();

    match lower.as_str() {
        "eq" | "earthquake" => DisasterType::Earthquake,
        // GDACS reports all tropical cyclones as TC
        "tc" | "hurricane" | "cyclone" | "typhoon" | "tropical cyclone" => DisasterType::Hurricane,
        "fl" | "flood" => DisasterType::Flood,
        "wf" | "wildfire" | "forest fire" => DisasterType::Wildfire,
        "ts" | "tsunami" => DisasterType::Tsunami,
        "dr" | "drought" => DisasterType::Drought,
        "vo" | "volcano" | "volcanic eruption" => DisasterType::Volcano,
        _ => DisasterType::Other,
    }
}
