#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster taxonomy types shared across the disaster-dash workspace.
//!
//! Every feed adapter normalizes its source-specific vocabulary (USGS
//! magnitudes, GDACS alert colours and event codes) into the enums defined
//! here, so downstream scoring and aggregation only ever see these values.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity bucket for a hazard event.
///
/// Ordered `Low < Medium < High` so severity ranges can be expressed with
/// plain comparisons.
///
/// Parsing accepts the canonical names and the GDACS alert colours
/// (`Green`, `Orange`, `Red`). Anything else is rejected; there is no
/// default severity.
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
pub enum Severity {
    /// Minor event, or a GDACS green alert.
    #[strum(to_string = "Low", serialize = "Green")]
    Low,
    /// Moderate event, or a GDACS orange alert.
    #[strum(to_string = "Medium", serialize = "Orange")]
    Medium,
    /// Major event, or a GDACS red alert.
    #[strum(to_string = "High", serialize = "Red")]
    High,
}

impl Severity {
    /// Returns all variants in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Whether an event is still unfolding.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    /// Ongoing or recent (e.g. observed within the last day).
    Active,
    /// Over, or old enough to no longer be considered live.
    Resolved,
}

impl EventStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::Resolved]
    }
}

/// Coarse geographic region an event is attributed to.
///
/// Declaration order is the order regions appear in aggregated output.
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
#[strum(serialize_all = "title_case")]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
}

impl Region {
    /// Returns all variants in output order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NorthAmerica,
            Self::SouthAmerica,
            Self::Europe,
            Self::Asia,
            Self::Africa,
            Self::Oceania,
        ]
    }
}

/// Kind of natural hazard.
///
/// The first five variants are the core dashboard types. `Drought` and
/// `Volcano` only arrive from the multi-hazard feed, and `Other` absorbs
/// any feed code we don't recognise.
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
pub enum DisasterType {
    Earthquake,
    Hurricane,
    Flood,
    Wildfire,
    Tsunami,
    Drought,
    Volcano,
    Other,
}

impl DisasterType {
    /// The core types shown on the dashboard and used for synthetic data.
    #[must_use]
    pub const fn core() -> &'static [Self] {
        &[
            Self::Earthquake,
            Self::Hurricane,
            Self::Flood,
            Self::Wildfire,
            Self::Tsunami,
        ]
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Earthquake,
            Self::Hurricane,
            Self::Flood,
            Self::Wildfire,
            Self::Tsunami,
            Self::Drought,
            Self::Volcano,
            Self::Other,
        ]
    }
}
