#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk scoring and aggregation over normalized disaster events.
//!
//! Everything here is pure: each function takes a table of events and
//! returns a new table, never mutating its input.

pub mod aggregate;
pub mod filter;
pub mod risk;
pub mod summary;

use disaster_dash_geography::GeoError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// An event reached scoring with coordinates outside WGS84 bounds.
    #[error("Event {event_id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        /// Offending event.
        event_id: String,
        /// Which coordinate was out of range.
        source: GeoError,
    },
}
