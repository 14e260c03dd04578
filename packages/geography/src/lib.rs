#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate handling for hazard events.
//!
//! [`region_for`] buckets a WGS84 point into one of six coarse regions using
//! fixed latitude/longitude thresholds. The buckets are rough: Central
//! America south of 15°N lands in South America and the Middle East lands
//! in Europe. Every regional aggregate is keyed on these exact thresholds.

use disaster_dash_hazard_models::Region;
use thiserror::Error;

/// Latitude above which a point is in the northern bucket.
pub const NORTHERN_LATITUDE: f64 = 15.0;

/// Longitude splitting the Americas from Europe/Africa.
pub const WESTERN_LONGITUDE: f64 = -30.0;

/// Longitude splitting Europe/Africa from Asia/Oceania.
pub const EASTERN_LONGITUDE: f64 = 60.0;

/// Errors that can occur during geography operations.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Latitude is NaN, infinite, or outside `[-90, 90]`.
    #[error("Latitude out of range: {0}")]
    Latitude(f64),

    /// Longitude is NaN, infinite, or outside `[-180, 180]`.
    #[error("Longitude out of range: {0}")]
    Longitude(f64),
}

/// Returns the coarse region for a latitude/longitude pair.
///
/// Latitude exactly 15 is southern. Longitude exactly -30 falls into
/// Europe/Africa and exactly 60 into Asia/Oceania.
#[must_use]
pub fn region_for(latitude: f64, longitude: f64) -> Region {
    let northern = latitude > NORTHERN_LATITUDE;

    if longitude < WESTERN_LONGITUDE {
        if northern {
            Region::NorthAmerica
        } else {
            Region::SouthAmerica
        }
    } else if longitude < EASTERN_LONGITUDE {
        if northern { Region::Europe } else { Region::Africa }
    } else if northern {
        Region::Asia
    } else {
        Region::Oceania
    }
}

/// Checks that a coordinate pair is finite and within WGS84 bounds.
///
/// # Errors
///
/// Returns [`GeoError`] naming the first offending component.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), GeoError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(GeoError::Latitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoError::Longitude(longitude));
    }
    Ok(())
}
