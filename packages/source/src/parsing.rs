//! Shared parsing utilities for feed adapters.
//!
//! Date, coordinate, and count parsing used by more than one feed.

use chrono::{DateTime, NaiveDateTime, Utc};
use disaster_dash_geography::validate_coordinates;
use serde::Deserialize;

use crate::SourceError;

/// A `GeoJSON` geometry. Only the coordinate array is read.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude]`, optionally followed by depth/elevation.
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    /// Returns `(latitude, longitude)` after bounds checking.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Malformed`] if fewer than two coordinates are
    /// present, or [`SourceError::Coordinates`] if they are out of range.
    pub fn lat_lng(&self) -> Result<(f64, f64), SourceError> {
        let &[longitude, latitude, ..] = self.coordinates.as_slice() else {
            return Err(SourceError::Malformed {
                message: format!(
                    "expected [lon, lat] coordinates, got {} values",
                    self.coordinates.len()
                ),
            });
        };
        validate_coordinates(latitude, longitude)?;
        Ok((latitude, longitude))
    }
}

/// Parses a feed timestamp. Accepts `YYYY-MM-DD HH:MM:SS` and the ISO 8601
/// `T`-separated form, with or without fractional seconds. Naive values
/// are taken as UTC.
#[must_use]
pub fn parse_feed_date(s: &str) -> Option<DateTime<Utc>> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s.trim(), format).ok())
        .map(|naive| naive.and_utc())
}

/// Converts epoch milliseconds to a UTC timestamp.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Upper-cases the first character and lower-cases the rest
/// (`"ORANGE"` → `"Orange"`).
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Reads a non-negative count from a JSON number or numeric string.
/// Fractional values are truncated. Returns `None` for anything else.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn parse_count(value: &serde_json::Value) -> Option<u64> {
    let number = match value {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Some(v);
            }
            n.as_f64()?
        }
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.is_finite() && number >= 0.0 && number < u64::MAX as f64 {
        Some(number as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_space_separated_date() {
        let dt = parse_feed_date("2024-03-01 06:15:00").unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 06:15:00 UTC");
    }

    #[test]
    fn parses_iso_date_with_fractional() {
        let dt = parse_feed_date("2024-03-01T06:15:00.250").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 06:15:00");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_feed_date("01/03/2024").is_none());
    }

    #[test]
    fn converts_epoch_millis() {
        let dt = from_epoch_millis(1_709_273_700_000).unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 06:15:00 UTC");
    }

    #[test]
    fn capitalizes_like_title_word() {
        assert_eq!(capitalize("RED"), "Red");
        assert_eq!(capitalize("orange"), "Orange");
        assert_eq!(capitalize("gReEn"), "Green");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn parses_counts() {
        assert_eq!(parse_count(&json!(1200)), Some(1200));
        assert_eq!(parse_count(&json!(1200.9)), Some(1200));
        assert_eq!(parse_count(&json!("350")), Some(350));
        assert_eq!(parse_count(&json!(-5)), None);
        assert_eq!(parse_count(&json!(null)), None);
        assert_eq!(parse_count(&json!("many")), None);
    }

    #[test]
    fn point_reads_lon_lat_order() {
        let geometry = PointGeometry {
            coordinates: vec![-122.4, 37.8, 10.0],
        };
        assert_eq!(geometry.lat_lng().unwrap(), (37.8, -122.4));
    }

    #[test]
    fn point_rejects_short_or_out_of_range() {
        let short = PointGeometry {
            coordinates: vec![10.0],
        };
        assert!(matches!(short.lat_lng(), Err(SourceError::Malformed { .. })));

        let bad = PointGeometry {
            coordinates: vec![10.0, 95.0],
        };
        assert!(matches!(bad.lat_lng(), Err(SourceError::Coordinates(_))));
    }
}
