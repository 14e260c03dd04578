//! Per-event risk scoring.
//!
//! `risk = severity_weight * time_factor * (1 + population_factor)`, where
//! the population factor is `log10(population + 1) / 6` capped at 1. The
//! cap means population can at most double a score, so scores fall in
//! `[0.15, 2.0]`.

use disaster_dash_analytics_models::ScoredEvent;
use disaster_dash_geography::validate_coordinates;
use disaster_dash_hazard_models::{EventStatus, Severity};
use disaster_dash_source_models::DisasterEvent;

use crate::AnalyticsError;

/// Weight contributed by an event's severity.
#[must_use]
pub const fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::High => 1.0,
        Severity::Medium => 0.6,
        Severity::Low => 0.3,
    }
}

/// Multiplier for whether an event is still active.
#[must_use]
pub const fn time_factor(status: EventStatus) -> f64 {
    match status {
        EventStatus::Active => 1.0,
        EventStatus::Resolved => 0.5,
    }
}

/// Diminishing-returns population factor in `[0, 1]`.
///
/// Reaches 1 at roughly one million people and stays there.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn population_factor(affected_population: u64) -> f64 {
    ((affected_population as f64 + 1.0).log10() / 6.0).min(1.0)
}

/// Computes the risk score for one event.
#[must_use]
pub fn risk_score(event: &DisasterEvent) -> f64 {
    severity_weight(event.severity)
        * time_factor(event.status)
        * (1.0 + population_factor(event.affected_population))
}

/// Scores every event in a table.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidCoordinates`] for the first event whose
/// coordinates are out of range; nothing is scored in that case.
pub fn score_events(events: Vec<DisasterEvent>) -> Result<Vec<ScoredEvent>, AnalyticsError> {
    events
        .into_iter()
        .map(|event| {
            validate_coordinates(event.latitude, event.longitude).map_err(|source| {
                AnalyticsError::InvalidCoordinates {
                    event_id: event.event_id.clone(),
                    source,
                }
            })?;

            let risk_score = risk_score(&event);
            Ok(ScoredEvent { event, risk_score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use disaster_dash_hazard_models::{DisasterType, Region};

    use super::*;

    fn event(severity: Severity, status: EventStatus, affected_population: u64) -> DisasterEvent {
        DisasterEvent {
            event_id: "e".to_string(),
            disaster_type: DisasterType::Earthquake,
            latitude: 0.0,
            longitude: 0.0,
            location: Region::Africa,
            severity,
            status,
            affected_population,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn low_resolved_without_population_is_exactly_0_15() {
        let score = risk_score(&event(Severity::Low, EventStatus::Resolved, 0));
        assert_eq!(score, 0.15);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn high_active_without_population_is_exactly_one() {
        let score = risk_score(&event(Severity::High, EventStatus::Active, 0));
        assert_eq!(score, 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn zero_population_contributes_nothing() {
        assert_eq!(population_factor(0), 0.0);
    }

    #[test]
    fn population_factor_saturates() {
        assert!((population_factor(999) - 0.5).abs() < 1e-12);
        assert!((population_factor(999_999) - 1.0).abs() < 1e-12);
        assert!((population_factor(50_000_000) - 1.0).abs() < f64::EPSILON);
        assert!((population_factor(u64::MAX) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn medium_active_with_thousand_people() {
        let score = risk_score(&event(Severity::Medium, EventStatus::Active, 999));
        assert!((score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn scores_stay_within_bounds() {
        for &severity in Severity::all() {
            for &status in EventStatus::all() {
                for population in [0, 10, 1_000, 1_000_000, u64::MAX] {
                    let score = risk_score(&event(severity, status, population));
                    assert!(
                        (0.15..=2.0).contains(&score),
                        "{severity} {status} {population}: {score}"
                    );
                }
            }
        }
    }

    #[test]
    fn score_events_keeps_order_and_fields() {
        let events = vec![
            event(Severity::High, EventStatus::Active, 0),
            event(Severity::Low, EventStatus::Resolved, 0),
        ];
        let scored = score_events(events.clone()).unwrap();

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].event, events[0]);
        assert!((scored[0].risk_score - 1.0).abs() < f64::EPSILON);
        assert!((scored[1].risk_score - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_coordinates_fail_the_table() {
        let mut bad = event(Severity::High, EventStatus::Active, 0);
        bad.event_id = "bad".to_string();
        bad.latitude = 123.0;

        let good = event(Severity::Low, EventStatus::Active, 0);
        let err = score_events(vec![good, bad]).unwrap_err();
        let AnalyticsError::InvalidCoordinates { event_id, .. } = err;
        assert_eq!(event_id, "bad");
    }
}
