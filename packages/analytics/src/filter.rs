//! Post-pipeline row selection for the dashboard views.

use chrono::{DateTime, Utc};
use disaster_dash_analytics_models::{EventFilter, ScoredEvent};

/// Returns `true` if `scored` passes every clause of `filter`.
#[must_use]
pub fn matches(filter: &EventFilter, scored: &ScoredEvent, now: DateTime<Utc>) -> bool {
    let event = &scored.event;

    filter
        .time_window
        .start(now)
        .is_none_or(|start| event.timestamp >= start)
        && (filter.regions.is_empty() || filter.regions.contains(&event.location))
        && (filter.disaster_types.is_empty()
            || filter.disaster_types.contains(&event.disaster_type))
        && event.severity >= filter.min_severity
        && event.severity <= filter.max_severity
        && event.affected_population >= filter.min_population
}

/// Keeps the rows that pass `filter`, preserving order.
#[must_use]
pub fn filter_events(
    filter: &EventFilter,
    events: &[ScoredEvent],
    now: DateTime<Utc>,
) -> Vec<ScoredEvent> {
    let kept: Vec<ScoredEvent> = events
        .iter()
        .filter(|scored| matches(filter, scored, now))
        .cloned()
        .collect();

    log::debug!("filter kept {}/{} events", kept.len(), events.len());

    kept
}
