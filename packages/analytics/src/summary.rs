//! Headline dashboard numbers.

use std::collections::BTreeMap;

use disaster_dash_analytics_models::{DashboardSummary, ScoredEvent, TypeImpact};
use disaster_dash_hazard_models::{DisasterType, EventStatus, Severity};

use crate::aggregate::RunningMean;

/// Maximum number of critical events listed in a summary.
pub const CRITICAL_EVENT_LIMIT: usize = 5;

/// Summarizes a scored (and usually filtered) event table.
///
/// Critical events are the `High` severity rows with the largest risk
/// scores, ties kept in input order.
#[must_use]
pub fn summarize(events: &[ScoredEvent]) -> DashboardSummary {
    let mut overall = RunningMean::default();
    let mut by_type: BTreeMap<DisasterType, (u64, RunningMean)> = BTreeMap::new();
    let mut active_events = 0;
    let mut high_severity_events = 0;
    let mut total_affected = 0_u64;

    for scored in events {
        let event = &scored.event;
        if event.status == EventStatus::Active {
            active_events += 1;
        }
        if event.severity == Severity::High {
            high_severity_events += 1;
        }
        total_affected = total_affected.saturating_add(event.affected_population);
        overall.push(scored.risk_score);

        let (population, risk) = by_type.entry(event.disaster_type).or_default();
        *population = population.saturating_add(event.affected_population);
        risk.push(scored.risk_score);
    }

    let mut critical_events: Vec<ScoredEvent> = events
        .iter()
        .filter(|scored| scored.event.severity == Severity::High)
        .cloned()
        .collect();
    critical_events.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    critical_events.truncate(CRITICAL_EVENT_LIMIT);

    let impact_by_type = by_type
        .into_iter()
        .filter_map(|(disaster_type, (affected_population, risk))| {
            Some(TypeImpact {
                disaster_type,
                affected_population,
                risk_score: risk.mean()?,
            })
        })
        .collect();

    DashboardSummary {
        active_events,
        high_severity_events,
        total_affected,
        mean_risk_score: overall.mean(),
        critical_events,
        impact_by_type,
    }
}
