//! Plain-text rendering of the dashboard tables for the terminal.

use std::fmt::Write as _;

use disaster_dash_analytics_models::{DashboardSummary, HistoricalTable, RiskFactor, ScoredEvent};
use disaster_dash_source_models::FeedDefinition;

/// Shown in place of an empty historical table.
pub const NO_HISTORICAL_DATA: &str = "No historical data available for the selected filters.";

/// Renders the feed registry.
#[must_use]
pub fn feeds_table(feeds: &[FeedDefinition]) -> String {
    let mut out = format!("{:<10} {:<16} NAME\n", "ID", "KIND");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for feed in feeds {
        let _ = writeln!(out, "{:<10} {:<16} {}", feed.id(), feed.kind.as_ref(), feed.name());
    }
    out
}

/// Renders scored events, one per line.
#[must_use]
pub fn events_table(events: &[ScoredEvent]) -> String {
    let mut out = format!(
        "{:<14} {:<11} {:<14} {:<7} {:<9} {:>12} {:>6}  TIMESTAMP\n",
        "ID", "TYPE", "REGION", "SEV", "STATUS", "AFFECTED", "RISK"
    );
    out.push_str(&"-".repeat(100));
    out.push('\n');
    for scored in events {
        let e = &scored.event;
        let _ = writeln!(
            out,
            "{:<14} {:<11} {:<14} {:<7} {:<9} {:>12} {:>6.3}  {}",
            e.event_id,
            e.disaster_type,
            e.location,
            e.severity,
            e.status,
            e.affected_population,
            scored.risk_score,
            e.timestamp.format("%Y-%m-%d %H:%M"),
        );
    }
    let _ = write!(out, "{} event(s)", events.len());
    out
}

/// Renders the per-region risk factors.
#[must_use]
pub fn risk_table(factors: &[RiskFactor]) -> String {
    let mut out = format!("{:<14} {:<18} {:>7}  SEVERITY\n", "REGION", "FACTOR", "IMPACT");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for factor in factors {
        let _ = writeln!(
            out,
            "{:<14} {:<18} {:>7.1}  {}",
            factor.region, factor.factor, factor.impact_score, factor.severity
        );
    }
    out
}

/// Renders the historical trend table, or [`NO_HISTORICAL_DATA`] when it
/// has no rows.
#[must_use]
pub fn historical_table(table: &HistoricalTable) -> String {
    if table.is_empty() {
        return NO_HISTORICAL_DATA.to_string();
    }

    let mut out = format!(
        "{:<6} {:<11} {:>14} {:>6} {:>7}\n",
        "YEAR", "TYPE", "AFFECTED", "RISK", "IMPACT"
    );
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<6} {:<11} {:>14} {:>6.3} {:>7.3}",
            row.year, row.disaster_type, row.affected_population, row.risk_score, row.impact_score
        );
    }
    out
}

/// Renders the headline metrics, critical events, and impact by type.
#[must_use]
pub fn summary_text(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let mean = summary
        .mean_risk_score
        .map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"));

    let _ = writeln!(out, "Active events:        {}", summary.active_events);
    let _ = writeln!(out, "High severity events: {}", summary.high_severity_events);
    let _ = writeln!(out, "Total affected:       {}", summary.total_affected);
    let _ = writeln!(out, "Mean risk score:      {mean}");

    if summary.critical_events.is_empty() {
        out.push_str("\nNo critical events.\n");
    } else {
        out.push_str("\nCritical events:\n");
        for scored in &summary.critical_events {
            let e = &scored.event;
            let _ = writeln!(
                out,
                "  {} in {} ({} affected, risk {:.2})",
                e.disaster_type, e.location, e.affected_population, scored.risk_score
            );
        }
    }

    if !summary.impact_by_type.is_empty() {
        out.push_str("\nImpact by type:\n");
        for impact in &summary.impact_by_type {
            let _ = writeln!(
                out,
                "  {:<11} {:>14} affected, mean risk {:.2}",
                impact.disaster_type, impact.affected_population, impact.risk_score
            );
        }
    }

    out
}
