#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by risk scoring and aggregation.
//!
//! These are the tables the presentation layer consumes: scored events for
//! the map, risk factors per region/type for the risk chart, historical
//! trends per year/type, and the headline dashboard summary.

use chrono::{DateTime, TimeDelta, Utc};
use disaster_dash_hazard_models::{DisasterType, Region, Severity};
use disaster_dash_source_models::DisasterEvent;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A normalized event together with its computed risk score.
///
/// Serializes flat, so a scored event is the event's fields plus
/// `risk_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    /// The underlying event.
    #[serde(flatten)]
    pub event: DisasterEvent,
    /// Weighted risk score, in `[0, 2]`.
    pub risk_score: f64,
}

/// Aggregated risk for one (region, disaster type) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Chart label, e.g. `"Flood Risk"`.
    pub factor: String,
    /// Mean risk score over the group, times 100.
    pub impact_score: f64,
    /// Bucket derived from `impact_score`.
    pub severity: Severity,
    /// Grouping region.
    pub region: Region,
    /// Grouping disaster type.
    pub disaster_type: DisasterType,
}

/// Aggregated impact for one (year, disaster type) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrend {
    /// Calendar year (UTC) of the grouped events.
    pub year: i32,
    /// Grouping disaster type.
    pub disaster_type: DisasterType,
    /// Sum of affected population over the group.
    pub affected_population: u64,
    /// Mean risk score over the group.
    pub risk_score: f64,
    /// `risk_score * log10(affected_population + 1)`.
    pub impact_score: f64,
}

/// The historical trend table.
///
/// An empty table is a valid result (nothing to chart), distinct from an
/// error. Its column schema is the same whether or not it has rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTable {
    /// Rows ordered by year, then disaster type.
    pub rows: Vec<HistoricalTrend>,
}

impl HistoricalTable {
    /// Column names, in output order.
    pub const COLUMNS: &'static [&'static str] = &[
        "year",
        "disaster_type",
        "affected_population",
        "risk_score",
        "impact_score",
    ];

    /// Returns the column names of this table.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        Self::COLUMNS
    }

    /// Returns `true` if there is nothing to chart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Time window for the event filter, relative to "now".
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[strum(serialize = "24h")]
    Last24Hours,
    #[strum(serialize = "week")]
    LastWeek,
    #[strum(serialize = "month")]
    LastMonth,
    #[strum(serialize = "year")]
    LastYear,
    #[default]
    #[strum(serialize = "all")]
    AllTime,
}

impl TimeWindow {
    /// How far back the window reaches, or `None` for no limit.
    #[must_use]
    pub const fn lookback(self) -> Option<TimeDelta> {
        match self {
            Self::Last24Hours => Some(TimeDelta::days(1)),
            Self::LastWeek => Some(TimeDelta::days(7)),
            Self::LastMonth => Some(TimeDelta::days(30)),
            Self::LastYear => Some(TimeDelta::days(365)),
            Self::AllTime => None,
        }
    }

    /// Earliest timestamp inside the window as of `now`.
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lookback().map(|lookback| now - lookback)
    }
}

/// Post-pipeline row selection.
///
/// Empty `regions` or `disaster_types` mean "no restriction". The default
/// filter keeps every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only events at or after the window start.
    pub time_window: TimeWindow,
    /// Only events in these regions.
    pub regions: Vec<Region>,
    /// Only events of these types.
    pub disaster_types: Vec<DisasterType>,
    /// Lowest severity kept (inclusive).
    pub min_severity: Severity,
    /// Highest severity kept (inclusive).
    pub max_severity: Severity,
    /// Only events affecting at least this many people.
    pub min_population: u64,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            time_window: TimeWindow::AllTime,
            regions: Vec::new(),
            disaster_types: Vec::new(),
            min_severity: Severity::Low,
            max_severity: Severity::High,
            min_population: 0,
        }
    }
}

/// Total population and mean risk for one disaster type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeImpact {
    /// Grouping disaster type.
    pub disaster_type: DisasterType,
    /// Sum of affected population.
    pub affected_population: u64,
    /// Mean risk score.
    pub risk_score: f64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of events with `active` status.
    pub active_events: usize,
    /// Number of `High` severity events.
    pub high_severity_events: usize,
    /// Sum of affected population over all events.
    pub total_affected: u64,
    /// Mean risk score, `None` when there are no events.
    pub mean_risk_score: Option<f64>,
    /// Highest-risk `High` severity events, most severe first.
    pub critical_events: Vec<ScoredEvent>,
    /// Population and mean risk per disaster type.
    pub impact_by_type: Vec<TypeImpact>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use disaster_dash_hazard_models::EventStatus;

    use super::*;

    #[test]
    fn scored_event_serializes_flat() {
        let scored = ScoredEvent {
            event: DisasterEvent {
                event_id: "7".to_string(),
                disaster_type: DisasterType::Wildfire,
                latitude: -33.0,
                longitude: 150.0,
                location: Region::Oceania,
                severity: Severity::High,
                status: EventStatus::Active,
                affected_population: 500,
                timestamp: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            },
            risk_score: 1.25,
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["event_id"], "7");
        assert_eq!(json["risk_score"], 1.25);
        assert!(json.get("event").is_none());

        let back: ScoredEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, scored);
    }

    #[test]
    fn empty_historical_table_keeps_schema() {
        let table = HistoricalTable::default();
        assert!(table.is_empty());
        for column in ["year", "disaster_type", "impact_score"] {
            assert!(table.columns().contains(&column), "missing {column}");
        }
    }

    #[test]
    fn time_window_parses_short_names() {
        assert_eq!("24h".parse::<TimeWindow>().unwrap(), TimeWindow::Last24Hours);
        assert_eq!("week".parse::<TimeWindow>().unwrap(), TimeWindow::LastWeek);
        assert_eq!("all".parse::<TimeWindow>().unwrap(), TimeWindow::AllTime);
        assert_eq!(TimeWindow::LastMonth.to_string(), "month");
    }

    #[test]
    fn time_window_start() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(
            TimeWindow::LastWeek.start(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap())
        );
        assert_eq!(TimeWindow::AllTime.start(now), None);
    }

    #[test]
    fn default_filter_is_unrestricted() {
        let filter = EventFilter::default();
        assert_eq!(filter.time_window, TimeWindow::AllTime);
        assert!(filter.regions.is_empty());
        assert_eq!(filter.min_severity, Severity::Low);
        assert_eq!(filter.max_severity, Severity::High);
    }
}
