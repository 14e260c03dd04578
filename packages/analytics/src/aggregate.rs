//! Group-by aggregations over scored events.
//!
//! Groups are keyed through a `BTreeMap`, so output order follows the
//! taxonomy enums' declaration order (regions as listed in [`Region`],
//! then disaster types) and years ascending.

use std::collections::BTreeMap;

use chrono::Datelike as _;
use disaster_dash_analytics_models::{HistoricalTable, HistoricalTrend, RiskFactor, ScoredEvent};
use disaster_dash_hazard_models::{DisasterType, Region, Severity};

/// Impact score above which a risk factor is [`Severity::High`].
pub const HIGH_IMPACT_THRESHOLD: f64 = 70.0;

/// Impact score above which a risk factor is [`Severity::Medium`].
pub const MEDIUM_IMPACT_THRESHOLD: f64 = 40.0;

/// Arithmetic mean accumulated one value at a time.
///
/// Uses the incremental update `mean += (x - mean) / n`, so a run of
/// identical values has a mean bit-for-bit equal to that value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMean {
    count: u64,
    mean: f64,
}

impl RunningMean {
    /// Adds one value.
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// Current mean, or `None` if nothing was pushed.
    #[must_use]
    pub const fn mean(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.mean) }
    }
}

/// Buckets a 0-100 impact score.
#[must_use]
pub fn impact_severity(impact_score: f64) -> Severity {
    if impact_score > HIGH_IMPACT_THRESHOLD {
        Severity::High
    } else if impact_score > MEDIUM_IMPACT_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Mean risk per (region, disaster type), scaled to 0-100.
///
/// Only pairs with at least one event are emitted.
#[must_use]
pub fn risk_by_region_and_type(events: &[ScoredEvent]) -> Vec<RiskFactor> {
    let mut groups: BTreeMap<(Region, DisasterType), RunningMean> = BTreeMap::new();

    for scored in events {
        groups
            .entry((scored.event.location, scored.event.disaster_type))
            .or_default()
            .push(scored.risk_score);
    }

    groups
        .into_iter()
        .filter_map(|((region, disaster_type), mean)| {
            let impact_score = mean.mean()? * 100.0;
            Some(RiskFactor {
                factor: format!("{disaster_type} Risk"),
                impact_score,
                severity: impact_severity(impact_score),
                region,
                disaster_type,
            })
        })
        .collect()
}

#[derive(Debug, Default)]
struct YearTypeGroup {
    affected_population: u64,
    risk: RunningMean,
}

/// Population and risk per (year, disaster type).
///
/// `impact_score = mean_risk * log10(total_population + 1)`. An empty
/// input gives an empty table.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn historical_by_year_and_type(events: &[ScoredEvent]) -> HistoricalTable {
    let mut groups: BTreeMap<(i32, DisasterType), YearTypeGroup> = BTreeMap::new();

    for scored in events {
        let group = groups
            .entry((scored.event.timestamp.year(), scored.event.disaster_type))
            .or_default();
        group.affected_population = group
            .affected_population
            .saturating_add(scored.event.affected_population);
        group.risk.push(scored.risk_score);
    }

    let rows = groups
        .into_iter()
        .filter_map(|((year, disaster_type), group)| {
            let risk_score = group.risk.mean()?;
            Some(HistoricalTrend {
                year,
                disaster_type,
                affected_population: group.affected_population,
                risk_score,
                impact_score: risk_score * (group.affected_population as f64 + 1.0).log10(),
            })
        })
        .collect();

    HistoricalTable { rows }
}
