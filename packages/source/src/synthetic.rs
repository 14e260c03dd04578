//! Synthetic fallback dataset.
//!
//! Used when every live feed comes back empty so the dashboard always has
//! something to score and chart. Values are random but the shape is fixed:
//! [`SYNTHETIC_EVENT_COUNT`] rows, one per day going back from `now`, with
//! every field inside its documented range.

use chrono::{DateTime, TimeDelta, Utc};
use disaster_dash_hazard_models::{DisasterType, EventStatus, Region, Severity};
use disaster_dash_source_models::DisasterEvent;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

/// Number of rows the fallback generator always produces.
pub const SYNTHETIC_EVENT_COUNT: u32 = 100;

/// Inclusive bounds for synthetic affected population.
pub const POPULATION_RANGE: (u64, u64) = (1_000, 1_000_000);

/// Generates the fallback dataset.
///
/// The `i`-th event (0-based) has id `i + 1` and timestamp `now - i days`.
/// Type, region, severity, and status are drawn independently and
/// uniformly; region is not derived from the random coordinates. The same
/// `seed` and `now` always give the same rows.
#[must_use]
pub fn synthetic_events(seed: u64, now: DateTime<Utc>) -> Vec<DisasterEvent> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..SYNTHETIC_EVENT_COUNT)
        .map(|day| DisasterEvent {
            event_id: (day + 1).to_string(),
            disaster_type: pick(&mut rng, DisasterType::core()),
            latitude: rng.random_range(-90.0..=90.0),
            longitude: rng.random_range(-180.0..=180.0),
            location: pick(&mut rng, Region::all()),
            severity: pick(&mut rng, Severity::all()),
            status: pick(&mut rng, EventStatus::all()),
            affected_population: rng.random_range(POPULATION_RANGE.0..=POPULATION_RANGE.1),
            timestamp: now - TimeDelta::days(i64::from(day)),
        })
        .collect()
}

fn pick<T: Copy>(rng: &mut StdRng, choices: &[T]) -> T {
    choices[rng.random_range(0..choices.len())]
}
