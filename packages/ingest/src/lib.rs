#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pipeline that turns live hazard feeds into the dashboard's tables.
//!
//! One [`Pipeline`] run polls every enabled feed that is not cached,
//! concatenates the results in registry order, substitutes synthetic data
//! when nothing came back, and scores every event.

pub mod config;
pub mod report;
pub mod watch;

use std::sync::Arc;

use chrono::Utc;
use disaster_dash_analytics::AnalyticsError;
use disaster_dash_analytics::aggregate::{historical_by_year_and_type, risk_by_region_and_type};
use disaster_dash_analytics::risk::score_events;
use disaster_dash_analytics_models::{HistoricalTable, RiskFactor, ScoredEvent};
use disaster_dash_source::cache::FeedCache;
use disaster_dash_source::progress::{FeedProgress, silent_progress};
use disaster_dash_source::synthetic::synthetic_events;
use disaster_dash_source::{DisasterFeed, SourceError, http, registry, sources};
use disaster_dash_source_models::{DisasterEvent, FeedOutcome};
use futures::future::join_all;

pub use config::PipelineConfig;

/// Errors that fail a pipeline run.
///
/// Feed failures are not among them: a failing feed contributes no rows
/// and the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// An event table violated a scoring precondition.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// A configuration variable held an unusable value.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig {
        /// Variable name.
        key: String,
        /// Value as found.
        value: String,
    },
}

/// Feed polling, caching, and scoring for the dashboard.
pub struct Pipeline {
    client: reqwest::Client,
    feeds: Vec<Box<dyn DisasterFeed>>,
    cache: FeedCache,
    progress: Arc<dyn FeedProgress>,
    seed: Option<u64>,
}

impl Pipeline {
    /// Creates a pipeline over the feeds enabled by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Source`] if the HTTP client cannot be built.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let feeds = registry::enabled_feeds(config.feeds.clone())
            .into_iter()
            .map(sources::feed_for)
            .collect();

        Self::with_feeds(config, feeds)
    }

    /// Creates a pipeline over an explicit list of feeds, polled and
    /// concatenated in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Source`] if the HTTP client cannot be built.
    pub fn with_feeds(
        config: &PipelineConfig,
        feeds: Vec<Box<dyn DisasterFeed>>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            client: http::build_client(config.timeout)?,
            feeds,
            cache: FeedCache::new(config.cache_ttl),
            progress: silent_progress(),
            seed: config.seed,
        })
    }

    /// Reports feed polling through `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn FeedProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Ids of the feeds this pipeline polls, in concatenation order.
    #[must_use]
    pub fn feed_ids(&self) -> Vec<&str> {
        self.feeds.iter().map(|feed| feed.id()).collect()
    }

    /// Drops every cached feed result so the next run refetches.
    pub fn reload(&mut self) {
        log::info!("Reload requested, clearing {} cached feed(s)", self.cache.len());
        self.cache.clear();
    }

    /// Returns the combined event table, substituting synthetic data when
    /// every feed came back empty.
    pub async fn fetch_events(&mut self) -> Vec<DisasterEvent> {
        let combined = self.fetch_feeds().await;

        if !combined.is_empty() {
            return combined;
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        log::warn!("All feeds returned no events, using synthetic data (seed {seed})");
        synthetic_events(seed, Utc::now())
    }

    /// Loads, normalizes, and scores the current events.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Analytics`] if an event has out-of-range
    /// coordinates.
    pub async fn load_disaster_data(&mut self) -> Result<Vec<ScoredEvent>, PipelineError> {
        let events = self.fetch_events().await;
        let scored = score_events(events)?;
        log::debug!("Scored {} events", scored.len());
        Ok(scored)
    }

    /// Loads the current events and aggregates risk per region and type.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Analytics`] if an event has out-of-range
    /// coordinates.
    pub async fn load_risk_data(&mut self) -> Result<Vec<RiskFactor>, PipelineError> {
        let scored = self.load_disaster_data().await?;
        Ok(risk_by_region_and_type(&scored))
    }

    /// Aggregates `events` into the historical trend table.
    ///
    /// Works on exactly the rows given, so callers can pass a filtered
    /// table.
    #[must_use]
    pub fn process_historical_data(&self, events: &[ScoredEvent]) -> HistoricalTable {
        historical_by_year_and_type(events)
    }

    async fn fetch_feeds(&mut self) -> Vec<DisasterEvent> {
        let ttl = self.cache.ttl().as_secs();
        let mut slots: Vec<Option<Vec<DisasterEvent>>> = self
            .feeds
            .iter()
            .map(|feed| {
                let cached = self.cache.get(feed.id())?;
                log::debug!(
                    "{}: using {} cached events (ttl {ttl}s)",
                    feed.name(),
                    cached.len()
                );
                Some(cached.to_vec())
            })
            .collect();

        let misses: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        self.progress.start(misses.len() as u64);

        let client = &self.client;
        let outcomes = join_all(misses.iter().map(|&i| self.feeds[i].fetch(client))).await;

        for (i, outcome) in misses.into_iter().zip(outcomes) {
            self.progress.feed_done(&outcome);

            match &outcome {
                FeedOutcome::Fetched { feed, events } => {
                    if events.is_empty() {
                        log::info!("{feed}: feed returned no events");
                    }
                    self.cache.insert(feed.clone(), events.clone());
                }
                FeedOutcome::Failed { feed, .. } => {
                    log::debug!("{feed}: not caching failed fetch");
                }
            }

            slots[i] = Some(outcome.into_events());
        }

        let combined: Vec<DisasterEvent> = slots.into_iter().flatten().flatten().collect();
        self.progress.finish(combined.len());
        combined
    }
}
