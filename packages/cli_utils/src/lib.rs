#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the disaster dashboard.
//!
//! Provides an `indicatif` progress bar behind the [`FeedProgress`] trait,
//! plus [`init_logger`] which sets up `indicatif-log-bridge` so that
//! `log::info!` and friends are suspended while progress bars redraw.

use std::sync::Arc;

use disaster_dash_source::progress::FeedProgress;
use disaster_dash_source_models::FeedOutcome;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// An `indicatif` [`ProgressBar`] that implements [`FeedProgress`].
///
/// The bar is reused across pipeline runs: each [`FeedProgress::start`]
/// resets it to the new number of feeds.
pub struct IndicatifFeedProgress {
    bar: ProgressBar,
}

impl IndicatifFeedProgress {
    /// Creates a feeds 1/N bar attached to `multi`.
    #[must_use]
    pub fn feeds_bar(multi: &MultiProgress, message: &str) -> Arc<dyn FeedProgress> {
        let bar = multi.add(ProgressBar::new(0));
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} {wide_bar:.green/dim} {pos}/{len} [{elapsed_precise}]",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
        );
        bar.set_message(message.to_string());

        Arc::new(Self { bar })
    }
}

impl FeedProgress for IndicatifFeedProgress {
    fn start(&self, feeds: u64) {
        self.bar.reset();
        self.bar.set_length(feeds);
    }

    fn feed_done(&self, outcome: &FeedOutcome) {
        self.bar.inc(1);
        let status = match outcome {
            FeedOutcome::Fetched { events, .. } => format!("{} events", events.len()),
            FeedOutcome::Failed { .. } => "failed".to_string(),
        };
        self.bar.set_message(format!("{}: {status}", outcome.feed()));
    }

    fn finish(&self, total_events: usize) {
        self.bar
            .finish_with_message(format!("{total_events} events loaded"));
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while progress bars redraw.
///
/// Returns the [`MultiProgress`] that all progress bars must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // Already set when called twice in one process.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_tracks_feed_outcomes() {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let bar = multi.add(ProgressBar::new(0));
        let progress = IndicatifFeedProgress { bar: bar.clone() };

        progress.start(2);
        progress.feed_done(&FeedOutcome::Fetched {
            feed: "usgs".to_string(),
            events: Vec::new(),
        });
        progress.feed_done(&FeedOutcome::Failed {
            feed: "gdacs".to_string(),
            reason: "timeout".to_string(),
        });

        assert_eq!(bar.length(), Some(2));
        assert_eq!(bar.position(), 2);
        assert_eq!(bar.message(), "gdacs: failed");

        progress.finish(0);
        assert!(bar.is_finished());

        progress.start(1);
        assert_eq!(bar.position(), 0);
        assert_eq!(bar.length(), Some(1));
    }
}
