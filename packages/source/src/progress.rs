//! Progress reporting for feed polling.
//!
//! Defines a [`FeedProgress`] trait that decouples progress reporting from
//! any specific rendering backend. The CLI renders it with `indicatif`;
//! library callers and tests use [`SilentProgress`].

use std::sync::Arc;

use disaster_dash_source_models::FeedOutcome;

/// Receives progress events while feeds are polled.
///
/// Implementations must be `Send + Sync` so one instance can be shared
/// across the concurrent feed fetches.
pub trait FeedProgress: Send + Sync {
    /// Called once before polling with the number of feeds to fetch.
    fn start(&self, feeds: u64);

    /// Called as each feed finishes, successfully or not.
    fn feed_done(&self, outcome: &FeedOutcome);

    /// Called once after all feeds finished.
    fn finish(&self, total_events: usize);
}

/// A [`FeedProgress`] that ignores every update.
pub struct SilentProgress;

impl FeedProgress for SilentProgress {
    fn start(&self, _feeds: u64) {}
    fn feed_done(&self, _outcome: &FeedOutcome) {}
    fn finish(&self, _total_events: usize) {}
}

/// Returns a shared [`SilentProgress`] instance for convenient use.
#[must_use]
pub fn silent_progress() -> Arc<dyn FeedProgress> {
    Arc::new(SilentProgress)
}
