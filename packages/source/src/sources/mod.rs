//! Concrete hazard feed implementations.
//!
//! Each module implements the [`DisasterFeed`](crate::DisasterFeed) trait
//! for one wire format. [`feed_for`] picks the adapter named by a
//! [`FeedDefinition`]'s `kind`.

pub mod gdacs;
pub mod usgs;

use disaster_dash_source_models::{FeedDefinition, FeedKind};

use crate::DisasterFeed;

/// Builds the adapter for a feed definition.
#[must_use]
pub fn feed_for(definition: FeedDefinition) -> Box<dyn DisasterFeed> {
    match definition.kind {
        FeedKind::UsgsGeojson => Box::new(usgs::UsgsFeed::new(definition)),
        FeedKind::GdacsGeojson => Box::new(gdacs::GdacsFeed::new(definition)),
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::http::build_client;

    fn unreachable(kind: FeedKind) -> FeedDefinition {
        FeedDefinition {
            id: "offline".to_string(),
            name: "Offline feed".to_string(),
            url: "http://127.0.0.1:9/events.geojson".to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn network_failure_yields_no_events() {
        let client = build_client(Duration::from_secs(2)).unwrap();

        for kind in [FeedKind::UsgsGeojson, FeedKind::GdacsGeojson] {
            let feed = feed_for(unreachable(kind));
            let outcome = feed.fetch(&client).await;

            assert!(!outcome.is_fetched(), "{kind}: expected failure");
            assert_eq!(outcome.feed(), "offline");
            assert!(outcome.into_events().is_empty());
        }
    }

    #[tokio::test]
    async fn unresponsive_feed_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept both connections and hold them open without replying.
        std::thread::spawn(move || {
            let held: Vec<_> = listener.incoming().take(2).flatten().collect();
            std::thread::sleep(Duration::from_secs(30));
            drop(held);
        });

        let client = build_client(Duration::from_secs(1)).unwrap();

        for kind in [FeedKind::UsgsGeojson, FeedKind::GdacsGeojson] {
            let feed = feed_for(FeedDefinition {
                id: "stalled".to_string(),
                name: "Stalled feed".to_string(),
                url: format!("http://{addr}/events.geojson"),
                kind,
            });

            let start = Instant::now();
            let outcome = feed.fetch(&client).await;
            let elapsed = start.elapsed();

            assert!(!outcome.is_fetched(), "{kind}: expected a timeout");
            assert!(elapsed < Duration::from_secs(5), "{kind}: took {elapsed:?}");
        }
    }
}
