//! Compile-time registry of hazard feeds.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a feed requires a TOML file in `feeds/`, an entry here, and (for
//! a new wire format) a [`FeedKind`](disaster_dash_source_models::FeedKind)
//! variant with its adapter.

use disaster_dash_source_models::FeedDefinition;

/// Environment variable holding a comma-separated list of feed ids to poll.
pub const FEEDS_ENV_VAR: &str = "DISASTER_DASH_FEEDS";

/// Embedded TOML feed definitions, in concatenation order.
const FEED_TOMLS: &[(&str, &str)] = &[
    ("usgs", include_str!("../feeds/usgs.toml")),
    ("gdacs", include_str!("../feeds/gdacs.toml")),
];

/// Total number of configured feeds (used in tests).
#[cfg(test)]
const EXPECTED_FEED_COUNT: usize = 2;

/// Returns all configured feed definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_feeds() -> Vec<FeedDefinition> {
    FEED_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Returns the feeds to poll, filtered by a comma-separated id list from
/// the CLI or, failing that, the [`FEEDS_ENV_VAR`] environment variable.
/// If neither is set, all feeds are returned.
#[must_use]
pub fn enabled_feeds(cli_filter: Option<String>) -> Vec<FeedDefinition> {
    let filter = cli_filter.or_else(|| std::env::var(FEEDS_ENV_VAR).ok());
    filter_feeds(all_feeds(), filter.as_deref())
}

fn filter_feeds(all: Vec<FeedDefinition>, filter: Option<&str>) -> Vec<FeedDefinition> {
    let Some(filter_str) = filter else {
        return all;
    };

    let ids: Vec<&str> = filter_str
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    let available = all
        .iter()
        .map(|f| f.id().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let filtered: Vec<FeedDefinition> = all.into_iter().filter(|f| ids.contains(&f.id())).collect();

    if filtered.is_empty() {
        log::warn!("No matching feeds found for filter {ids:?}. Available: {available}");
    }

    filtered
}

#[cfg(test)]
mod tests {
    use disaster_dash_source_models::FeedKind;

    use super::*;

    #[test]
    fn loads_all_feeds() {
        assert_eq!(all_feeds().len(), EXPECTED_FEED_COUNT);
    }

    #[test]
    fn feed_ids_are_unique() {
        let feeds = all_feeds();
        let mut ids: Vec<&str> = feeds.iter().map(FeedDefinition::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXPECTED_FEED_COUNT);
    }

    #[test]
    fn feeds_keep_registry_order_and_kinds() {
        let feeds = all_feeds();
        assert_eq!(feeds[0].id, "usgs");
        assert_eq!(feeds[0].kind, FeedKind::UsgsGeojson);
        assert_eq!(feeds[1].id, "gdacs");
        assert_eq!(feeds[1].kind, FeedKind::GdacsGeojson);
        for feed in &feeds {
            assert!(feed.url.starts_with("https://"), "{}: {}", feed.id, feed.url);
        }
    }

    #[test]
    fn filter_selects_listed_ids() {
        let feeds = filter_feeds(all_feeds(), Some(" gdacs ,"));
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].id, "gdacs");
    }

    #[test]
    fn no_filter_returns_everything() {
        assert_eq!(filter_feeds(all_feeds(), None).len(), EXPECTED_FEED_COUNT);
    }

    #[test]
    fn unknown_filter_returns_nothing() {
        assert!(filter_feeds(all_feeds(), Some("noaa")).is_empty());
    }
}
