//! Pipeline configuration.
//!
//! Built from defaults, then overridden by `DISASTER_DASH_*` environment
//! variables, then by CLI flags. The feed filter's own env fallback
//! (`DISASTER_DASH_FEEDS`) lives in the feed registry.

use std::time::Duration;

use disaster_dash_source::{cache, http};

use crate::PipelineError;

/// Env var overriding the per-request fetch timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "DISASTER_DASH_FETCH_TIMEOUT_SECS";

/// Env var overriding the feed cache TTL, in seconds.
pub const CACHE_TTL_ENV_VAR: &str = "DISASTER_DASH_CACHE_TTL_SECS";

/// Env var fixing the synthetic fallback seed.
pub const SEED_ENV_VAR: &str = "DISASTER_DASH_SEED";

/// Settings for a [`crate::Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Comma-separated feed ids to poll. `None` polls every feed unless
    /// `DISASTER_DASH_FEEDS` is set.
    pub feeds: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long a successful feed fetch is reused.
    pub cache_ttl: Duration,
    /// Seed for the synthetic fallback. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feeds: None,
            timeout: http::DEFAULT_TIMEOUT,
            cache_ttl: cache::DEFAULT_TTL,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if a variable is set but
    /// is not a non-negative integer.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if a variable is set but
    /// is not a non-negative integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let mut config = Self::default();

        if let Some(secs) = parse_var(&lookup, TIMEOUT_ENV_VAR)? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var(&lookup, CACHE_TTL_ENV_VAR)? {
            config.cache_ttl = Duration::from_secs(secs);
        }
        config.seed = parse_var(&lookup, SEED_ENV_VAR)?;

        Ok(config)
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<u64>, PipelineError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| PipelineError::InvalidConfig {
                    key: key.to_string(),
                    value,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn env_overrides() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (TIMEOUT_ENV_VAR, "3"),
            (CACHE_TTL_ENV_VAR, " 60 "),
            (SEED_ENV_VAR, "42"),
        ]))
        .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = PipelineConfig::from_lookup(lookup(&[(SEED_ENV_VAR, "lucky")])).unwrap_err();
        match err {
            PipelineError::InvalidConfig { key, value } => {
                assert_eq!(key, SEED_ENV_VAR);
                assert_eq!(value, "lucky");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
