//! HTTP helpers shared by the feed adapters.
//!
//! Feeds are polled once per pipeline run with no retry: a failed request
//! simply yields no rows until the next reload. What every request does get
//! is a bounded timeout, configured on the client by [`build_client`], so an
//! unreachable feed cannot stall the pipeline.

use std::time::Duration;

use crate::SourceError;

/// Default per-request timeout for feed fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Builds the HTTP client used for all feed requests.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("disaster-dash/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fetches a `GeoJSON` `FeatureCollection` and returns its `features` array.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or times out, the server
/// answers with a non-success status, the body is not JSON, or the JSON
/// has no `features` array.
pub async fn fetch_features(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<serde_json::Value>, SourceError> {
    log::debug!("GET {url}");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let text = response.text().await?;
    features_from_body(&text).inspect_err(|e| {
        log::debug!(
            "Unusable feed body from {url} ({} bytes): {e}\n  body preview: {}",
            text.len(),
            preview(&text),
        );
    })
}

/// Parses a response body and extracts its `features` array.
///
/// # Errors
///
/// Returns [`SourceError::Json`] for invalid JSON, or
/// [`SourceError::Malformed`] if there is no `features` array.
pub fn features_from_body(body: &str) -> Result<Vec<serde_json::Value>, SourceError> {
    let mut json: serde_json::Value = serde_json::from_str(body)?;

    match json.get_mut("features").map(serde_json::Value::take) {
        Some(serde_json::Value::Array(features)) => Ok(features),
        _ => Err(SourceError::Malformed {
            message: "No features array in GeoJSON response".to_string(),
        }),
    }
}

fn preview(text: &str) -> &str {
    if text.len() <= BODY_PREVIEW_LEN {
        return text;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
