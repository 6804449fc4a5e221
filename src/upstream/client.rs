//! Shared HTTP client for upstream API calls.
//!
//! # Responsibilities
//! - Issue one GET per proxy invocation with the derived query parameters
//! - Enforce the configured upstream timeout
//! - Map non-2xx, network failure and timeout to ProxyError::Transport
//! - Map an undecodable 2xx body to ProxyError::Unexpected

use serde_json::Value;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::{ProxyError, Upstream};

/// User agent sent on every upstream request.
const USER_AGENT: &str = concat!("space-data-proxy/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around a pooled `reqwest::Client`.
///
/// Cheap to clone; all clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client with the configured timeout and user agent.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` with `query` appended and decode the body as JSON.
    ///
    /// The returned `Value` preserves upstream object key order, which the
    /// NEO normalizer relies on for its date-bucket enumeration.
    pub async fn get_json(
        &self,
        upstream: Upstream,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ProxyError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(upstream, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(upstream = %upstream, status = %status, "Upstream returned non-success status");
            metrics::record_upstream_failure(upstream);
            let detail = status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(ProxyError::Transport { upstream, detail });
        }

        response.json().await.map_err(|e| {
            let detail = e.without_url().to_string();
            ProxyError::Unexpected { upstream, detail }
        })
    }
}

/// Convert a reqwest send failure into a Transport error.
fn transport_error(upstream: Upstream, error: reqwest::Error) -> ProxyError {
    metrics::record_upstream_failure(upstream);
    let timed_out = error.is_timeout();
    // Strip the URL before formatting: the NEO query string carries the key.
    let stripped = error.without_url();
    tracing::warn!(upstream = %upstream, error = %stripped, "Upstream request failed");
    let detail = if timed_out {
        "request timed out".to_string()
    } else {
        stripped.to_string()
    };
    ProxyError::Transport { upstream, detail }
}
