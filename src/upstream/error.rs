//! Proxy error definitions.

use axum::response::{IntoResponse, Response};
use std::fmt;
use thiserror::Error;

use crate::http::response::failure_envelope;

/// The external API a proxy pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// NASA near-Earth-object feed.
    Nasa,
    /// JPL small-body orbital database.
    Jpl,
    /// USGS seismic event catalog.
    Usgs,
}

impl Upstream {
    /// Label used in error messages and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Upstream::Nasa => "NASA",
            Upstream::Jpl => "JPL",
            Upstream::Usgs => "USGS",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur in a proxy pipeline.
///
/// Exactly two kinds exist. Both convert to the failure envelope with
/// HTTP 500 at the dispatcher boundary; the caller only sees the message.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream returned a non-2xx status, or could not be reached at all
    /// (network failure, timeout).
    #[error("{upstream} API error: {detail}")]
    Transport { upstream: Upstream, detail: String },

    /// Upstream answered 2xx but the body could not be decoded.
    #[error("{upstream} API returned an unreadable response: {detail}")]
    Unexpected { upstream: Upstream, detail: String },
}

impl ProxyError {
    /// The upstream this error originated from.
    pub fn upstream(&self) -> Upstream {
        match self {
            ProxyError::Transport { upstream, .. } => *upstream,
            ProxyError::Unexpected { upstream, .. } => *upstream,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        failure_envelope(&self.to_string())
    }
}
