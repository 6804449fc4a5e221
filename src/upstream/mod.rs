//! Upstream API access subsystem.
//!
//! # Data Flow
//! ```text
//! Proxy pipeline (sources/*)
//!     → client.rs (one HTTP GET per invocation, bounded timeout)
//!     → non-2xx / network failure / timeout → ProxyError::Transport
//!     → 2xx body decoded as JSON → serde_json::Value
//!     → undecodable body → ProxyError::Unexpected
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client; connections are pooled across requests
//! - Exactly one outbound call per inbound request, no retries
//! - Error text carries the upstream label, never the request URL
//!   (the NEO query string embeds the API key)

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::{ProxyError, Upstream};
