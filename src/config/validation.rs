//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate bind addresses and upstream base URLs
//! - Validate value ranges (timeouts > 0, non-empty credential)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A bind address failed to parse as `host:port`.
    InvalidBindAddress { field: &'static str, value: String },
    /// An upstream base URL is not a valid http(s) URL.
    InvalidBaseUrl { field: &'static str, value: String },
    /// The NEO API key is empty.
    MissingApiKey,
    /// A timeout is configured as zero.
    ZeroTimeout { field: &'static str },
    /// The log level is not one of trace/debug/info/warn/error.
    InvalidLogLevel { value: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress { field, value } => {
                write!(f, "{} is not a valid bind address: {:?}", field, value)
            }
            ValidationError::InvalidBaseUrl { field, value } => {
                write!(f, "{} is not a valid http(s) URL: {:?}", field, value)
            }
            ValidationError::MissingApiKey => {
                write!(f, "upstream.nasa_api_key must not be empty")
            }
            ValidationError::ZeroTimeout { field } => {
                write!(f, "{} must be greater than zero", field)
            }
            ValidationError::InvalidLogLevel { value } => {
                write!(f, "observability.log_level is not a valid level: {:?}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let base_urls = [
        ("upstream.neo_base_url", &config.upstream.neo_base_url),
        ("upstream.sbdb_base_url", &config.upstream.sbdb_base_url),
        ("upstream.usgs_base_url", &config.upstream.usgs_base_url),
    ];
    for (field, value) in base_urls {
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => errors.push(ValidationError::InvalidBaseUrl {
                field,
                value: value.clone(),
            }),
        }
    }

    if config.upstream.nasa_api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "upstream.timeout_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel {
            value: config.observability.log_level.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
