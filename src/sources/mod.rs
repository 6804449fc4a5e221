//! Data source pipelines.
//!
//! # Data Flow
//! ```text
//! dispatcher (http/server.rs)
//!     → neo.rs | orbital.rs | earthquake.rs
//!         → upstream client (one GET, parameters with defaults)
//!         → pure normalizer (Value → stable output schema)
//!         → response envelope (http/response.rs)
//! ```
//!
//! # Design Decisions
//! - Normalizers operate on loosely-typed `serde_json::Value`; upstream
//!   schemas are not contractually fixed
//! - Normalization is total: a malformed record degrades to its defaults
//!   and a malformed collection degrades to empty output, so one bad
//!   record can never abort a batch
//! - Upstream numeric fields may arrive as JSON numbers or decimal
//!   strings; both coerce through `float_or_zero`

pub mod earthquake;
pub mod neo;
pub mod orbital;

use serde_json::Value;

/// Coerce an optional JSON value to a float, defaulting to 0.
///
/// Accepts numbers and decimal strings (the NEO feed encodes distances and
/// velocities as strings); anything else is 0.
pub(crate) fn float_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Non-empty string view of an optional JSON value.
///
/// Blank strings count as absent, matching how the original treated falsy
/// upstream values.
pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// String value of an optional JSON value, defaulting to empty.
pub(crate) fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}
