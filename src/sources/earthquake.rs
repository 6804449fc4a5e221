//! Earthquake catalog pipeline.
//!
//! # Responsibilities
//! - Query the seismic event catalog in GeoJSON form
//! - Truncate to the first 50 features in upstream order
//! - Project each feature to a stable record shape
//!
//! # Design Decisions
//! - No re-sorting by magnitude or time; upstream order is the contract
//! - `coordinates` always has exactly 3 numeric entries and `depth`
//!   always equals `coordinates[2]`, by construction
//! - An absent or unusable timestamp falls back to the Unix epoch string
//!   instead of aborting the batch (the original would have crashed here)

use axum::response::Response;
use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::http::request::QueryParams;
use crate::http::response::success_envelope;
use crate::sources::{float_or_zero, non_empty_str, string_or_empty};
use crate::upstream::{ProxyError, Upstream, UpstreamClient};

/// Default catalog window start when the caller omits `start_date`.
pub const DEFAULT_START_DATE: &str = "2020-01-01";

/// Default minimum magnitude, forwarded verbatim as a string.
pub const DEFAULT_MIN_MAGNITUDE: &str = "6";

/// Hard cap on records returned per request.
pub const MAX_RECORDS: usize = 50;

/// Deterministic fallback for an absent or unusable upstream timestamp.
const EPOCH_ISO: &str = "1970-01-01T00:00:00.000Z";

/// One seismic event, normalized for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    pub id: String,
    pub magnitude: f64,
    pub place: String,
    /// ISO-8601 with millisecond precision and a `Z` suffix.
    pub time: String,
    /// GeoJSON point: `[longitude, latitude, depth]`.
    pub coordinates: [f64; 3],
    /// Always equal to `coordinates[2]`.
    pub depth: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl EarthquakeRecord {
    /// Project one GeoJSON feature, filling defaults for missing fields.
    fn from_feature(feature: &Value) -> Self {
        let coordinates = point_coordinates(feature.pointer("/geometry/coordinates"));
        Self {
            id: string_or_empty(feature.get("id")),
            magnitude: float_or_zero(feature.pointer("/properties/mag")),
            place: non_empty_str(feature.pointer("/properties/place"))
                .unwrap_or("Unknown")
                .to_string(),
            time: iso_time(feature.pointer("/properties/time")),
            coordinates,
            depth: coordinates[2],
            kind: non_empty_str(feature.pointer("/properties/type"))
                .unwrap_or("earthquake")
                .to_string(),
        }
    }
}

/// Coerce a GeoJSON coordinates array to exactly 3 numeric entries.
///
/// Shorter arrays are zero-padded, longer ones truncated, non-numeric
/// entries become 0. A missing array yields `[0, 0, 0]`.
fn point_coordinates(value: Option<&Value>) -> [f64; 3] {
    let mut point = [0.0; 3];
    if let Some(entries) = value.and_then(Value::as_array) {
        for (slot, entry) in point.iter_mut().zip(entries) {
            *slot = float_or_zero(Some(entry));
        }
    }
    point
}

/// Convert an epoch-millisecond timestamp to ISO-8601.
///
/// Anything that is not an in-range integer falls back to the epoch
/// string; one malformed record must never abort the batch.
fn iso_time(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_i64)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_else(|| EPOCH_ISO.to_string())
}

/// Project the upstream feature collection, truncated to `MAX_RECORDS`.
pub fn project_features(payload: &Value) -> Vec<EarthquakeRecord> {
    payload
        .get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .take(MAX_RECORDS)
                .map(EarthquakeRecord::from_feature)
                .collect()
        })
        .unwrap_or_default()
}

/// Upstream total event count, which may exceed the truncated output.
pub fn total_count(payload: &Value) -> Value {
    payload
        .pointer("/metadata/count")
        .filter(|count| !count.is_null())
        .cloned()
        .unwrap_or_else(|| Value::from(0))
}

/// Run the earthquake pipeline: fetch, project, wrap.
pub async fn handle(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    query: &QueryParams,
) -> Result<Response, ProxyError> {
    let start_date = query.get_or("start_date", DEFAULT_START_DATE);
    let min_magnitude = query.get_or("min_magnitude", DEFAULT_MIN_MAGNITUDE);

    tracing::info!(start_date = %start_date, min_magnitude = %min_magnitude, "Fetching earthquake data");

    let url = format!(
        "{}/fdsnws/event/1/query",
        config.usgs_base_url.trim_end_matches('/')
    );
    let payload = client
        .get_json(
            Upstream::Usgs,
            &url,
            &[
                ("format", "geojson"),
                ("starttime", start_date.as_str()),
                // Forwarded verbatim; upstream owns any numeric validation.
                ("minmagnitude", min_magnitude.as_str()),
            ],
        )
        .await?;

    let records = project_features(&payload);
    let count = total_count(&payload);

    tracing::info!(count = records.len(), "Earthquake data normalized");

    let data = serde_json::to_value(&records).map_err(|e| ProxyError::Unexpected {
        upstream: Upstream::Usgs,
        detail: e.to_string(),
    })?;
    Ok(success_envelope(data, Some(("total_count", count))))
}
