//! NEO feed pipeline.
//!
//! # Responsibilities
//! - Fetch the near-Earth-object feed for a date range
//! - Flatten the date-keyed upstream mapping into one ordered sequence
//! - Pass `element_count` through to the envelope untouched
//!
//! # Design Decisions
//! - Dates iterate in the upstream mapping's own enumeration order, not
//!   sorted: `serde_json`'s preserve_order feature carries the wire order
//! - A date bucket whose value is not an array is skipped, keeping the
//!   rest of the batch alive
//! - Missing nested paths yield defaults rather than failing the request

use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::http::request::QueryParams;
use crate::http::response::success_envelope;
use crate::sources::{float_or_zero, string_or_empty};
use crate::upstream::{ProxyError, Upstream, UpstreamClient};

/// Default feed window when the caller omits the dates.
pub const DEFAULT_START_DATE: &str = "2025-10-01";
pub const DEFAULT_END_DATE: &str = "2025-10-07";

/// One near-Earth object, normalized for the dashboard.
///
/// Constructed once per request from upstream feed data and discarded
/// after the response is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearEarthObject {
    /// Upstream-assigned identifier.
    pub id: String,
    pub name: String,
    /// The feed date bucket this object came from.
    pub date: String,
    /// Estimated diameter bounds in meters.
    pub diameter_min: f64,
    pub diameter_max: f64,
    /// Miss distance of the first close approach, in kilometers.
    pub miss_distance_km: f64,
    /// Relative velocity of the first close approach, in km/h.
    pub velocity_kmh: f64,
    /// Omitted from the serialized record when upstream leaves it out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hazardous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude: Option<f64>,
}

impl NearEarthObject {
    /// Project one upstream descriptor, filling defaults for missing paths.
    fn from_descriptor(date: &str, descriptor: &Value) -> Self {
        Self {
            id: string_or_empty(descriptor.get("id")),
            name: string_or_empty(descriptor.get("name")),
            date: date.to_string(),
            diameter_min: float_or_zero(
                descriptor.pointer("/estimated_diameter/meters/estimated_diameter_min"),
            ),
            diameter_max: float_or_zero(
                descriptor.pointer("/estimated_diameter/meters/estimated_diameter_max"),
            ),
            miss_distance_km: float_or_zero(
                descriptor.pointer("/close_approach_data/0/miss_distance/kilometers"),
            ),
            velocity_kmh: float_or_zero(
                descriptor.pointer("/close_approach_data/0/relative_velocity/kilometers_per_hour"),
            ),
            is_hazardous: descriptor
                .get("is_potentially_hazardous_asteroid")
                .and_then(Value::as_bool),
            absolute_magnitude: descriptor
                .get("absolute_magnitude_h")
                .and_then(Value::as_f64),
        }
    }
}

/// Flatten the date-keyed `near_earth_objects` mapping into one sequence,
/// preserving per-date array order and the mapping's enumeration order.
pub fn flatten_feed(payload: &Value) -> Vec<NearEarthObject> {
    let mut objects = Vec::new();
    let Some(buckets) = payload.get("near_earth_objects").and_then(Value::as_object) else {
        return objects;
    };
    for (date, entries) in buckets {
        // Skip malformed buckets instead of aborting the batch.
        let Some(entries) = entries.as_array() else {
            tracing::warn!(date = %date, "NEO date bucket is not an array, skipping");
            continue;
        };
        for descriptor in entries {
            objects.push(NearEarthObject::from_descriptor(date, descriptor));
        }
    }
    objects
}

/// Run the NEO pipeline: fetch, flatten, wrap.
pub async fn handle(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    query: &QueryParams,
) -> Result<Response, ProxyError> {
    let start_date = query.get_or("start_date", DEFAULT_START_DATE);
    let end_date = query.get_or("end_date", DEFAULT_END_DATE);

    tracing::info!(start_date = %start_date, end_date = %end_date, "Fetching NEO feed");

    let url = format!("{}/neo/rest/v1/feed", config.neo_base_url.trim_end_matches('/'));
    let payload = client
        .get_json(
            Upstream::Nasa,
            &url,
            &[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("api_key", config.nasa_api_key.as_str()),
            ],
        )
        .await?;

    let objects = flatten_feed(&payload);
    let element_count = payload.get("element_count").cloned();

    tracing::info!(count = objects.len(), "NEO feed normalized");

    let data = serde_json::to_value(&objects)
        .map_err(|e| ProxyError::Unexpected {
            upstream: Upstream::Nasa,
            detail: e.to_string(),
        })?;
    Ok(success_envelope(
        data,
        element_count.map(|count| ("element_count", count)),
    ))
}
