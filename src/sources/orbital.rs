//! Orbital lookup pipeline.
//!
//! # Responsibilities
//! - Forward a small-body search string to the orbital database
//! - Project the object/orbit/physical sections into a stable shape
//!
//! # Design Decisions
//! - Projection, not transformation: sections pass through unmodified,
//!   absent or non-object sections become empty mappings, never null
//! - Upstream "not found" shapes are not special-cased; the fallback
//!   rules leave `object_name` equal to the raw query with empty sections

use axum::response::Response;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::UpstreamConfig;
use crate::http::request::QueryParams;
use crate::http::response::success_envelope;
use crate::sources::non_empty_str;
use crate::upstream::{ProxyError, Upstream, UpstreamClient};

/// Default search string when the caller omits `query`.
pub const DEFAULT_QUERY: &str = "2025";

/// Orbital data for one small body, normalized for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalData {
    /// Full name, falling back to the designation, then the raw query.
    pub object_name: String,
    /// Open mapping of element symbol → value; upstream-defined schema.
    pub orbital_elements: Map<String, Value>,
    pub physical_parameters: Map<String, Value>,
    pub orbit_class: Map<String, Value>,
}

/// Project the upstream lookup payload into `OrbitalData`.
pub fn project(payload: &Value, query: &str) -> OrbitalData {
    let object_name = non_empty_str(payload.pointer("/object/fullname"))
        .or_else(|| non_empty_str(payload.pointer("/object/des")))
        .unwrap_or(query)
        .to_string();

    OrbitalData {
        object_name,
        orbital_elements: section(payload.pointer("/orbit/elements")),
        physical_parameters: section(payload.get("phys_par")),
        orbit_class: section(payload.pointer("/orbit/orbit_class")),
    }
}

/// Pass a section through, defaulting anything that is not an object to `{}`.
fn section(value: Option<&Value>) -> Map<String, Value> {
    value.and_then(Value::as_object).cloned().unwrap_or_default()
}

/// Run the orbital pipeline: fetch, project, wrap.
pub async fn handle(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    query_params: &QueryParams,
) -> Result<Response, ProxyError> {
    let query = query_params.get_or("query", DEFAULT_QUERY);

    tracing::info!(query = %query, "Fetching orbital data");

    let url = format!("{}/sbdb.api", config.sbdb_base_url.trim_end_matches('/'));
    let payload = client
        .get_json(
            Upstream::Jpl,
            &url,
            &[("sstr", query.as_str()), ("full-prec", "true")],
        )
        .await?;

    let data = project(&payload, &query);

    tracing::info!(object_name = %data.object_name, "Orbital data normalized");

    let data = serde_json::to_value(&data).map_err(|e| ProxyError::Unexpected {
        upstream: Upstream::Jpl,
        detail: e.to_string(),
    })?;
    Ok(success_envelope(data, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_example() {
        let payload = json!({
            "object": { "fullname": "2025 AB" },
            "orbit": { "elements": { "e": "0.1234567" } }
        });
        let data = project(&payload, "2025");
        assert_eq!(data.object_name, "2025 AB");
        assert_eq!(data.orbital_elements.get("e"), Some(&json!("0.1234567")));
        assert!(data.physical_parameters.is_empty());
        assert!(data.orbit_class.is_empty());

        let text = serde_json::to_string(&data).unwrap();
        assert_eq!(
            text,
            r#"{"object_name":"2025 AB","orbital_elements":{"e":"0.1234567"},"physical_parameters":{},"orbit_class":{}}"#
        );
    }

    #[test]
    fn test_name_falls_back_to_designation() {
        let payload = json!({ "object": { "des": "433" } });
        assert_eq!(project(&payload, "eros").object_name, "433");

        // Blank fullname falls through like an absent one.
        let payload = json!({ "object": { "fullname": "", "des": "433" } });
        assert_eq!(project(&payload, "eros").object_name, "433");
    }

    #[test]
    fn test_name_falls_back_to_query() {
        assert_eq!(project(&json!({}), "nonsense").object_name, "nonsense");
    }

    #[test]
    fn test_sections_never_null() {
        let payload = json!({
            "object": { "fullname": "433 Eros (A898 PA)" },
            "orbit": { "elements": null },
            "phys_par": [1, 2, 3]
        });
        let data = project(&payload, "433");
        // Null and non-object sections both degrade to empty mappings.
        assert!(data.orbital_elements.is_empty());
        assert!(data.physical_parameters.is_empty());
        assert!(data.orbit_class.is_empty());
        let text = serde_json::to_string(&data).unwrap();
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_sections_pass_through_unmodified() {
        let payload = json!({
            "orbit": {
                "elements": { "e": ".2227", "a": "1.458", "i": "10.83" },
                "orbit_class": { "name": "Amor", "code": "AMO" }
            },
            "phys_par": { "H": "10.41", "diameter": "16.84" }
        });
        let data = project(&payload, "433");
        assert_eq!(data.orbital_elements.len(), 3);
        assert_eq!(data.orbit_class.get("name"), Some(&json!("Amor")));
        assert_eq!(data.physical_parameters.get("diameter"), Some(&json!("16.84")));
    }
}
