//! Response envelope construction.
//!
//! # Responsibilities
//! - Wrap normalized data in the uniform `{success, data}` envelope
//! - Wrap pipeline errors in the `{success: false, error}` envelope
//! - Attach the CORS headers to every proxy response, preflight included
//!
//! # Design Decisions
//! - One shared builder for all three endpoints; the headers and envelope
//!   shape are defined exactly once
//! - `serde_json` preserves map insertion order, so the envelope always
//!   serializes as success first, then data, then the passthrough field

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

/// Allowed origin sent on every proxy response.
const ALLOW_ORIGIN: &str = "*";

/// Allowed request headers sent on every proxy response.
const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Attach the CORS headers shared by all proxy responses.
fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

/// Build the success envelope body.
///
/// `passthrough` is the optional upstream count field (`element_count`,
/// `total_count`); omitted entirely when `None`.
fn success_body(data: Value, passthrough: Option<(&'static str, Value)>) -> Value {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("data".to_string(), data);
    if let Some((key, value)) = passthrough {
        body.insert(key.to_string(), value);
    }
    Value::Object(body)
}

/// `200 OK` success envelope with CORS headers.
pub fn success_envelope(data: Value, passthrough: Option<(&'static str, Value)>) -> Response {
    with_cors(Json(success_body(data, passthrough)).into_response())
}

/// `500 Internal Server Error` failure envelope with CORS headers.
pub fn failure_envelope(message: &str) -> Response {
    let body = serde_json::json!({
        "success": false,
        "error": message,
    });
    with_cors((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
}

/// `204 No Content` preflight response with CORS headers and no body.
pub fn preflight() -> Response {
    with_cors(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header_value<'a>(response: &'a Response, name: &header::HeaderName) -> &'a str {
        response
            .headers()
            .get(name)
            .expect("header missing")
            .to_str()
            .unwrap()
    }

    #[test]
    fn test_success_envelope_headers_and_status() {
        let response = success_envelope(json!([]), None);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_value(&response, &header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "*"
        );
        assert_eq!(
            header_value(&response, &header::ACCESS_CONTROL_ALLOW_HEADERS),
            "authorization, x-client-info, apikey, content-type"
        );
    }

    #[test]
    fn test_success_body_key_order() {
        let body = success_body(json!([1, 2]), Some(("element_count", json!(2))));
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"success":true,"data":[1,2],"element_count":2}"#);
    }

    #[test]
    fn test_passthrough_omitted_when_absent() {
        let body = success_body(json!([]), None);
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"success":true,"data":[]}"#);
    }

    #[test]
    fn test_failure_envelope() {
        let response = failure_envelope("NASA API error: Forbidden");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            header_value(&response, &header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "*"
        );
    }

    #[test]
    fn test_preflight() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            header_value(&response, &header::ACCESS_CONTROL_ALLOW_HEADERS),
            "authorization, x-client-info, apikey, content-type"
        );
    }
}
