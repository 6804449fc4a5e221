//! Request handling: query extraction and request IDs.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) for tracing
//! - Extract proxy parameters from the URL query string
//!
//! # Design Decisions
//! - Parameters come from the query string only, never the body; the
//!   dashboard client POSTs a JSON body the handlers deliberately ignore
//! - First occurrence wins when a parameter repeats
//! - A blank value counts as absent, so defaults apply to `?start_date=`

use axum::http::{HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 request ID for each inbound request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Decoded query parameters of an inbound request, in wire order.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse the query string of `uri` (percent-decoding included).
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value for `name`, or `default`.
    pub fn get_or(&self, name: &str, default: &str) -> String {
        match self.get(name) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = QueryParams::from_uri(&uri("/nasa-neo?start_date=a&start_date=b"));
        assert_eq!(params.get("start_date"), Some("a"));
    }

    #[test]
    fn test_blank_value_takes_default() {
        let params = QueryParams::from_uri(&uri("/nasa-neo?start_date="));
        assert_eq!(params.get_or("start_date", "2025-10-01"), "2025-10-01");
    }

    #[test]
    fn test_missing_query_takes_default() {
        let params = QueryParams::from_uri(&uri("/nasa-neo"));
        assert_eq!(params.get("start_date"), None);
        assert_eq!(params.get_or("end_date", "2025-10-07"), "2025-10-07");
    }

    #[test]
    fn test_percent_decoding() {
        let params = QueryParams::from_uri(&uri("/nasa-orbital?query=433%20Eros"));
        assert_eq!(params.get_or("query", "2025"), "433 Eros");
    }
}
