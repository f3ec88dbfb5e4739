//! Request model for the gateway.
//!
//! An [`HttpRequest`] is an immutable value. Every transformation the gateway
//! applies (adding the correlation header, bumping the retry counter) produces
//! a new request and leaves the caller's copy untouched.

use crate::error::HttpError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Header key used to propagate a caller-supplied correlation id.
pub const CORRELATION_ID_HEADER: &str = "correlation-id";

/// Request header map. Keys are unique; order is irrelevant.
pub type HttpHeaders = HashMap<String, String>;

/// Query parameter map. Kept sorted so built URLs are deterministic.
pub type HttpParameters = BTreeMap<String, String>;

/// HTTP methods the gateway can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Delete,
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    Data(Vec<u8>),
    #[default]
    Empty,
}

impl RequestBody {
    /// Serialize `value` as a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, HttpError> {
        serde_json::to_vec(value)
            .map(RequestBody::Data)
            .map_err(HttpError::InvalidRequestBody)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Data(data) => Some(data),
            RequestBody::Empty => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().map_or(0, <[u8]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A request as handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url_path: String,
    pub method: HttpMethod,
    pub headers: HttpHeaders,
    pub parameters: Option<HttpParameters>,
    pub body: RequestBody,
    /// Bypass any local/intermediate cache for this request.
    pub force_load_ignoring_cache: bool,
    /// Number of retries already performed for this logical request.
    pub retry_attempts: u32,
    /// Whether the gateway may retry this request at all.
    pub should_retry: bool,
    pub correlation_id: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url_path: impl Into<String>) -> Self {
        Self {
            url_path: url_path.into(),
            method,
            headers: HttpHeaders::new(),
            parameters: None,
            body: RequestBody::Empty,
            force_load_ignoring_cache: false,
            retry_attempts: 0,
            should_retry: false,
            correlation_id: None,
        }
    }

    pub fn get(url_path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url_path)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(HttpParameters::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn ignoring_cache(mut self, ignore: bool) -> Self {
        self.force_load_ignoring_cache = ignore;
        self
    }

    pub fn retryable(mut self, should_retry: bool) -> Self {
        self.should_retry = should_retry;
        self
    }

    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Copy of this request with the correlation id merged into its headers.
    ///
    /// Without a correlation id the headers are returned unchanged. Applying it
    /// twice yields the same headers as applying it once.
    pub fn with_correlation_header(&self) -> HttpRequest {
        let mut updated = self.clone();
        if let Some(id) = &self.correlation_id {
            updated
                .headers
                .insert(CORRELATION_ID_HEADER.to_string(), id.clone());
        }
        updated
    }

    /// Copy of this request for the next retry attempt.
    pub fn next_attempt(&self) -> HttpRequest {
        HttpRequest {
            retry_attempts: self.retry_attempts + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_defaults() {
        let req = HttpRequest::get("/markets");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url_path, "/markets");
        assert!(req.headers.is_empty());
        assert!(req.parameters.is_none());
        assert_eq!(req.body, RequestBody::Empty);
        assert!(!req.force_load_ignoring_cache);
        assert_eq!(req.retry_attempts, 0);
        assert!(!req.should_retry);
        assert!(req.correlation_id.is_none());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_correlation_header_adds_exactly_one_key() {
        let req = HttpRequest::get("/markets")
            .header("accept", "application/json")
            .correlation_id("abc-123");

        let updated = req.with_correlation_header();
        assert_eq!(updated.headers.len(), req.headers.len() + 1);
        assert_eq!(
            updated.headers.get(CORRELATION_ID_HEADER).map(String::as_str),
            Some("abc-123")
        );
        assert_eq!(
            updated.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        // Caller's copy is untouched.
        assert!(!req.headers.contains_key(CORRELATION_ID_HEADER));
    }

    #[test]
    fn test_correlation_header_is_idempotent() {
        let req = HttpRequest::get("/markets").correlation_id("abc-123");
        let once = req.with_correlation_header();
        let twice = once.with_correlation_header();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_correlation_header_without_id_is_noop() {
        let req = HttpRequest::get("/markets").header("x", "1");
        assert_eq!(req.with_correlation_header(), req);
    }

    #[test]
    fn test_next_attempt_only_bumps_counter() {
        let req = HttpRequest::new(HttpMethod::Post, "/orders")
            .body(RequestBody::Data(b"{}".to_vec()))
            .retryable(true)
            .correlation_id("c1");

        let next = req.next_attempt();
        assert_eq!(req.retry_attempts, 0);
        assert_eq!(next.retry_attempts, 1);
        assert_eq!(
            HttpRequest {
                retry_attempts: 0,
                ..next
            },
            req
        );
    }

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(body.as_bytes(), Some(&b"{\"a\":1}"[..]));
        assert_eq!(body.len(), 7);
        assert!(RequestBody::Empty.is_empty());
    }

    #[test]
    fn test_json_body_serialization_failure() {
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), 3u8);
        let err = RequestBody::json(&bad).unwrap_err();
        assert!(matches!(err, HttpError::InvalidRequestBody(_)));
    }

    #[test]
    fn test_parameters_accumulate() {
        let req = HttpRequest::get("/markets")
            .parameter("b", "2")
            .parameter("a", "1");
        let params = req.parameters.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
