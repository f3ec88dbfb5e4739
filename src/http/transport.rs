//! Transport adapter — the one place a socket is touched.
//!
//! A [`Transport`] takes a fully-formed [`TransportRequest`] and resolves
//! exactly once. It never retries and never interprets status codes; both are
//! the gateway's job.

use crate::error::TransportError;
use crate::http::request::{HttpHeaders, HttpMethod};
use std::collections::HashMap;
use std::future::Future;

/// Request as sent on the wire: URL already built, headers already merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HttpHeaders,
    pub body: Option<Vec<u8>>,
    pub ignore_cache: bool,
}

/// Whatever the server answered, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[cfg(feature = "http")]
pub use self::reqwest_transport::{ReqwestTransport, DEFAULT_TIMEOUT};

#[cfg(feature = "http")]
mod reqwest_transport {
    use super::{RawResponse, Transport, TransportRequest};
    use crate::error::TransportError;
    use crate::http::request::HttpMethod;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL};
    use reqwest::{Client, Method};
    use std::collections::HashMap;
    use std::future::Future;
    use std::time::Duration;

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// [`Transport`] backed by a pooled `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, TransportError> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
            let mut builder = Client::builder();
            #[cfg(not(target_arch = "wasm32"))]
            {
                builder = builder.timeout(timeout).pool_max_idle_per_host(10);
            }
            #[cfg(target_arch = "wasm32")]
            let _ = timeout;

            let client = builder
                .build()
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            Ok(Self { client })
        }

        /// Wrap an already configured client.
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }

        async fn execute(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
            let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
            for (key, value) in &request.headers {
                let name = HeaderName::try_from(key.as_str())
                    .map_err(|e| TransportError::InvalidRequest(format!("header '{key}': {e}")))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| TransportError::InvalidRequest(format!("header '{key}': {e}")))?;
                headers.insert(name, value);
            }
            if request.ignore_cache {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            }

            let mut builder = self
                .client
                .request(method(request.method), request.url.as_str())
                .headers(headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(map_error)?;

            let status = response.status().as_u16();
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .filter_map(|(k, v)| {
                    v.to_str()
                        .ok()
                        .map(|v| (k.as_str().to_string(), v.to_string()))
                })
                .collect();

            let body = response.bytes().await.map_err(|e| {
                tracing::debug!(status, error = %e, "failed to read response body");
                map_error(e)
            })?;

            Ok(RawResponse {
                status,
                headers,
                body: Some(body.to_vec()),
            })
        }
    }

    impl Transport for ReqwestTransport {
        fn send(
            &self,
            request: TransportRequest,
        ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
            self.execute(request)
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
        }
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            return TransportError::TimedOut;
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return TransportError::NoNetwork;
        }
        if err.is_builder() {
            return TransportError::InvalidRequest(err.to_string());
        }
        TransportError::Other(err.to_string())
    }

}
