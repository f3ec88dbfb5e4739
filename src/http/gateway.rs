//! Network gateway — URL construction, classification and bounded retry.

use crate::error::HttpError;
use crate::http::request::HttpRequest;
use crate::http::response::{self, ResponseBody};
use crate::http::retry::RetryConfig;
use crate::http::transport::{Transport, TransportRequest};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Anything that can turn an [`HttpRequest`] into a response body.
pub trait Gateway: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<ResponseBody, HttpError>> + Send;
}

/// Gateway over a [`Transport`]: one attempt in flight at a time, retried per
/// [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct NetworkGateway<T> {
    base_url: String,
    transport: T,
    retry: RetryConfig,
}

impl<T: Transport> NetworkGateway<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self::with_retry(base_url, transport, RetryConfig::default())
    }

    pub fn with_retry(base_url: &str, transport: T, retry: RetryConfig) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send_with_retry(&self, request: HttpRequest) -> Result<ResponseBody, HttpError> {
        let mut request = request;
        loop {
            match self.attempt(&request).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    log_error(&request, &e);

                    if !self.retry.should_retry(&request, &e) {
                        return Err(e);
                    }

                    let delay = self.retry.delay_for_attempt(request.retry_attempts);
                    tracing::info!(
                        attempt = request.retry_attempts + 1,
                        max = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request to {}",
                        request.url_path
                    );
                    if delay > Duration::ZERO {
                        futures_timer::Delay::new(delay).await;
                    }
                    request = request.next_attempt();
                }
            }
        }
    }

    async fn attempt(&self, request: &HttpRequest) -> Result<ResponseBody, HttpError> {
        let request = request.with_correlation_header();
        let url = build_url(&self.base_url, &request)?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            headers = ?request.headers,
            body_len = request.body.len(),
            attempt = request.retry_attempts,
            "HTTP request"
        );

        let outcome = self
            .transport
            .send(TransportRequest {
                url,
                method: request.method,
                headers: request.headers,
                body: request.body.as_bytes().map(<[u8]>::to_vec),
                ignore_cache: request.force_load_ignoring_cache,
            })
            .await;

        if let Ok(raw) = &outcome {
            tracing::debug!(
                status = raw.status,
                body_len = raw.body.as_ref().map_or(0, Vec::len),
                "HTTP response"
            );
        }

        response::classify(outcome).map(|resp| resp.body)
    }
}

impl<T: Transport> Gateway for NetworkGateway<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<ResponseBody, HttpError>> + Send {
        self.send_with_retry(request)
    }
}

/// `base + path`, plus `key=value` pairs (values percent-encoded) when the
/// request carries parameters.
pub fn build_url(base_url: &str, request: &HttpRequest) -> Result<String, HttpError> {
    let mut url = format!("{}{}", base_url, request.url_path);

    if let Some(params) = &request.parameters {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        url = format!("{}?{}", url, query);
    }

    Url::parse(&url)
        .map(String::from)
        .map_err(|_| HttpError::InvalidRequest)
}

fn log_error(request: &HttpRequest, error: &HttpError) {
    match error {
        HttpError::Client { status, message } | HttpError::Server { status, message } => {
            tracing::warn!(
                path = %request.url_path,
                status,
                message = message.as_deref().unwrap_or_default(),
                "HTTP error"
            );
        }
        _ => tracing::warn!(path = %request.url_path, error = %error, "HTTP error"),
    }
}
