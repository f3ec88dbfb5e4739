//! Markets API client — `MarketStreamHttp`.
//!
//! Issues the request and decodes the wire envelope. Conversion to domain
//! types happens one layer up, in the markets sub-client.

use crate::domain::market::wire::MarketsResponse;
use crate::error::HttpError;
use crate::http::gateway::Gateway;
use crate::http::request::{HttpMethod, HttpRequest, RequestBody};
use serde::de::DeserializeOwned;
use std::future::Future;

const MARKETS_PATH: &str = "/markets";

/// Source of the raw markets listing.
pub trait MarketsApi: Send + Sync {
    fn fetch_markets(&self) -> impl Future<Output = Result<MarketsResponse, HttpError>> + Send;
}

/// Low-level client for the exchange REST API.
#[derive(Debug, Clone)]
pub struct MarketStreamHttp<G> {
    gateway: G,
}

impl<G: Gateway> MarketStreamHttp<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub async fn get_markets(&self) -> Result<MarketsResponse, HttpError> {
        let response: MarketsResponse = self.request(markets_request()).await?;
        if !response.success {
            tracing::warn!(
                count = response.result.len(),
                "markets response flagged unsuccessful"
            );
        }
        Ok(response)
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn request<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let body = self.gateway.send(request).await?;
        serde_json::from_slice(&body).map_err(HttpError::InvalidResponseBody)
    }
}

impl<G: Gateway> MarketsApi for MarketStreamHttp<G> {
    fn fetch_markets(&self) -> impl Future<Output = Result<MarketsResponse, HttpError>> + Send {
        self.get_markets()
    }
}

/// Always fetched fresh, never retried.
fn markets_request() -> HttpRequest {
    HttpRequest {
        url_path: MARKETS_PATH.to_string(),
        method: HttpMethod::Get,
        headers: Default::default(),
        parameters: None,
        body: RequestBody::Empty,
        force_load_ignoring_cache: true,
        retry_attempts: 0,
        should_retry: false,
        correlation_id: None,
    }
}
