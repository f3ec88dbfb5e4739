//! High-level client — `MarketStreamClient` with nested sub-client accessors.
//!
//! The markets sub-client lives in `domain/market/client.rs`. This module keeps
//! the builder, the session handle and the accessor methods.

use crate::domain::market::client::Markets;
use crate::http::MarketsApi;
use crate::session::SessionState;

use std::sync::Arc;

#[cfg(feature = "http")]
use crate::error::TransportError;
#[cfg(feature = "http")]
use crate::http::transport::DEFAULT_TIMEOUT;
#[cfg(feature = "http")]
use crate::http::{MarketStreamHttp, NetworkGateway, ReqwestTransport, RetryConfig};
#[cfg(feature = "http")]
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::market::client::Markets as MarketsClient;

/// The reqwest-backed API stack produced by [`MarketStreamClientBuilder`].
#[cfg(feature = "http")]
pub type HttpMarketsApi = MarketStreamHttp<NetworkGateway<ReqwestTransport>>;

/// The primary entry point.
///
/// Generic over the [`MarketsApi`] it talks to so alternative transports (and
/// tests) can be wired in with [`MarketStreamClient::with_api`].
pub struct MarketStreamClient<A> {
    pub(crate) api: A,
    pub(crate) session: Arc<SessionState>,
}

impl<A: MarketsApi> MarketStreamClient<A> {
    pub fn with_api(api: A) -> Self {
        Self::with_api_and_session(api, Arc::new(SessionState::new()))
    }

    pub fn with_api_and_session(api: A, session: Arc<SessionState>) -> Self {
        Self { api, session }
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_, A> {
        Markets { client: self }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[cfg(feature = "http")]
impl MarketStreamClient<HttpMarketsApi> {
    pub fn builder() -> MarketStreamClientBuilder {
        MarketStreamClientBuilder::default()
    }
}

impl<A: Clone> Clone for MarketStreamClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
pub struct MarketStreamClientBuilder {
    base_url: String,
    timeout: Duration,
    retry: RetryConfig,
    session: Option<Arc<SessionState>>,
}

#[cfg(feature = "http")]
impl Default for MarketStreamClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            session: None,
        }
    }
}

#[cfg(feature = "http")]
impl MarketStreamClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Share an existing session state instead of creating a fresh one.
    pub fn session(mut self, session: Arc<SessionState>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<MarketStreamClient<HttpMarketsApi>, TransportError> {
        let transport = ReqwestTransport::with_timeout(self.timeout)?;
        let gateway = NetworkGateway::with_retry(&self.base_url, transport, self.retry);
        Ok(MarketStreamClient::with_api_and_session(
            MarketStreamHttp::new(gateway),
            self.session.unwrap_or_default(),
        ))
    }
}
