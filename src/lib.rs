//! # Market Stream
//!
//! Fetches the list of tradable markets from an exchange REST API and turns it
//! into typed spot, futures and unknown markets.
//!
//! ## Architecture
//!
//! The crate is organized in layers, each awaiting the one below and mapping
//! its errors into its own:
//!
//! 1. **Transport** — `Transport` trait, `ReqwestTransport` (feature `http`)
//! 2. **Gateway** — `NetworkGateway`: URL building, status classification, 504 retry
//! 3. **HTTP API** — `MarketStreamHttp`: `GET /markets` + JSON decoding
//! 4. **Domain** — `Markets` sub-client: classification into `ListedMarkets`
//! 5. **High-Level Client** — `MarketStreamClient` with builder and session state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use market_stream::prelude::*;
//!
//! let client = MarketStreamClient::builder()
//!     .base_url("https://ftx.com/api")
//!     .build()?;
//!
//! let listed = client.markets().fetch_listed_markets().await?;
//! println!("{} spot, {} futures", listed.spot.len(), listed.futures.len());
//! ```

// ── Core ─────────────────────────────────────────────────────────────────────

/// Domain modules: market types, wire types, conversion, sub-client.
pub mod domain;

/// Error types for every layer.
pub mod error;

/// Network URL constants.
pub mod network;

/// Caller-owned user session state.
pub mod session;

// ── HTTP ─────────────────────────────────────────────────────────────────────

/// Transport adapter, gateway with retry policy, markets API client.
pub mod http;

// ── High-Level Client ────────────────────────────────────────────────────────

/// `MarketStreamClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Domain types
    pub use crate::domain::market::{
        FuturesMarket, ListedMarkets, Market, MarketType, SpotMarket, UnknownMarket,
    };

    // Errors
    pub use crate::error::{FetchError, HttpError, TransportError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Session
    pub use crate::session::{SessionState, UserSession};

    // HTTP layer
    pub use crate::http::{
        Gateway, HttpMethod, HttpRequest, MarketStreamHttp, MarketsApi, NetworkGateway,
        RequestBody, RetryConfig, Transport,
    };
    #[cfg(feature = "http")]
    pub use crate::http::ReqwestTransport;

    // Client + sub-clients
    pub use crate::client::{MarketStreamClient, MarketsClient};
    #[cfg(feature = "http")]
    pub use crate::client::{HttpMarketsApi, MarketStreamClientBuilder};
}
