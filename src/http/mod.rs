//! HTTP layer — transport adapter, gateway with retry policy, markets API client.

pub mod client;
pub mod gateway;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

pub use client::{MarketStreamHttp, MarketsApi};
pub use gateway::{Gateway, NetworkGateway};
pub use request::{HttpMethod, HttpRequest, RequestBody};
pub use response::{HttpResponse, ResponseBody};
pub use retry::RetryConfig;
pub use transport::{RawResponse, Transport, TransportRequest};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
