//! Markets sub-client — fetch and classify the exchange's listed markets.

use crate::client::MarketStreamClient;
use crate::domain::market::wire::MarketsResponse;
use crate::domain::market::ListedMarkets;
use crate::error::FetchError;
use crate::http::MarketsApi;

/// Sub-client for market operations.
pub struct Markets<'a, A> {
    pub(crate) client: &'a MarketStreamClient<A>,
}

impl<'a, A: MarketsApi> Markets<'a, A> {
    /// Fetch every listed market, bucketed into spot, futures and unknown.
    ///
    /// Fails with [`FetchError::NoMarketsRetrieved`] when the listing is empty.
    pub async fn fetch_listed_markets(&self) -> Result<ListedMarkets, FetchError> {
        let response = self.client.api.fetch_markets().await.map_err(|e| {
            tracing::debug!(error = %e, "markets request failed");
            FetchError::from(&e)
        })?;
        listed_markets(response)
    }
}

/// Classify a decoded listing and decide whether it counts as a success.
pub fn listed_markets(response: MarketsResponse) -> Result<ListedMarkets, FetchError> {
    let listed = ListedMarkets::from(response);

    if listed.is_empty() {
        tracing::warn!("no markets retrieved");
        return Err(FetchError::NoMarketsRetrieved);
    }

    if !listed.unknown.is_empty() {
        tracing::info!(
            unknown = listed.unknown.len(),
            spot = listed.spot.len(),
            futures = listed.futures.len(),
            "listing contains markets of unknown type"
        );
    }

    Ok(listed)
}
