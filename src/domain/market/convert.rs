//! Conversion: MarketRecord → Market (classification + field projection).

use super::wire::{MarketRecord, MarketsResponse};
use super::{FuturesMarket, ListedMarkets, Market, MarketType, SpotMarket, UnknownMarket};

impl From<MarketRecord> for Market {
    fn from(source: MarketRecord) -> Self {
        match MarketType::classify(&source.market_type) {
            MarketType::Spot => Market::Spot(SpotMarket {
                name: source.name,
                base_currency: source.base_currency.unwrap_or_default(),
                quote_currency: source.quote_currency.unwrap_or_default(),
                enabled: source.enabled,
                last_traded_price: source.last,
                restricted: source.restricted,
            }),
            MarketType::Futures => Market::Futures(FuturesMarket {
                name: source.name,
                underlying: source.underlying.unwrap_or_default(),
                enabled: source.enabled,
                last_traded_price: source.last,
                restricted: source.restricted,
            }),
            MarketType::Unknown(market_type) => Market::Unknown(UnknownMarket {
                name: source.name,
                base_currency: source.base_currency,
                quote_currency: source.quote_currency,
                market_type,
                underlying: source.underlying,
                enabled: source.enabled,
                last_traded_price: source.last,
                restricted: source.restricted,
            }),
        }
    }
}

impl From<MarketsResponse> for ListedMarkets {
    fn from(source: MarketsResponse) -> Self {
        source.result.into_iter().map(Market::from).collect()
    }
}
