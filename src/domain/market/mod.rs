//! Market domain — classified market types and the listed-markets aggregate.

pub mod client;
mod convert;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── MarketType ──────────────────────────────────────────────────────────────

/// The market kinds the exchange lists. Anything unrecognised keeps its
/// original type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketType {
    Spot,
    Futures,
    Unknown(String),
}

impl MarketType {
    pub const SPOT: &'static str = "spot";
    pub const FUTURES: &'static str = "future";

    /// Exact, case-sensitive match on the wire `type` field.
    pub fn classify(raw: &str) -> Self {
        match raw {
            Self::SPOT => MarketType::Spot,
            Self::FUTURES => MarketType::Futures,
            other => MarketType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MarketType::Spot => Self::SPOT,
            MarketType::Futures => Self::FUTURES,
            MarketType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Markets ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotMarket {
    pub name: String,
    /// Empty when the exchange omits it.
    pub base_currency: String,
    /// Empty when the exchange omits it.
    pub quote_currency: String,
    pub enabled: bool,
    /// `None` when no trade has occurred yet.
    pub last_traded_price: Option<f64>,
    pub restricted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesMarket {
    pub name: String,
    /// Empty when the exchange omits it.
    pub underlying: String,
    pub enabled: bool,
    pub last_traded_price: Option<f64>,
    pub restricted: bool,
}

/// A market whose type this crate does not recognise. Every optional field is
/// kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownMarket {
    pub name: String,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    pub market_type: String,
    pub underlying: Option<String>,
    pub enabled: bool,
    pub last_traded_price: Option<f64>,
    pub restricted: bool,
}

/// A single classified market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Market {
    Spot(SpotMarket),
    Futures(FuturesMarket),
    Unknown(UnknownMarket),
}

impl Market {
    pub fn name(&self) -> &str {
        match self {
            Market::Spot(m) => &m.name,
            Market::Futures(m) => &m.name,
            Market::Unknown(m) => &m.name,
        }
    }

    pub fn market_type(&self) -> MarketType {
        match self {
            Market::Spot(_) => MarketType::Spot,
            Market::Futures(_) => MarketType::Futures,
            Market::Unknown(m) => MarketType::Unknown(m.market_type.clone()),
        }
    }
}

// ─── ListedMarkets ───────────────────────────────────────────────────────────

/// Every market from one listing, bucketed by type. Each bucket keeps the
/// order of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListedMarkets {
    pub spot: Vec<SpotMarket>,
    pub futures: Vec<FuturesMarket>,
    pub unknown: Vec<UnknownMarket>,
}

impl ListedMarkets {
    pub fn push(&mut self, market: Market) {
        match market {
            Market::Spot(m) => self.spot.push(m),
            Market::Futures(m) => self.futures.push(m),
            Market::Unknown(m) => self.unknown.push(m),
        }
    }

    /// Total markets across all buckets.
    pub fn len(&self) -> usize {
        self.spot.len() + self.futures.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Market> for ListedMarkets {
    fn from_iter<I: IntoIterator<Item = Market>>(iter: I) -> Self {
        let mut listed = ListedMarkets::default();
        for market in iter {
            listed.push(market);
        }
        listed
    }
}

impl Extend<Market> for ListedMarkets {
    fn extend<I: IntoIterator<Item = Market>>(&mut self, iter: I) {
        for market in iter {
            self.push(market);
        }
    }
}
