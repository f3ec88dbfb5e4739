//! Wire types for the markets endpoint (REST).

use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /markets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketsResponse {
    pub success: bool,
    pub result: Vec<MarketRecord>,
}

/// One raw market as listed by the exchange.
///
/// `ask`, `bid`, `post_only` and the increments are required on the wire but
/// are not carried into the domain types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_currency: Option<String>,
    #[serde(rename = "type")]
    pub market_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    pub enabled: bool,
    pub ask: f64,
    pub bid: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,
    pub post_only: bool,
    pub price_increment: f64,
    pub size_increment: f64,
    pub restricted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_record_deserialize() {
        let json = r#"{
            "name": "BTC/USD",
            "baseCurrency": "BTC",
            "quoteCurrency": "USD",
            "type": "spot",
            "underlying": null,
            "enabled": true,
            "ask": 50001.0,
            "bid": 49999.0,
            "last": 50000.0,
            "postOnly": false,
            "priceIncrement": 1.0,
            "sizeIncrement": 0.0001,
            "restricted": false,
            "volumeUsd24h": 1234567.8
        }"#;
        let record: MarketRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "BTC/USD");
        assert_eq!(record.base_currency.as_deref(), Some("BTC"));
        assert_eq!(record.market_type, "spot");
        assert!(record.underlying.is_none());
        assert_eq!(record.last, Some(50000.0));
        assert_eq!(record.size_increment, 0.0001);
    }

    #[test]
    fn test_future_record_with_missing_optionals() {
        let json = r#"{
            "name": "BTC-PERP",
            "type": "future",
            "underlying": "BTC",
            "enabled": true,
            "ask": 1.0,
            "bid": 1.0,
            "postOnly": false,
            "priceIncrement": 1.0,
            "sizeIncrement": 0.001,
            "restricted": true
        }"#;
        let record: MarketRecord = serde_json::from_str(json).unwrap();
        assert!(record.base_currency.is_none());
        assert!(record.quote_currency.is_none());
        assert!(record.last.is_none());
        assert_eq!(record.underlying.as_deref(), Some("BTC"));
        assert!(record.restricted);
    }

    #[test]
    fn test_record_missing_required_field_fails() {
        let json = r#"{"name": "BTC/USD", "type": "spot", "enabled": true}"#;
        assert!(serde_json::from_str::<MarketRecord>(json).is_err());
    }

    #[test]
    fn test_empty_envelope() {
        let resp: MarketsResponse =
            serde_json::from_str(r#"{"success": true, "result": []}"#).unwrap();
        assert!(resp.success);
        assert!(resp.result.is_empty());
    }
}
