use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MarketDataError;

/// Latest quote for a symbol, in Finnhub's short field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Current price
    #[serde(rename = "c")]
    pub current: f64,

    /// Absolute change since previous close
    #[serde(rename = "d", default)]
    pub change: Option<f64>,

    /// Percent change since previous close
    #[serde(rename = "dp", default)]
    pub percent_change: Option<f64>,

    #[serde(rename = "h", default)]
    pub high: Option<f64>,

    #[serde(rename = "l", default)]
    pub low: Option<f64>,

    #[serde(rename = "o", default)]
    pub open: Option<f64>,

    #[serde(rename = "pc", default)]
    pub previous_close: Option<f64>,

    /// Unix timestamp of the quote
    #[serde(rename = "t", default)]
    pub timestamp: Option<i64>,
}

impl QuoteSnapshot {
    /// Interpret a cached or freshly fetched `/quote` payload.
    ///
    /// Finnhub answers unknown symbols with an all-zero body, which is
    /// reported as an invalid payload.
    pub fn from_payload(payload: &Value) -> Result<Self, MarketDataError> {
        let quote: QuoteSnapshot =
            serde_json::from_value(payload.clone()).map_err(|e| MarketDataError::InvalidPayload {
                message: format!("quote: {}", e),
            })?;

        if quote.current == 0.0 && quote.previous_close.unwrap_or(0.0) == 0.0 {
            return Err(MarketDataError::InvalidPayload {
                message: "quote has no price".to_string(),
            });
        }

        Ok(quote)
    }

    /// Percent change, zero when the provider omitted it.
    pub fn change_percent(&self) -> f64 {
        self.percent_change.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_quote_payload() {
        let payload = json!({
            "c": 446.74, "d": 17.5, "dp": 4.08, "h": 450.0,
            "l": 430.2, "o": 431.0, "pc": 429.24, "t": 1704067200
        });

        let quote = QuoteSnapshot::from_payload(&payload).unwrap();
        assert_eq!(quote.current, 446.74);
        assert_eq!(quote.change, Some(17.5));
        assert_eq!(quote.change_percent(), 4.08);
        assert_eq!(quote.timestamp, Some(1704067200));
    }

    #[test]
    fn test_partial_quote_defaults() {
        let quote = QuoteSnapshot::from_payload(&json!({ "c": 10.0 })).unwrap();
        assert_eq!(quote.change_percent(), 0.0);
        assert!(quote.high.is_none());
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let payload = json!({ "c": 0, "d": null, "dp": null, "h": 0, "l": 0, "o": 0, "pc": 0, "t": 0 });
        assert!(QuoteSnapshot::from_payload(&payload).is_err());
    }

    #[test]
    fn test_missing_price_rejected() {
        let err = QuoteSnapshot::from_payload(&json!({ "error": "nope" })).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidPayload { .. }));
    }
}
