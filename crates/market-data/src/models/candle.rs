use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MarketDataError;

/// Raw `/stock/candle` response: parallel arrays plus a status flag.
#[derive(Debug, Deserialize)]
pub struct CandleSeries {
    /// "ok" or "no_data"
    #[serde(rename = "s")]
    pub status: String,
    #[serde(rename = "t", default)]
    pub timestamps: Vec<i64>,
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,
}

/// One daily bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp (seconds) of the bar
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl CandleSeries {
    pub fn from_payload(payload: &Value) -> Result<Self, MarketDataError> {
        serde_json::from_value(payload.clone()).map_err(|e| MarketDataError::InvalidPayload {
            message: format!("candles: {}", e),
        })
    }

    /// Zip the arrays into bars. `no_data` yields an empty list.
    ///
    /// Arrays of unequal length are truncated to the shortest one.
    pub fn into_candles(self) -> Vec<Candle> {
        if self.status != "ok" {
            return Vec::new();
        }

        let len = [
            self.timestamps.len(),
            self.open.len(),
            self.high.len(),
            self.low.len(),
            self.close.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0);

        (0..len)
            .map(|i| Candle {
                time: self.timestamps[i],
                open: self.open[i],
                high: self.high[i],
                low: self.low[i],
                close: self.close[i],
                volume: self.volume.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }
}
