//! Wire types for `/coins/{id}/market_chart`.

use crate::shared::serde_util::timestamp_number;
use serde::Deserialize;

/// `[timestamp, price]`. The price is `null` for gaps.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WirePricePoint(
    #[serde(deserialize_with = "timestamp_number::deserialize")] pub i64,
    pub Option<f64>,
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<WirePricePoint>,
    #[serde(default)]
    pub market_caps: Vec<WirePricePoint>,
    #[serde(default)]
    pub total_volumes: Vec<WirePricePoint>,
}
