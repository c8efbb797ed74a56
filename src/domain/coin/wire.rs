//! Wire types for `/coins/{id}`.

use serde::Deserialize;
use std::collections::HashMap;

/// Body of `/coins/{id}` with `market_data=true` and every other section disabled.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetailsResponse {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<CoinImageResponse>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: Option<CoinMarketDataResponse>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinImageResponse {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Per-currency maps; individual quotes may be `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinMarketDataResponse {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub high_24h: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub low_24h: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}
