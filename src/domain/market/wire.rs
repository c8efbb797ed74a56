//! Wire types for `/coins/markets`.

use serde::Deserialize;

/// One element of the `/coins/markets` array. Every numeric field is nullable upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarketResponse {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}
