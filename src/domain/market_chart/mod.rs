//! Market chart domain — historical price series for one coin.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod state;
pub mod wire;

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};

pub use crate::shared::ChartRange;
pub use state::{ChartRequestTracker, RequestTicket};

/// Everything that identifies one historical series request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketChartQuery {
    pub coin_id: CoinId,
    pub vs_currency: String,
    pub range: ChartRange,
}

impl MarketChartQuery {
    pub fn new(coin_id: impl Into<CoinId>, vs_currency: &str, range: ChartRange) -> Self {
        Self {
            coin_id: coin_id.into(),
            vs_currency: vs_currency.to_lowercase(),
            range,
        }
    }

    /// `chart_{id}_{vs}_{days}`, suffixed with `_daily` for daily-interval ranges.
    pub fn cache_key(&self) -> String {
        let mut key = format!(
            "chart_{}_{}_{}",
            self.coin_id,
            self.vs_currency,
            self.range.days()
        );
        if let Some(interval) = self.range.interval() {
            key.push('_');
            key.push_str(interval);
        }
        key
    }
}

/// Key for a two-coin comparison, used with [`ChartRequestTracker`].
pub fn compare_key(a: &MarketChartQuery, b: &MarketChartQuery) -> String {
    format!("{}|{}", a.cache_key(), b.cache_key())
}
