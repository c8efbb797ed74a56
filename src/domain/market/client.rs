//! Markets sub-client — ranked coin listings.

use super::convert::convert_listing;
use super::CoinMarket;
use crate::client::CoinChartClient;
use crate::error::SdkError;

/// Sub-client for market overview operations.
pub struct Markets<'a> {
    pub(crate) client: &'a CoinChartClient,
}

impl<'a> Markets<'a> {
    /// Top `per_page` coins by market cap, priced in `vs_currency`. Uses TTL cache.
    pub async fn list(&self, vs_currency: &str, per_page: u32) -> Result<Vec<CoinMarket>, SdkError> {
        let rows = self.client.http.get_markets(vs_currency, per_page).await?;
        Ok(convert_listing(rows))
    }

    /// Drop the cached listing for one currency and page size.
    pub async fn invalidate(&self, vs_currency: &str, per_page: u32) {
        self.client
            .http
            .invalidate(&crate::http::client::markets_cache_key(vs_currency, per_page))
            .await;
    }

    /// Clear every cached response (listings and charts share one cache).
    pub async fn clear_cache(&self) {
        self.client.http.clear_cache().await;
    }
}
