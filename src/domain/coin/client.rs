//! Coins sub-client — single-coin details.

use super::CoinDetails;
use crate::client::CoinChartClient;
use crate::error::SdkError;
use crate::shared::CoinId;

/// Sub-client for single-coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a CoinChartClient,
}

impl<'a> Coins<'a> {
    /// Details and market snapshot for one coin. Uses TTL cache.
    pub async fn get(&self, id: &CoinId) -> Result<CoinDetails, SdkError> {
        if id.as_str().trim().is_empty() {
            return Err(SdkError::Validation("Coin id is required".to_string()));
        }
        let body = self.client.http.get_coin(id).await?;
        CoinDetails::try_from(body).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Drop the cached details for one coin.
    pub async fn invalidate(&self, id: &CoinId) {
        self.client
            .http
            .invalidate(&crate::http::client::coin_cache_key(id))
            .await;
    }
}
