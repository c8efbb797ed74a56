//! High-level client — `CoinChartClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::coin::client::Coins;
use crate::domain::market::client::Markets;
use crate::domain::market_chart::client::Charts;
use crate::error::SdkError;
use crate::http::cache::{ResponseCache, DEFAULT_CACHE_TTL};
use crate::http::{CoinGeckoHttp, RetryPolicy};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::market_chart::client::Charts as ChartsClient;

/// Pause between the two sequential fetches of a comparison.
pub const DEFAULT_COMPARE_FETCH_PAUSE: Duration = Duration::from_millis(120);

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.markets()`, `client.coins()`, `client.charts()`.
///
/// Clones share the response cache and the rate-limit cooldown.
pub struct CoinChartClient {
    pub(crate) http: CoinGeckoHttp,
    pub(crate) compare_fetch_pause: Duration,
}

impl CoinChartClient {
    pub fn builder() -> CoinChartClientBuilder {
        CoinChartClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn charts(&self) -> Charts<'_> {
        Charts { client: self }
    }

    /// The underlying low-level HTTP client.
    pub fn http(&self) -> &CoinGeckoHttp {
        &self.http
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.http.clear_cache().await;
    }
}

impl Clone for CoinChartClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            compare_fetch_pause: self.compare_fetch_pause,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

/// Builder for [`CoinChartClient`].
///
/// The default base URL is HTTPS. With only the default `http` feature reqwest
/// has no TLS backend, so enable `native` to reach the public API, or point
/// `base_url` at a plain-HTTP endpoint.
pub struct CoinChartClientBuilder {
    base_url: String,
    api_key: Option<String>,
    cache_ttl: Duration,
    retry: RetryPolicy,
    compare_fetch_pause: Duration,
}

impl Default for CoinChartClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            api_key: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            retry: RetryPolicy::Idempotent,
            compare_fetch_pause: DEFAULT_COMPARE_FETCH_PAUSE,
        }
    }
}

impl CoinChartClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn compare_fetch_pause(mut self, pause: Duration) -> Self {
        self.compare_fetch_pause = pause;
        self
    }

    pub fn build(self) -> Result<CoinChartClient, SdkError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SdkError::Validation(format!(
                "Base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(CoinChartClient {
            http: CoinGeckoHttp::with_cache(base, ResponseCache::new(self.cache_ttl))
                .with_api_key(self.api_key)
                .with_retry(self.retry),
            compare_fetch_pause: self.compare_fetch_pause,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartOptions, ChartState};
    use crate::error::{ChartError, HttpError};
    use crate::shared::{ChartRange, CoinId};

    fn offline_client() -> CoinChartClient {
        CoinChartClient::builder()
            .base_url("http://127.0.0.1:9")
            .retry(RetryPolicy::None)
            .compare_fetch_pause(Duration::ZERO)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let client = CoinChartClient::builder().build().unwrap();
        assert_eq!(client.http().base_url(), crate::network::DEFAULT_API_URL);
        assert!(client.http().base_url().starts_with("https://"));
        assert_eq!(client.compare_fetch_pause, DEFAULT_COMPARE_FETCH_PAUSE);
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let err = CoinChartClient::builder().base_url("ftp://x").build();
        assert!(matches!(err, Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_history_failure_is_http_error() {
        tokio_test::block_on(async {
            let client = offline_client();
            let err = client
                .charts()
                .history(&CoinId::from("bitcoin"), "usd", ChartRange::Day1)
                .await
                .unwrap_err();
            assert!(matches!(err, SdkError::Http(HttpError::Reqwest(_))));
            assert!(err.is_insufficient_data());
        });
    }

    #[test]
    fn test_compare_fetch_failure_is_insufficient_data() {
        tokio_test::block_on(async {
            let client = offline_client();
            let state = client
                .charts()
                .compare(
                    &CoinId::from("bitcoin"),
                    &CoinId::from("ethereum"),
                    "usd",
                    ChartRange::Day7,
                    &ChartOptions::default(),
                )
                .await
                .unwrap();
            assert_eq!(state, ChartState::InsufficientData);
        });
    }

    #[test]
    fn test_compare_served_from_cache() {
        tokio_test::block_on(async {
            let client = offline_client();
            let a = crate::domain::market_chart::MarketChartQuery::new("bitcoin", "usd", ChartRange::Day1);
            let b = crate::domain::market_chart::MarketChartQuery::new("ethereum", "usd", ChartRange::Day1);
            {
                let mut cache = client.http.cache.write().await;
                cache.insert(
                    a.cache_key(),
                    serde_json::json!({"prices": [[1709596800000u64, 100.0], [1709600400000u64, 110.0]]}),
                );
                cache.insert(b.cache_key(), serde_json::json!({"prices": []}));
            }

            let history = client
                .charts()
                .history(&a.coin_id, "usd", ChartRange::Day1)
                .await
                .unwrap();
            assert_eq!(history.len(), 2);

            let err = client
                .charts()
                .history(&b.coin_id, "usd", ChartRange::Day1)
                .await
                .unwrap_err();
            assert!(matches!(err, SdkError::Chart(ChartError::EmptySeries { .. })));

            let single = client
                .charts()
                .single(&a.coin_id, "usd", ChartRange::Day1, &ChartOptions::default())
                .await
                .unwrap();
            assert!(single.is_ready());

            let compare = client
                .charts()
                .compare(&a.coin_id, &b.coin_id, "usd", ChartRange::Day1, &ChartOptions::default())
                .await
                .unwrap();
            assert_eq!(compare, ChartState::InsufficientData);

            client.clear_all_caches().await;
            assert!(client
                .charts()
                .history(&a.coin_id, "usd", ChartRange::Day1)
                .await
                .is_err());
        });
    }

    #[test]
    fn test_coin_details_from_cache_and_invalidate() {
        tokio_test::block_on(async {
            let client = offline_client();
            let id = CoinId::from("ethereum");
            client.http.cache.write().await.insert(
                crate::http::client::coin_cache_key(&id),
                serde_json::json!({"id": "ethereum", "symbol": "eth", "name": "Ethereum",
                                   "market_data": {"current_price": {"usd": 3120.5}}}),
            );

            let coin = client.coins().get(&id).await.unwrap();
            assert_eq!(coin.title(), "Ethereum (ETH)");
            assert_eq!(coin.price_in("usd"), Some(3120.5));

            let err = client.coins().get(&CoinId::from(" ")).await.unwrap_err();
            assert!(matches!(err, SdkError::Validation(_)));

            client.coins().invalidate(&id).await;
            assert!(matches!(
                client.coins().get(&id).await,
                Err(SdkError::Http(HttpError::Reqwest(_)))
            ));
        });
    }
}
