//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens at the sub-client boundary). Internal to the SDK — the high-level
//! client wraps this.

use crate::domain::coin::wire::CoinDetailsResponse;
use crate::domain::market::wire::CoinMarketResponse;
use crate::domain::market_chart::wire::MarketChartResponse;
use crate::domain::market_chart::MarketChartQuery;
use crate::error::HttpError;
use crate::http::cache::{ResponseCache, DEFAULT_COOLDOWN};
use crate::http::retry::RetryPolicy;
use crate::network::{API_KEY_HEADER, API_KEY_PARAM};
use crate::shared::CoinId;

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Cache key for a `/coins/markets` listing.
pub fn markets_cache_key(vs_currency: &str, per_page: u32) -> String {
    format!("market_{}_{}", vs_currency.to_lowercase(), per_page)
}

/// Cache key for `/coins/{id}` details.
pub fn coin_cache_key(id: &CoinId) -> String {
    format!("coin_{}", id)
}

/// Low-level HTTP client for the market-data REST API.
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    /// Demo API key. Sent as header and query parameter.
    api_key: Option<String>,
    retry: RetryPolicy,
    pub(crate) cache: Arc<RwLock<ResponseCache>>,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str) -> Self {
        Self::with_cache(base_url, ResponseCache::default())
    }

    pub fn with_cache(base_url: &str, cache: ResponseCache) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            api_key: None,
            retry: RetryPolicy::default(),
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn invalidate(&self, key: &str) {
        self.cache.write().await.invalidate(key);
    }

    pub(crate) async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Time left on the rate-limit cooldown, if one is active.
    pub async fn cooldown_remaining(&self) -> Option<Duration> {
        self.cache.read().await.cooldown_remaining()
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub async fn get_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url,
            urlencoding::encode(&vs_currency.to_lowercase()),
            per_page
        );
        self.get_cached(&url, &markets_cache_key(vs_currency, per_page))
            .await
    }

    // ── Coin details ─────────────────────────────────────────────────────

    pub async fn get_coin(&self, id: &CoinId) -> Result<CoinDetailsResponse, HttpError> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        self.get_cached(&url, &coin_cache_key(id)).await
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        query: &MarketChartQuery,
    ) -> Result<MarketChartResponse, HttpError> {
        let mut url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(query.coin_id.as_str()),
            urlencoding::encode(&query.vs_currency),
            query.range.days()
        );
        if let Some(interval) = query.range.interval() {
            url = format!("{}&interval={}", url, interval);
        }
        self.get_cached(&url, &query.cache_key()).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get_cached<T: DeserializeOwned>(&self, url: &str, key: &str) -> Result<T, HttpError> {
        let hit = self.cache.write().await.get(key);
        let body = match hit {
            Some(body) => {
                tracing::debug!(key, "Cache hit");
                body
            }
            None => {
                let body = self.request_with_retry(url).await?;
                self.cache.write().await.insert(key, body.clone());
                body
            }
        };
        serde_json::from_value(body).map_err(|e| HttpError::InvalidResponse(e.to_string()))
    }

    fn with_key_param(&self, url: &str) -> String {
        match &self.api_key {
            Some(key) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}{}={}", url, sep, API_KEY_PARAM, urlencoding::encode(key))
            }
            None => url.to_string(),
        }
    }

    async fn wait_for_cooldown(&self) {
        let remaining = self.cache.read().await.cooldown_remaining();
        if let Some(wait) = remaining {
            tracing::warn!(
                wait_ms = wait.as_millis() as u64,
                "Rate-limit cooldown active, waiting"
            );
            futures_timer::Delay::new(wait).await;
        }
    }

    /// Start the shared cooldown when `error` is a 429. Returns whether it was.
    async fn enter_cooldown_if_limited(&self, error: &HttpError) -> bool {
        let HttpError::RateLimited { retry_after_ms } = error else {
            return false;
        };
        let cooldown = retry_after_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COOLDOWN);
        tracing::warn!(
            cooldown_ms = cooldown.as_millis() as u64,
            "Rate limited (429), entering cooldown"
        );
        self.cache.write().await.set_cooldown(cooldown);
        true
    }

    async fn request_with_retry(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        let full_url = self.with_key_param(url);
        let config = match self.retry.config() {
            Some(c) => c,
            None => {
                self.wait_for_cooldown().await;
                let result = self.do_request(&full_url).await;
                if let Err(e) = &result {
                    self.enter_cooldown_if_limited(e).await;
                }
                return result;
            }
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            self.wait_for_cooldown().await;
            match self.do_request(&full_url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if self.enter_cooldown_if_limited(&e).await {
                        if attempt < config.max_retries && config.retryable_statuses.contains(&429) {
                            last_error = Some(e);
                            continue;
                        }
                        return Err(e);
                    }

                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        let mut req = self.client.get(url);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<serde_json::Value>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after_ms);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are not supported.
fn parse_retry_after_ms(value: &str) -> Option<u64> {
    let secs: f64 = value.trim().parse().ok()?;
    if secs.is_finite() && secs > 0.0 {
        Some((secs * 1000.0).round() as u64)
    } else {
        None
    }
}

impl Clone for CoinGeckoHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            retry: self.retry.clone(),
            cache: self.cache.clone(),
        }
    }
}
