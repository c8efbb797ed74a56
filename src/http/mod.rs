//! HTTP client layer — `CoinGeckoHttp` with response cache and retry policies.

pub mod cache;
pub mod client;
pub mod retry;

pub use cache::ResponseCache;
pub use client::CoinGeckoHttp;
pub use retry::{RetryConfig, RetryPolicy};
