//! Integration tests against the live market-data API.
//!
//! All tests are `#[ignore]` because they require network access and are
//! subject to the public rate limit. An optional demo key is read from
//! `COINGECKO_API_KEY` (a `.env` file is honoured).
//!
//! Run with:
//! ```bash
//! cargo test --features native --test api_integration -- --ignored --test-threads=1
//! ```

use std::time::Duration;

use coinchart_sdk::prelude::*;

fn client() -> CoinChartClient {
    let _ = dotenvy::dotenv();
    let mut builder = CoinChartClient::builder().retry(RetryPolicy::Custom(RetryConfig {
        max_retries: 1,
        ..RetryConfig::idempotent()
    }));
    if let Ok(key) = std::env::var("COINGECKO_API_KEY") {
        builder = builder.api_key(key);
    }
    builder.build().expect("client should build")
}

#[tokio::test]
#[ignore]
async fn test_markets_list() {
    let client = client();
    let markets = client.markets().list("usd", 10).await.expect("markets");
    assert!(!markets.is_empty());
    assert!(markets.len() <= 10);
    assert!(markets.iter().any(|m| m.id == CoinId::from("bitcoin")));
    assert!(markets.iter().all(|m| !m.symbol.is_empty()));
}

#[tokio::test]
#[ignore]
async fn test_history_is_cached() {
    let client = client();
    let id = CoinId::from("bitcoin");

    let first = client
        .charts()
        .history(&id, "usd", ChartRange::Day1)
        .await
        .expect("history");
    assert!(first.len() > 10);
    assert!(first.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    // Served from the TTL cache: identical and instant.
    let started = std::time::Instant::now();
    let second = client
        .charts()
        .history(&id, "usd", ChartRange::Day1)
        .await
        .expect("cached history");
    assert_eq!(first, second);
    assert!(started.elapsed() < Duration::from_millis(50));
}

#[tokio::test]
#[ignore]
async fn test_compare_produces_aligned_frame() {
    let client = client();
    let opts = ChartOptions::default().with_size(360.0, 240.0);
    let state = client
        .charts()
        .compare(
            &CoinId::from("bitcoin"),
            &CoinId::from("ethereum"),
            "usd",
            ChartRange::Day7,
            &opts,
        )
        .await
        .expect("compare");

    let frame = state.frame().expect("both series should have data");
    assert_eq!(frame.series.len(), 2);
    assert_eq!(frame.series[0].points.len(), frame.series[1].points.len());
    assert_eq!(frame.series[0].points[0].value, 0.0);
    assert!(frame.tooltip_at(180.0).is_some());
}

#[tokio::test]
#[ignore]
async fn test_unknown_coin_is_insufficient_data() {
    let client = client();
    let state = client
        .charts()
        .single(
            &CoinId::from("definitely-not-a-coin-id"),
            "usd",
            ChartRange::Day1,
            &ChartOptions::default(),
        )
        .await
        .expect("single");
    assert_eq!(state, ChartState::InsufficientData);
}

#[tokio::test]
#[ignore]
async fn test_coin_details() {
    let client = client();
    let coin = client
        .coins()
        .get(&CoinId::from("ethereum"))
        .await
        .expect("coin details");
    assert_eq!(coin.symbol, "ETH");
    assert!(coin.price_in("usd").is_some_and(|p| p > 0.0));
}
