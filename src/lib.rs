//! # CoinChart SDK
//!
//! Price-history charts for one or two crypto assets: fetch, normalize,
//! resample and map to pixels, with nearest-point lookup for tooltips.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Chart pipeline, domain models, formatting (always available, no I/O)
//! 2. **HTTP API** — `CoinGeckoHttp` with response cache, cooldown and retry policies
//! 3. **High-Level Client** — `CoinChartClient` with nested sub-clients (`markets`, `coins`, `charts`)
//!
//! ## Features
//!
//! - `http` (default): HTTP and high-level client, without a TLS backend.
//! - `native`: `http` plus rustls. Needed to reach the public `https://` API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinchart_sdk::prelude::*;
//!
//! let client = CoinChartClient::builder().build()?;
//!
//! let state = client
//!     .charts()
//!     .compare(&"bitcoin".into(), &"ethereum".into(), "usd", ChartRange::Day7, &ChartOptions::default())
//!     .await?;
//!
//! if let Some(frame) = state.frame() {
//!     let svg = frame.to_svg(&ChartTheme::default());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting used across all modules.
pub mod shared;

/// Chart data pipeline: normalize, resample, domain, geometry, hit-testing.
pub mod chart;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with response cache and retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinChartClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ChartRange, CoinId, Timestamp};

    // Chart pipeline
    pub use crate::chart::{
        build_chart, build_compare_chart, build_single_chart, compute_domain, map_to_pixels,
        nearest_index, normalize, resample, AxisLabel, AxisTick, ChartFrame, ChartMode,
        ChartOptions, ChartState, ChartTheme, Domain, MappedPoint, Point, Polyline, RawSample,
        RenderBackend, Series, SvgBackend, Tooltip, Viewport,
    };

    // Domain types
    pub use crate::domain::coin::CoinDetails;
    pub use crate::domain::market::CoinMarket;
    pub use crate::domain::market_chart::{ChartRequestTracker, MarketChartQuery, RequestTicket};

    // Errors
    pub use crate::error::{ChartError, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ChartsClient, CoinChartClient, CoinChartClientBuilder, CoinsClient, MarketsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
