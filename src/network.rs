//! Network URL constants for the market-data API.

/// Default (free/demo tier) REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Paid tier REST API base URL.
pub const PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Header carrying the demo API key.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Query parameter carrying the demo API key.
pub const API_KEY_PARAM: &str = "x_cg_demo_api_key";
