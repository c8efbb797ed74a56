//! Market domain — coin listings ranked by market cap.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::fmt::num::{display, format_percent};
use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: CoinId,
    /// Upper-cased ticker, e.g. `BTC`.
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinMarket {
    pub fn is_up_24h(&self) -> bool {
        self.price_change_percentage_24h.is_some_and(|p| p >= 0.0)
    }

    /// Price for list rows, e.g. `$64,250` or `$0.0123`. `-` when unknown.
    pub fn price_label(&self) -> String {
        match self.current_price {
            Some(p) => format!("${}", display(p)),
            None => "-".to_string(),
        }
    }

    /// 24h change, e.g. `-1.25%`. `-` when unknown.
    pub fn change_label(&self) -> String {
        self.price_change_percentage_24h
            .map_or_else(|| "-".to_string(), |p| format_percent(p, 2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingId,
    MissingSymbol { id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Missing coin id"),
            ValidationError::MissingSymbol { id } => write!(f, "Missing symbol for {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}
