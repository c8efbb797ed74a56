//! Coin domain — detail view of a single coin.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::fmt::num::{display, format_percent};
use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::domain::market::ValidationError;

/// One coin with its market snapshot, priced in every quote currency the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetails {
    pub id: CoinId,
    /// Upper-cased ticker, e.g. `ETH`.
    pub symbol: String,
    pub name: String,
    /// Largest image URL available.
    pub image: Option<String>,
    pub market_cap_rank: Option<u32>,
    /// Keyed by lower-case quote currency (`usd`, `eur`, ...).
    pub current_price: BTreeMap<String, f64>,
    pub market_cap: BTreeMap<String, f64>,
    pub high_24h: BTreeMap<String, f64>,
    pub low_24h: BTreeMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: Option<String>,
}

impl CoinDetails {
    pub fn price_in(&self, vs_currency: &str) -> Option<f64> {
        self.current_price.get(&vs_currency.to_lowercase()).copied()
    }

    pub fn market_cap_in(&self, vs_currency: &str) -> Option<f64> {
        self.market_cap.get(&vs_currency.to_lowercase()).copied()
    }

    /// `(low, high)` over the last 24h, when both are known.
    pub fn range_24h(&self, vs_currency: &str) -> Option<(f64, f64)> {
        let vs = vs_currency.to_lowercase();
        Some((*self.low_24h.get(&vs)?, *self.high_24h.get(&vs)?))
    }

    pub fn is_up_24h(&self) -> bool {
        self.price_change_percentage_24h.is_some_and(|p| p >= 0.0)
    }

    /// Price with the currency code, e.g. `3,120.5 USD`. `N/A` when unknown.
    pub fn price_label(&self, vs_currency: &str) -> String {
        match self.price_in(vs_currency) {
            Some(p) => format!("{} {}", display(p), vs_currency.to_uppercase()),
            None => "N/A".to_string(),
        }
    }

    /// `Ethereum (ETH)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    pub fn change_label(&self) -> String {
        self.price_change_percentage_24h
            .map_or_else(|| "-".to_string(), |p| format_percent(p, 2))
    }
}
