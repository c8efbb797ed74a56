//! Conversion: CoinMarketResponse → CoinMarket (TryFrom + validation).

use super::wire::CoinMarketResponse;
use super::{CoinMarket, ValidationError};
use crate::shared::CoinId;

impl TryFrom<CoinMarketResponse> for CoinMarket {
    type Error = ValidationError;

    fn try_from(source: CoinMarketResponse) -> Result<Self, Self::Error> {
        let id = source.id.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        let symbol = source.symbol.trim();
        if symbol.is_empty() {
            return Err(ValidationError::MissingSymbol { id: id.to_string() });
        }
        let name = if source.name.trim().is_empty() {
            id.to_string()
        } else {
            source.name.trim().to_string()
        };

        Ok(CoinMarket {
            id: CoinId::from(id),
            symbol: symbol.to_uppercase(),
            name,
            image: source.image.filter(|s| !s.is_empty()),
            current_price: source.current_price.filter(|p| p.is_finite()),
            market_cap: source.market_cap.filter(|p| p.is_finite()),
            market_cap_rank: source.market_cap_rank,
            price_change_percentage_24h: source
                .price_change_percentage_24h
                .filter(|p| p.is_finite()),
        })
    }
}

/// Convert a listing, skipping rows that fail validation.
pub fn convert_listing(rows: Vec<CoinMarketResponse>) -> Vec<CoinMarket> {
    rows.into_iter()
        .filter_map(|row| match CoinMarket::try_from(row) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("Skipping market row: {}", e);
                None
            }
        })
        .collect()
}
