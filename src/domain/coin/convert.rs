//! Conversion: CoinDetailsResponse → CoinDetails.

use super::wire::CoinDetailsResponse;
use super::{CoinDetails, ValidationError};
use crate::shared::CoinId;
use std::collections::{BTreeMap, HashMap};

fn finite_quotes(quotes: HashMap<String, Option<f64>>) -> BTreeMap<String, f64> {
    quotes
        .into_iter()
        .filter_map(|(vs, v)| Some((vs.to_lowercase(), v.filter(|p| p.is_finite())?)))
        .collect()
}

impl TryFrom<CoinDetailsResponse> for CoinDetails {
    type Error = ValidationError;

    fn try_from(source: CoinDetailsResponse) -> Result<Self, Self::Error> {
        let id = source.id.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        let symbol = source.symbol.trim();
        if symbol.is_empty() {
            return Err(ValidationError::MissingSymbol { id: id.to_string() });
        }
        let name = match source.name.trim() {
            "" => id.to_string(),
            n => n.to_string(),
        };
        let image = source
            .image
            .and_then(|img| img.large.or(img.small).or(img.thumb))
            .filter(|s| !s.is_empty());
        let data = source.market_data.unwrap_or_default();

        Ok(CoinDetails {
            id: CoinId::from(id),
            symbol: symbol.to_uppercase(),
            name,
            image,
            market_cap_rank: source.market_cap_rank,
            current_price: finite_quotes(data.current_price),
            market_cap: finite_quotes(data.market_cap),
            high_24h: finite_quotes(data.high_24h),
            low_24h: finite_quotes(data.low_24h),
            price_change_percentage_24h: data
                .price_change_percentage_24h
                .filter(|p| p.is_finite()),
            last_updated: source.last_updated,
        })
    }
}
