//! Conversion: MarketChartResponse → raw chart samples.

use super::wire::{MarketChartResponse, WirePricePoint};
use crate::chart::RawSample;

impl From<WirePricePoint> for RawSample {
    fn from(p: WirePricePoint) -> Self {
        RawSample {
            timestamp: p.0,
            price: p.1,
        }
    }
}

impl MarketChartResponse {
    /// Price samples in API order (ascending time).
    pub fn into_samples(self) -> Vec<RawSample> {
        self.prices.into_iter().map(RawSample::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_samples_keeps_gaps() {
        let resp = MarketChartResponse {
            prices: vec![
                WirePricePoint(1_709_596_800, Some(1.5)),
                WirePricePoint(1_709_600_400, None),
            ],
            ..Default::default()
        };
        let samples = resp.into_samples();
        assert_eq!(samples[0], RawSample::new(1_709_596_800, 1.5));
        assert_eq!(samples[1], RawSample::missing(1_709_600_400));
    }
}
