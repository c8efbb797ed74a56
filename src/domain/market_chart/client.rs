//! Charts sub-client — historical series and ready-to-render chart frames.

use super::MarketChartQuery;
use crate::chart::{build_compare_chart, build_single_chart, ChartOptions, ChartState, RawSample};
use crate::client::CoinChartClient;
use crate::error::{ChartError, SdkError};
use crate::shared::{ChartRange, CoinId};

/// Sub-client for chart operations.
pub struct Charts<'a> {
    pub(crate) client: &'a CoinChartClient,
}

impl<'a> Charts<'a> {
    /// Raw price history. Uses TTL cache.
    ///
    /// An empty price array is reported as [`ChartError::EmptySeries`].
    pub async fn history(
        &self,
        coin_id: &CoinId,
        vs_currency: &str,
        range: ChartRange,
    ) -> Result<Vec<RawSample>, SdkError> {
        let query = MarketChartQuery::new(coin_id.clone(), vs_currency, range);
        self.fetch(&query, 0).await
    }

    /// Chart state for a single coin.
    pub async fn single(
        &self,
        coin_id: &CoinId,
        vs_currency: &str,
        range: ChartRange,
        options: &ChartOptions,
    ) -> Result<ChartState, SdkError> {
        let query = MarketChartQuery::new(coin_id.clone(), vs_currency, range);
        let samples = match self.fetch(&query, 0).await {
            Ok(s) => s,
            Err(e) => return insufficient(e),
        };
        Ok(ChartState::from_result(build_single_chart(&samples, options))?)
    }

    /// Chart state comparing two coins on a shared axis.
    ///
    /// The two series are fetched one after the other with a short pause in
    /// between to stay under the public API's rate limit.
    pub async fn compare(
        &self,
        a: &CoinId,
        b: &CoinId,
        vs_currency: &str,
        range: ChartRange,
        options: &ChartOptions,
    ) -> Result<ChartState, SdkError> {
        let query_a = MarketChartQuery::new(a.clone(), vs_currency, range);
        let query_b = MarketChartQuery::new(b.clone(), vs_currency, range);

        let series_a = match self.fetch(&query_a, 0).await {
            Ok(s) => s,
            Err(e) => return insufficient(e),
        };
        let pause = self.client.compare_fetch_pause;
        if !pause.is_zero() {
            futures_timer::Delay::new(pause).await;
        }
        let series_b = match self.fetch(&query_b, 1).await {
            Ok(s) => s,
            Err(e) => return insufficient(e),
        };

        Ok(ChartState::from_result(build_compare_chart(
            &series_a, &series_b, options,
        ))?)
    }

    /// Drop the cached history for one query.
    pub async fn invalidate(&self, coin_id: &CoinId, vs_currency: &str, range: ChartRange) {
        let query = MarketChartQuery::new(coin_id.clone(), vs_currency, range);
        self.client.http.invalidate(&query.cache_key()).await;
    }

    async fn fetch(&self, query: &MarketChartQuery, index: usize) -> Result<Vec<RawSample>, SdkError> {
        let samples = self.client.http.get_market_chart(query).await?.into_samples();
        if samples.is_empty() {
            return Err(ChartError::EmptySeries { index }.into());
        }
        Ok(samples)
    }
}

fn insufficient(error: SdkError) -> Result<ChartState, SdkError> {
    if error.is_insufficient_data() {
        tracing::warn!("Chart data unavailable: {}", error);
        Ok(ChartState::InsufficientData)
    } else {
        Err(error)
    }
}
