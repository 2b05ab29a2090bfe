//! Binance market data provider implementation

use tracing::debug;

use super::client::BinanceRestClient;
use crate::config::{self, AnalyzerConfig};
use crate::error::FetchError;
use crate::models::{Candle, Timeframe};
use crate::services::market_data::MarketDataProvider;

pub struct BinanceMarketDataProvider {
    client: BinanceRestClient,
    limit: u32,
}

impl BinanceMarketDataProvider {
    pub fn new(client: BinanceRestClient, limit: u32) -> Self {
        Self { client, limit }
    }

    /// Client against `BINANCE_BASE_URL` with the configured limit, timeout and retries.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, FetchError> {
        Self::with_base_url(&config::get_binance_base_url(), config)
    }

    /// `fetch_timeout` bounds each attempt; retries happen inside the client.
    pub fn with_base_url(base_url: &str, config: &AnalyzerConfig) -> Result<Self, FetchError> {
        let client = BinanceRestClient::new(base_url, config.fetch_timeout)?
            .with_max_retries(config.fetch_max_retries);
        Ok(Self::new(client, config.kline_limit))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Candle>, FetchError> {
        let candles = self
            .client
            .get_klines(symbol, timeframe, start_time, end_time, self.limit)
            .await?;

        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            count = candles.len(),
            "get_candles for {} {}: {} candles",
            symbol,
            timeframe,
            candles.len()
        );
        Ok(candles)
    }
}
