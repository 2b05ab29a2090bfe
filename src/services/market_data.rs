//! Market data provider interface consumed by the scanner.

use std::collections::HashMap;

use crate::error::FetchError;
use crate::models::{Candle, Timeframe};

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Candles for `symbol` bucketed at `timeframe` between `start_time` and
    /// `end_time` (inclusive, epoch ms), ascending by timestamp. May return
    /// fewer candles than the window spans, including none.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Candle>, FetchError>;
}

/// Serves pre-loaded series per timeframe. Unknown timeframes fail with a 404.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<Timeframe, Result<Vec<Candle>, FetchError>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.series.insert(timeframe, Ok(candles));
        self
    }

    pub fn with_failure(mut self, timeframe: Timeframe, error: FetchError) -> Self {
        self.series.insert(timeframe, Err(error));
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Candle>, FetchError> {
        match self.series.get(&timeframe) {
            Some(Ok(candles)) => Ok(candles
                .iter()
                .filter(|c| c.timestamp >= start_time && c.timestamp <= end_time)
                .copied()
                .collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::status(
                404,
                format!("no {} data loaded for {}", timeframe, symbol),
            )),
        }
    }
}
