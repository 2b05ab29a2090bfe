//! Multi-timeframe scan: fetch, optimize, keep the most profitable timeframe.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, FetchError, ScanError};
use crate::models::{
    AnalysisResult, Candle, ScanResult, Timeframe, TimeframeFailure, TimeframeSummary,
};
use crate::optimizer::optimize;
use crate::services::market_data::MarketDataProvider;

pub struct TimeframeScanner {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    initial_balance: f64,
    fetch_timeout: Option<Duration>,
    concurrent_fetches: bool,
}

impl TimeframeScanner {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>, initial_balance: f64) -> Self {
        Self {
            provider,
            initial_balance,
            fetch_timeout: None,
            concurrent_fetches: false,
        }
    }

    /// The fetch budget spans every retry of a request, not a single attempt.
    pub fn from_config(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self::new(provider, config.initial_balance)
            .with_fetch_timeout(config.fetch_budget())
            .with_concurrent_fetches(config.concurrent_fetches)
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Issue all fetches of a scan at once. Selection still follows candidate order.
    pub fn with_concurrent_fetches(mut self, concurrent: bool) -> Self {
        self.concurrent_fetches = concurrent;
        self
    }

    /// Analyze one explicitly requested timeframe. Failures go straight to the caller.
    pub async fn analyze_one(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<AnalysisResult, AnalysisError> {
        let candles = self.fetch(symbol, timeframe, start_time, end_time).await?;
        Ok(optimize(&candles, self.initial_balance)?)
    }

    /// Analyze every candidate and return the one with the highest total profit.
    ///
    /// A failing timeframe is logged and skipped; only when every candidate
    /// fails does the scan fail. Ties keep the earliest candidate.
    pub async fn scan(
        &self,
        symbol: &str,
        start_time: i64,
        end_time: i64,
        candidates: &[Timeframe],
    ) -> Result<ScanResult, ScanError> {
        let mut accumulator = ScanAccumulator::default();

        if self.concurrent_fetches {
            // join_all yields results in input order, not arrival order.
            let fetched = join_all(
                candidates
                    .iter()
                    .map(|&tf| self.fetch(symbol, tf, start_time, end_time)),
            )
            .await;

            for (&timeframe, candles) in candidates.iter().zip(fetched) {
                let outcome = candles
                    .map_err(AnalysisError::from)
                    .and_then(|c| optimize(&c, self.initial_balance).map_err(AnalysisError::from));
                accumulator.record(symbol, timeframe, outcome);
            }
        } else {
            for &timeframe in candidates {
                let outcome = self
                    .analyze_one(symbol, timeframe, start_time, end_time)
                    .await;
                accumulator.record(symbol, timeframe, outcome);
            }
        }

        accumulator.finish()
    }

    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Candle>, FetchError> {
        let request = self
            .provider
            .get_candles(symbol, timeframe, start_time, end_time);

        match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| Err(FetchError::timeout(limit))),
            None => request.await,
        }
    }
}

/// Running best result and failure log of a scan, fed in candidate order.
#[derive(Debug, Default)]
pub struct ScanAccumulator {
    best: Option<(Timeframe, AnalysisResult)>,
    summaries: Vec<TimeframeSummary>,
    failures: Vec<TimeframeFailure>,
}

impl ScanAccumulator {
    pub fn record(
        &mut self,
        symbol: &str,
        timeframe: Timeframe,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) {
        match outcome {
            Ok(result) => {
                info!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    candles = result.candle_count,
                    trades = result.trades.len(),
                    total_profit = result.total_profit,
                    "scan: {} {} -> {} trades, profit {:.2}",
                    symbol,
                    timeframe,
                    result.trades.len(),
                    result.total_profit
                );
                self.summaries.push(TimeframeSummary::of(timeframe, &result));

                let improves = match &self.best {
                    Some((_, best)) => result.total_profit > best.total_profit,
                    None => true,
                };
                if improves {
                    self.best = Some((timeframe, result));
                }
            }
            Err(error) => {
                warn!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    error = %error,
                    "scan: skipping {} {}",
                    symbol,
                    timeframe
                );
                self.failures.push(TimeframeFailure::new(timeframe, &error));
            }
        }
    }

    pub fn finish(self) -> Result<ScanResult, ScanError> {
        match self.best {
            Some((timeframe, result)) => Ok(ScanResult {
                timeframe,
                result,
                summaries: self.summaries,
                failures: self.failures,
            }),
            None => Err(ScanError::NoViableTimeframe {
                failures: self.failures,
            }),
        }
    }
}
