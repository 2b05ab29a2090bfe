//! REST client for the public kline endpoint.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use tracing::{debug, warn};

use super::klines::parse_klines;
use crate::config::{MAX_KLINE_LIMIT, RETRY_MAX_DELAY, RETRY_MIN_DELAY};
use crate::error::FetchError;
use crate::models::{Candle, Timeframe};

pub struct BinanceRestClient {
    base_url: String,
    client: Client,
    max_retries: usize,
}

impl BinanceRestClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            max_retries: 3,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Fetch up to `limit` candles (clamped to 1..=1000), retrying transient failures.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Timeframe,
        start_time: i64,
        end_time: i64,
        limit: u32,
    ) -> Result<Vec<Candle>, FetchError> {
        let limit = limit.clamp(1, MAX_KLINE_LIMIT);
        let backoff = ExponentialBuilder::default()
            .with_min_delay(RETRY_MIN_DELAY)
            .with_max_delay(RETRY_MAX_DELAY)
            .with_max_times(self.max_retries)
            .with_jitter();

        (|| self.request_klines(symbol, interval, start_time, end_time, limit))
            .retry(backoff)
            .when(FetchError::is_transient)
            .notify(|err: &FetchError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    interval = %interval,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "klines request failed, retrying in {:?}",
                    delay
                );
            })
            .await
    }

    async fn request_klines(
        &self,
        symbol: &str,
        interval: Timeframe,
        start_time: i64,
        end_time: i64,
        limit: u32,
    ) -> Result<Vec<Candle>, FetchError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        debug!(symbol = %symbol, interval = %interval, start_time, end_time, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("interval", interval.as_str().to_string()),
                ("startTime", start_time.to_string()),
                ("endTime", end_time.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), body));
        }

        parse_klines(&body).map_err(|e| FetchError::malformed(Some(status.as_u16()), e.to_string()))
    }
}
