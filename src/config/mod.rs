//! Environment-driven configuration.
//!
//! Every value has a default so the analyzer runs without any `.env`. Values
//! are read once into an [`AnalyzerConfig`] and passed explicitly to the
//! scanner and providers.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, InvalidInputError};
use crate::models::Timeframe;
use crate::optimizer::validate_balance;

pub const DEFAULT_INITIAL_BALANCE: f64 = 100_000.0;
pub const DEFAULT_BINANCE_BASE_URL: &str = "https://api.binance.us";
/// Provider-side cap on candles per kline request.
pub const MAX_KLINE_LIMIT: u32 = 1000;
/// Backoff bounds between retries of a transient fetch failure.
pub const RETRY_MIN_DELAY: Duration = Duration::from_millis(200);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_binance_base_url() -> String {
    env::var("BINANCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BINANCE_BASE_URL.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Notional capital committed to every trade.
    pub initial_balance: f64,
    /// Candidates for a scan, in scan order.
    pub timeframes: Vec<Timeframe>,
    pub kline_limit: u32,
    /// Per-request timeout. `None` disables it.
    pub fetch_timeout: Option<Duration>,
    pub fetch_max_retries: usize,
    pub concurrent_fetches: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            timeframes: Timeframe::default_scan_set(),
            kline_limit: MAX_KLINE_LIMIT,
            fetch_timeout: Some(Duration::from_secs(30)),
            fetch_max_retries: 3,
            concurrent_fetches: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Replace the balance, e.g. from a command-line flag.
    pub fn with_initial_balance(mut self, balance: f64) -> Result<Self, InvalidInputError> {
        validate_balance(balance)?;
        self.initial_balance = balance;
        Ok(self)
    }

    /// Upper bound on one fetch including all retries and their backoff.
    /// `None` when requests have no timeout.
    pub fn fetch_budget(&self) -> Option<Duration> {
        let retries = u32::try_from(self.fetch_max_retries).unwrap_or(u32::MAX);
        self.fetch_timeout.map(|per_attempt| {
            // Jitter can stretch a backoff delay up to twice its base.
            per_attempt
                .saturating_mul(retries.saturating_add(1))
                .saturating_add(RETRY_MAX_DELAY.saturating_mul(2).saturating_mul(retries))
        })
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("INITIAL_BALANCE") {
            let balance: f64 = parse_value("INITIAL_BALANCE", &raw)?;
            if !(balance.is_finite() && balance > 0.0) {
                return Err(invalid("INITIAL_BALANCE", &raw, "must be a positive number"));
            }
            config.initial_balance = balance;
        }

        if let Some(raw) = lookup("SCAN_TIMEFRAMES") {
            let timeframes = Timeframe::parse_list(&raw)
                .map_err(|e| invalid("SCAN_TIMEFRAMES", &raw, &e.to_string()))?;
            if timeframes.is_empty() {
                return Err(invalid("SCAN_TIMEFRAMES", &raw, "no timeframes listed"));
            }
            config.timeframes = timeframes;
        }

        if let Some(raw) = lookup("KLINE_LIMIT") {
            let limit: u32 = parse_value("KLINE_LIMIT", &raw)?;
            if limit == 0 || limit > MAX_KLINE_LIMIT {
                return Err(invalid("KLINE_LIMIT", &raw, "must be between 1 and 1000"));
            }
            config.kline_limit = limit;
        }

        if let Some(raw) = lookup("FETCH_TIMEOUT_SECONDS") {
            let secs: u64 = parse_value("FETCH_TIMEOUT_SECONDS", &raw)?;
            config.fetch_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup("FETCH_MAX_RETRIES") {
            config.fetch_max_retries = parse_value("FETCH_MAX_RETRIES", &raw)?;
        }

        if let Some(raw) = lookup("CONCURRENT_FETCHES") {
            config.concurrent_fetches = parse_flag("CONCURRENT_FETCHES", &raw)?;
        }

        Ok(config)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(key, raw, &e.to_string()))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, raw, "expected a boolean")),
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
