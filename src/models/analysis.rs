//! Result records handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::candle::Candle;
use super::timeframe::Timeframe;
use super::trade::{pair_profit, Trade};
use crate::error::AnalysisError;

/// Profit of holding from the first to the last candle of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyHoldBaseline {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub start_price: f64,
    pub end_price: f64,
    pub profit: f64,
    pub profit_percentage: f64,
}

impl BuyHoldBaseline {
    pub fn zero() -> Self {
        Self {
            start_timestamp: 0,
            end_timestamp: 0,
            start_price: 0.0,
            end_price: 0.0,
            profit: 0.0,
            profit_percentage: 0.0,
        }
    }

    /// Zero-profit baseline anchored on a lone candle.
    pub fn flat(candle: &Candle) -> Self {
        Self {
            start_timestamp: candle.timestamp,
            end_timestamp: candle.timestamp,
            start_price: candle.close,
            end_price: candle.close,
            profit: 0.0,
            profit_percentage: 0.0,
        }
    }

    pub fn between(first: &Candle, last: &Candle, initial_balance: f64) -> Self {
        let profit = pair_profit(first.close, last.close, initial_balance);
        Self {
            start_timestamp: first.timestamp,
            end_timestamp: last.timestamp,
            start_price: first.close,
            end_price: last.close,
            profit,
            profit_percentage: profit / initial_balance * 100.0,
        }
    }
}

/// Optimizer output for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub initial_balance: f64,
    pub candle_count: usize,
    pub trades: Vec<Trade>,
    pub total_profit: f64,
    pub total_profit_percentage: f64,
    /// Absent when there are no trades.
    pub average_profit_percentage: Option<f64>,
    pub best_trade: Option<Trade>,
    pub buy_hold: BuyHoldBaseline,
    pub entry_exit_pairs_tested: u64,
    pub combinations_tested: u64,
}

impl AnalysisResult {
    pub fn has_trades(&self) -> bool {
        !self.trades.is_empty()
    }

    /// How much the optimal sequence beats holding the instrument.
    pub fn outperformance(&self) -> f64 {
        self.total_profit - self.buy_hold.profit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    InvalidInput,
}

/// One timeframe that could not be analysed during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeFailure {
    pub timeframe: Timeframe,
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub reason: String,
}

impl TimeframeFailure {
    pub fn new(timeframe: Timeframe, error: &AnalysisError) -> Self {
        let (kind, status) = match error {
            AnalysisError::InvalidInput(_) => (FailureKind::InvalidInput, None),
            AnalysisError::Fetch(fetch) => (FailureKind::Fetch, fetch.status),
        };
        Self {
            timeframe,
            kind,
            status,
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSummary {
    pub timeframe: Timeframe,
    pub candle_count: usize,
    pub trade_count: usize,
    pub total_profit: f64,
}

impl TimeframeSummary {
    pub fn of(timeframe: Timeframe, result: &AnalysisResult) -> Self {
        Self {
            timeframe,
            candle_count: result.candle_count,
            trade_count: result.trades.len(),
            total_profit: result.total_profit,
        }
    }
}

/// Best timeframe of a scan plus everything that went wrong on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub timeframe: Timeframe,
    pub result: AnalysisResult,
    /// Successfully analysed candidates, in scan order.
    pub summaries: Vec<TimeframeSummary>,
    pub failures: Vec<TimeframeFailure>,
}
