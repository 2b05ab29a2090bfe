use serde::{Deserialize, Serialize};

/// One OHLCV observation. `timestamp` is the bucket open time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, timestamp: i64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Flat candle where every price equals `close`; handy for close-only series.
    pub fn from_close(close: f64, timestamp: i64) -> Self {
        Self::new(close, close, close, close, 0.0, timestamp)
    }
}
