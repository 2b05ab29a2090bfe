//! Kline row decoding.
//!
//! The endpoint answers with an array of positional rows:
//! `[open_time, "open", "high", "low", "close", "volume", close_time, ...]`.

use serde_json::Value;
use thiserror::Error;

use crate::models::Candle;

const MIN_ROW_LEN: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum KlineError {
    #[error("kline row {row} has {len} fields, expected at least 6")]
    InvalidLength { row: usize, len: usize },

    #[error("kline row {row}: invalid {field}")]
    InvalidType { row: usize, field: &'static str },

    #[error("response is not an array of kline rows: {0}")]
    NotAnArray(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinanceKline {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl BinanceKline {
    fn from_row(row: usize, fields: &[Value]) -> Result<Self, KlineError> {
        if fields.len() < MIN_ROW_LEN {
            return Err(KlineError::InvalidLength {
                row,
                len: fields.len(),
            });
        }

        let open_time = fields[0]
            .as_i64()
            .ok_or(KlineError::InvalidType { row, field: "open_time" })?;

        Ok(Self {
            open_time,
            open: price_field(row, &fields[1], "open")?,
            high: price_field(row, &fields[2], "high")?,
            low: price_field(row, &fields[3], "low")?,
            close: price_field(row, &fields[4], "close")?,
            volume: price_field(row, &fields[5], "volume")?,
        })
    }
}

impl From<BinanceKline> for Candle {
    fn from(k: BinanceKline) -> Self {
        Candle::new(k.open, k.high, k.low, k.close, k.volume, k.open_time)
    }
}

// Prices arrive as decimal strings; plain numbers are accepted too.
fn price_field(row: usize, value: &Value, field: &'static str) -> Result<f64, KlineError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or(KlineError::InvalidType { row, field })
}

/// Decode a klines response body into candles sorted by open time.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>, KlineError> {
    let rows: Vec<Vec<Value>> =
        serde_json::from_str(body).map_err(|e| KlineError::NotAnArray(e.to_string()))?;

    let mut candles = rows
        .iter()
        .enumerate()
        .map(|(row, fields)| BinanceKline::from_row(row, fields).map(Candle::from))
        .collect::<Result<Vec<_>, _>>()?;

    candles.sort_by_key(|c| c.timestamp);
    Ok(candles)
}
