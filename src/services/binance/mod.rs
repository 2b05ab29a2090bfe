//! Binance kline data source.

pub mod client;
pub mod klines;
pub mod provider;

pub use client::BinanceRestClient;
pub use klines::{parse_klines, BinanceKline, KlineError};
pub use provider::BinanceMarketDataProvider;
