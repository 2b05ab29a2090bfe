//! Market data sources feeding the scanner.

pub mod binance;
pub mod market_data;

pub use market_data::{InMemoryMarketDataProvider, MarketDataProvider};
