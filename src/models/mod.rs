//! Shared data models spanning the optimizer, scanner and providers.

pub mod analysis;
pub mod candle;
pub mod timeframe;
pub mod trade;

pub use analysis::{
    AnalysisResult, BuyHoldBaseline, FailureKind, ScanResult, TimeframeFailure, TimeframeSummary,
};
pub use candle::Candle;
pub use timeframe::{Timeframe, UnknownTimeframe};
pub use trade::{pair_profit, Trade, TradeAction, TradeLeg};
