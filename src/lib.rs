//! Hindsight: optimal long-only trade sequences over historical candles.
//!
//! The optimizer finds the maximum-profit set of non-overlapping buy/sell
//! trades for one price series; the scanner runs it across several
//! timeframes and keeps the most profitable one.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod optimizer;
pub mod services;

pub use error::{AnalysisError, FetchError, InvalidInputError, ScanError};
