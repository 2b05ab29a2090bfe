//! Entry point tying the search, derived statistics and baseline together.

use tracing::debug;

use super::baseline::buy_hold_baseline;
use super::trades::TradeSearch;
use super::validation::{validate_balance, validate_closes};
use crate::error::InvalidInputError;
use crate::models::{AnalysisResult, Candle, Trade};

/// Optimal non-overlapping long-only trades over `candles` (ascending by timestamp).
///
/// Pure and deterministic: the same input always yields the same trade list.
pub fn optimize(
    candles: &[Candle],
    initial_balance: f64,
) -> Result<AnalysisResult, InvalidInputError> {
    validate_balance(initial_balance)?;
    validate_closes(candles)?;

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let search = TradeSearch::run(&closes, initial_balance);

    let trades: Vec<Trade> = search
        .trade_indices()
        .into_iter()
        .map(|(entry, exit)| {
            Trade::between(entry, &candles[entry], exit, &candles[exit], initial_balance)
        })
        .collect();

    let total_profit = trades.iter().fold(0.0, |acc, t| acc + t.profit);
    let average_profit_percentage = average_profit_percentage(&trades);
    let best_trade = best_trade(&trades).cloned();

    let n = candles.len() as u64;
    let entry_exit_pairs_tested = n * n.saturating_sub(1);

    debug!(
        candles = candles.len(),
        trades = trades.len(),
        total_profit,
        "optimizer: {} trades over {} candles",
        trades.len(),
        candles.len()
    );

    Ok(AnalysisResult {
        initial_balance,
        candle_count: candles.len(),
        total_profit_percentage: total_profit / initial_balance * 100.0,
        trades,
        total_profit,
        average_profit_percentage,
        best_trade,
        buy_hold: buy_hold_baseline(candles, initial_balance),
        entry_exit_pairs_tested,
        combinations_tested: entry_exit_pairs_tested / 2,
    })
}

pub fn average_profit_percentage(trades: &[Trade]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    let sum = trades.iter().fold(0.0, |acc, t| acc + t.profit_percentage);
    Some(sum / trades.len() as f64)
}

/// Highest `profit_percentage`; the earliest trade wins a tie.
pub fn best_trade(trades: &[Trade]) -> Option<&Trade> {
    trades.iter().fold(None, |best: Option<&Trade>, trade| match best {
        Some(b) if b.profit_percentage >= trade.profit_percentage => Some(b),
        _ => Some(trade),
    })
}
