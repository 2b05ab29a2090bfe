//! Unit tests for the trade optimizer entry point

use hindsight::error::InvalidInputError;
use hindsight::models::{Candle, TradeAction};
use hindsight::optimizer::optimize;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::from_close(close, 1_700_000_000_000 + i as i64 * 3_600_000)
        })
        .collect()
}

#[test]
fn test_flat_series_has_no_trades() {
    let candles = candles_from_closes(&[10.0, 10.0, 10.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.total_profit, 0.0);
    assert_eq!(result.average_profit_percentage, None);
    assert_eq!(result.best_trade, None);
    assert_eq!(result.buy_hold.profit, 0.0);
}

// Buying at 10 and selling at 30 ties with 10->20 then 15->30 (2000 each).
// The earliest entry wins a tie, so the single trade is kept.
#[test]
fn test_tie_prefers_earliest_entry() {
    let candles = candles_from_closes(&[10.0, 20.0, 15.0, 30.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    assert_eq!(result.total_profit, 2000.0);
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].entry_index, 0);
    assert_eq!(result.trades[0].exit_index, 3);
    assert_eq!(result.trades[0].profit, 2000.0);
}

#[test]
fn test_two_trades_beat_single_hold() {
    let candles = candles_from_closes(&[10.0, 20.0, 10.0, 20.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    let pairs: Vec<(usize, usize)> = result
        .trades
        .iter()
        .map(|t| (t.entry_index, t.exit_index))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    assert_eq!(result.total_profit, 2000.0);
    assert_eq!(result.total_profit_percentage, 200.0);
    assert_eq!(result.buy_hold.profit, 1000.0);
    assert_eq!(result.outperformance(), 1000.0);
}

#[test]
fn test_derived_statistics() {
    let candles = candles_from_closes(&[10.0, 20.0, 10.0, 15.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.trades[0].profit_percentage, 100.0);
    assert_eq!(result.trades[1].profit_percentage, 50.0);
    assert_eq!(result.total_profit, 1500.0);
    assert_eq!(result.average_profit_percentage, Some(75.0));

    let best = result.best_trade.expect("best trade");
    assert_eq!((best.entry_index, best.exit_index), (0, 1));
}

#[test]
fn test_best_trade_tie_keeps_earliest() {
    let candles = candles_from_closes(&[10.0, 20.0, 10.0, 20.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    let best = result.best_trade.expect("best trade");
    assert_eq!(best.entry_index, 0);
}

#[test]
fn test_pair_counts() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let result = optimize(&candles, 100.0).unwrap();

    assert_eq!(result.candle_count, 5);
    assert_eq!(result.entry_exit_pairs_tested, 20);
    assert_eq!(result.combinations_tested, 10);
}

#[test]
fn test_single_candle() {
    let candles = candles_from_closes(&[42.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.buy_hold.profit, 0.0);
    assert_eq!(result.buy_hold.start_price, 42.0);
    assert_eq!(result.buy_hold.end_price, 42.0);
    assert_eq!(result.entry_exit_pairs_tested, 0);
    assert_eq!(result.combinations_tested, 0);
}

#[test]
fn test_empty_series_is_tolerated() {
    let result = optimize(&[], 1000.0).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.candle_count, 0);
    assert_eq!(result.total_profit, 0.0);
    assert_eq!(result.buy_hold.profit, 0.0);
    assert_eq!(result.entry_exit_pairs_tested, 0);
}

#[test]
fn test_downtrend_has_no_trades_and_negative_hold() {
    let candles = candles_from_closes(&[40.0, 30.0, 20.0, 10.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    assert!(result.trades.is_empty());
    assert_eq!(result.buy_hold.profit, -750.0);
    assert_eq!(result.buy_hold.profit_percentage, -75.0);
    assert_eq!(result.outperformance(), 750.0);
}

#[test]
fn test_trade_carries_prices_and_timestamps() {
    let candles = candles_from_closes(&[10.0, 12.5]);
    let result = optimize(&candles, 1000.0).unwrap();

    let trade = &result.trades[0];
    assert_eq!(trade.entry_price, 10.0);
    assert_eq!(trade.exit_price, 12.5);
    assert_eq!(trade.entry_timestamp, candles[0].timestamp);
    assert_eq!(trade.exit_timestamp, candles[1].timestamp);
    assert_eq!(trade.holding_period_ms(), 3_600_000);

    let [buy, sell] = trade.legs();
    assert_eq!(buy.action, TradeAction::Buy);
    assert_eq!(buy.price, 10.0);
    assert_eq!(sell.action, TradeAction::Sell);
    assert_eq!(sell.timestamp, candles[1].timestamp);
}

#[test]
fn test_rejects_non_positive_balance() {
    let candles = candles_from_closes(&[10.0, 20.0]);

    assert_eq!(
        optimize(&candles, 0.0).unwrap_err(),
        InvalidInputError::NonPositiveBalance(0.0)
    );
    assert_eq!(
        optimize(&candles, -5.0).unwrap_err(),
        InvalidInputError::NonPositiveBalance(-5.0)
    );
    assert!(matches!(
        optimize(&candles, f64::NAN),
        Err(InvalidInputError::NonPositiveBalance(_))
    ));
    assert!(matches!(
        optimize(&candles, f64::INFINITY),
        Err(InvalidInputError::NonPositiveBalance(_))
    ));
}

#[test]
fn test_rejects_non_finite_close() {
    let candles = candles_from_closes(&[10.0, 20.0, f64::NAN, 30.0]);
    assert!(matches!(
        optimize(&candles, 1000.0),
        Err(InvalidInputError::InvalidClose { index: 2, .. })
    ));

    let candles = candles_from_closes(&[10.0, f64::INFINITY]);
    assert!(matches!(
        optimize(&candles, 1000.0),
        Err(InvalidInputError::InvalidClose { index: 1, .. })
    ));
}

#[test]
fn test_rejects_zero_close() {
    let candles = candles_from_closes(&[0.0, 20.0]);
    assert_eq!(
        optimize(&candles, 1000.0).unwrap_err(),
        InvalidInputError::InvalidClose {
            index: 0,
            value: 0.0
        }
    );
}

#[test]
fn test_result_serializes_absent_average_as_null() {
    let candles = candles_from_closes(&[10.0, 10.0]);
    let result = optimize(&candles, 1000.0).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["average_profit_percentage"].is_null());
    assert!(json["best_trade"].is_null());
    assert_eq!(json["trades"].as_array().map(Vec::len), Some(0));
}
