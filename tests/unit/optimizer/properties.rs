//! Invariants of the optimizer checked over generated series

use hindsight::models::{AnalysisResult, Candle};
use hindsight::optimizer::optimize;

const BALANCE: f64 = 1000.0;

/// Sine wave plus LCG noise, always well above zero.
fn generated_series(len: usize, seed: u64) -> Vec<Candle> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let noise = (state >> 33) as f64 / (1u64 << 31) as f64 - 0.5;
            let price = 100.0 + 10.0 * (i as f64 * 0.3).sin() + 5.0 * noise;
            Candle::from_close(price, i as i64 * 60_000)
        })
        .collect()
}

fn each_generated_result(mut check: impl FnMut(&[Candle], &AnalysisResult)) {
    for seed in 1..=20u64 {
        for len in [2usize, 3, 5, 17, 60] {
            let candles = generated_series(len, seed);
            let result = optimize(&candles, BALANCE).unwrap();
            check(&candles, &result);
        }
    }
}

/// Exhaustive search over every non-overlapping set of profitable trades.
fn brute_force_best(closes: &[f64], from: usize) -> f64 {
    let mut best = 0.0_f64;
    for entry in from..closes.len() {
        for exit in entry + 1..closes.len() {
            let profit = (closes[exit] - closes[entry]) / closes[entry] * BALANCE;
            if profit > 0.0 {
                best = best.max(profit + brute_force_best(closes, exit));
            }
        }
    }
    best
}

#[test]
fn test_every_trade_is_profitable() {
    each_generated_result(|candles, result| {
        for trade in &result.trades {
            assert!(trade.entry_index < trade.exit_index);
            assert!(candles[trade.entry_index].close < candles[trade.exit_index].close);
            assert!(trade.profit > 0.0);
        }
    });
}

#[test]
fn test_trades_never_overlap() {
    each_generated_result(|_, result| {
        for pair in result.trades.windows(2) {
            assert!(pair[0].exit_index <= pair[1].entry_index);
        }
    });
}

#[test]
fn test_total_is_exact_sum_of_trades() {
    each_generated_result(|_, result| {
        let sum = result.trades.iter().fold(0.0, |acc, t| acc + t.profit);
        assert_eq!(result.total_profit, sum);
    });
}

#[test]
fn test_never_worse_than_holding() {
    each_generated_result(|_, result| {
        assert!(result.total_profit >= result.buy_hold.profit.max(0.0));
    });
}

#[test]
fn test_appending_candles_never_lowers_profit() {
    for seed in 1..=10u64 {
        let candles = generated_series(40, seed);
        let mut previous = 0.0;
        for len in 1..=candles.len() {
            let total = optimize(&candles[..len], BALANCE).unwrap().total_profit;
            assert!(total >= previous, "seed {} len {}: {} < {}", seed, len, total, previous);
            previous = total;
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    for seed in 1..=10u64 {
        let candles = generated_series(50, seed);
        let first = optimize(&candles, BALANCE).unwrap();
        let second = optimize(&candles, BALANCE).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_matches_exhaustive_search_on_short_series() {
    for seed in 1..=30u64 {
        for len in 2..=8usize {
            let candles = generated_series(len, seed);
            let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
            let expected = brute_force_best(&closes, 0);
            let actual = optimize(&candles, BALANCE).unwrap().total_profit;
            assert!(
                (expected - actual).abs() < 1e-6,
                "seed {} len {}: expected {} got {}",
                seed,
                len,
                expected,
                actual
            );
        }
    }
}
