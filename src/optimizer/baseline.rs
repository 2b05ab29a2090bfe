use crate::models::{BuyHoldBaseline, Candle};

/// Buy at the first close, sell at the last. Zero profit for fewer than two candles.
pub fn buy_hold_baseline(candles: &[Candle], initial_balance: f64) -> BuyHoldBaseline {
    match candles {
        [] => BuyHoldBaseline::zero(),
        [only] => BuyHoldBaseline::flat(only),
        [first, .., last] => BuyHoldBaseline::between(first, last, initial_balance),
    }
}
