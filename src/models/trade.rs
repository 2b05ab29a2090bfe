use serde::{Deserialize, Serialize};

use super::candle::Candle;

/// A matched entry/exit pair over one series. `entry_index < exit_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_timestamp: i64,
    pub exit_timestamp: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit: f64,
    pub profit_percentage: f64,
}

impl Trade {
    /// Build the trade buying at `entry` and selling at `exit`, sized at `initial_balance`.
    pub fn between(
        entry_index: usize,
        entry: &Candle,
        exit_index: usize,
        exit: &Candle,
        initial_balance: f64,
    ) -> Self {
        let profit = pair_profit(entry.close, exit.close, initial_balance);
        Self {
            entry_index,
            exit_index,
            entry_timestamp: entry.timestamp,
            exit_timestamp: exit.timestamp,
            entry_price: entry.close,
            exit_price: exit.close,
            profit,
            profit_percentage: profit / initial_balance * 100.0,
        }
    }

    /// Buy leg followed by sell leg.
    pub fn legs(&self) -> [TradeLeg; 2] {
        [
            TradeLeg {
                action: TradeAction::Buy,
                timestamp: self.entry_timestamp,
                price: self.entry_price,
            },
            TradeLeg {
                action: TradeAction::Sell,
                timestamp: self.exit_timestamp,
                price: self.exit_price,
            },
        ]
    }

    pub fn holding_period_ms(&self) -> i64 {
        self.exit_timestamp - self.entry_timestamp
    }
}

/// Profit of buying `initial_balance` worth at `buy` and selling at `sell`.
pub fn pair_profit(buy: f64, sell: f64, initial_balance: f64) -> f64 {
    (sell - buy) / buy * initial_balance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    pub action: TradeAction,
    pub timestamp: i64,
    pub price: f64,
}
