//! Maximum-profit non-overlapping trade search.
//!
//! `best_profit[i]` is the best total reachable using candles `0..=i`. Each
//! index records how it got there (carried from `i - 1`, or a trade closing
//! at `i` that entered at some earlier `j`), and the trade list is rebuilt once
//! by walking those back-pointers from the last index.

use crate::models::pair_profit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Start,
    Carry,
    Close { entry: usize },
}

/// DP table over one close series.
#[derive(Debug, Clone)]
pub struct TradeSearch {
    best_profit: Vec<f64>,
    steps: Vec<Step>,
}

impl TradeSearch {
    /// Run the O(n^2) search. Closes must already be validated.
    ///
    /// Candidates `j` are scanned in ascending order and only a strictly
    /// greater total replaces the current best, so ties keep the smallest `j`.
    /// Pairs with zero or negative profit are never taken.
    pub fn run(closes: &[f64], initial_balance: f64) -> Self {
        let n = closes.len();
        let mut best_profit = vec![0.0; n];
        let mut steps = vec![Step::Start; n];

        for i in 1..n {
            best_profit[i] = best_profit[i - 1];
            steps[i] = Step::Carry;

            for j in 0..i {
                let profit = pair_profit(closes[j], closes[i], initial_balance);
                if profit <= 0.0 {
                    continue;
                }
                let candidate = best_profit[j] + profit;
                if candidate > best_profit[i] {
                    best_profit[i] = candidate;
                    steps[i] = Step::Close { entry: j };
                }
            }
        }

        Self { best_profit, steps }
    }

    /// Best total over the whole series; zero for fewer than two closes.
    pub fn best_profit(&self) -> f64 {
        self.best_profit.last().copied().unwrap_or(0.0)
    }

    /// Best total using only the first `i + 1` closes.
    pub fn best_profit_at(&self, i: usize) -> Option<f64> {
        self.best_profit.get(i).copied()
    }

    /// `(entry, exit)` index pairs of the optimal sequence, in chronological order.
    pub fn trade_indices(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let Some(mut i) = self.steps.len().checked_sub(1) else {
            return pairs;
        };

        loop {
            match self.steps[i] {
                Step::Start => break,
                Step::Carry => i -= 1,
                Step::Close { entry } => {
                    pairs.push((entry, i));
                    i = entry;
                }
            }
        }

        pairs.reverse();
        pairs
    }
}
