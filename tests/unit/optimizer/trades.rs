//! Unit tests for the DP trade search

use hindsight::optimizer::TradeSearch;

#[test]
fn test_empty_and_single_close() {
    let empty = TradeSearch::run(&[], 1000.0);
    assert_eq!(empty.best_profit(), 0.0);
    assert!(empty.trade_indices().is_empty());

    let single = TradeSearch::run(&[5.0], 1000.0);
    assert_eq!(single.best_profit(), 0.0);
    assert!(single.trade_indices().is_empty());
}

#[test]
fn test_monotonic_rise_is_one_trade() {
    let search = TradeSearch::run(&[1.0, 2.0, 3.0, 4.0], 100.0);
    // 1 -> 4 (300) beats 1->2 + 2->3 + 3->4 (100 + 50 + 33.3).
    assert_eq!(search.trade_indices(), vec![(0, 3)]);
    assert_eq!(search.best_profit(), 300.0);
}

#[test]
fn test_zigzag_takes_every_rise() {
    let search = TradeSearch::run(&[10.0, 20.0, 10.0, 20.0, 10.0, 20.0], 1000.0);
    assert_eq!(search.trade_indices(), vec![(0, 1), (2, 3), (4, 5)]);
    assert_eq!(search.best_profit(), 3000.0);
}

#[test]
fn test_carry_keeps_earlier_exit_on_equal_total() {
    // Selling at the second 20 would tie, so the trade closing at index 1 stays.
    let search = TradeSearch::run(&[10.0, 20.0, 20.0], 1000.0);
    assert_eq!(search.trade_indices(), vec![(0, 1)]);
}

#[test]
fn test_separate_dips_are_traded_separately() {
    let search = TradeSearch::run(&[10.0, 5.0, 10.0, 5.0, 20.0], 100.0);
    let pairs = search.trade_indices();
    assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    assert_eq!(search.best_profit(), 100.0 + 300.0);
}

#[test]
fn test_prefix_profits_never_decrease() {
    let closes = [10.0, 8.0, 12.0, 9.0, 15.0, 14.0, 7.0, 21.0];
    let search = TradeSearch::run(&closes, 1000.0);

    let mut previous = 0.0;
    for i in 0..closes.len() {
        let current = search.best_profit_at(i).unwrap();
        assert!(current >= previous, "best_profit[{}] dropped", i);
        previous = current;
    }
    assert_eq!(search.best_profit_at(closes.len()), None);
}
