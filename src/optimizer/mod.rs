pub mod baseline;
pub mod engine;
pub mod trades;
pub mod validation;

pub use baseline::buy_hold_baseline;
pub use engine::{average_profit_percentage, best_trade, optimize};
pub use trades::TradeSearch;
pub use validation::*;
