//! Hindsight CLI
//!
//! Fetches historical klines, finds the optimal non-overlapping trade
//! sequence and compares it against buying and holding.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use hindsight::common::time::{format_timestamp, parse_utc_timestamp};
use hindsight::config::AnalyzerConfig;
use hindsight::core::scanner::TimeframeScanner;
use hindsight::logging;
use hindsight::models::{AnalysisResult, ScanResult, Timeframe};
use hindsight::services::binance::BinanceMarketDataProvider;
use tracing::info;

#[derive(Parser)]
#[command(name = "hindsight")]
#[command(about = "Optimal trade sequence finder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Notional capital per trade (overrides INITIAL_BALANCE)
    #[arg(long, global = true)]
    balance: Option<f64>,

    /// Print the result as JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single timeframe
    Analyze {
        #[command(flatten)]
        window: Window,

        /// Candle interval (1m, 5m, 1h, 4h, 1d, ...)
        #[arg(short, long, default_value = "1h")]
        timeframe: Timeframe,
    },

    /// Analyze several timeframes and keep the most profitable
    Scan {
        #[command(flatten)]
        window: Window,

        /// Comma separated candidates (overrides SCAN_TIMEFRAMES)
        #[arg(short, long, value_delimiter = ',')]
        timeframes: Vec<Timeframe>,

        /// Fetch all timeframes at once
        #[arg(long)]
        concurrent: bool,
    },
}

#[derive(Args)]
struct Window {
    /// Trading pair, e.g. BTCUSDT
    #[arg(short, long)]
    symbol: String,

    /// Window start, UTC (2024-01-01T00:00, RFC 3339 or epoch ms)
    #[arg(long)]
    start: String,

    /// Window end, UTC
    #[arg(long)]
    end: String,
}

impl Window {
    fn resolve(&self) -> Result<(String, i64, i64), Box<dyn std::error::Error>> {
        let start = parse_utc_timestamp(&self.start)?;
        let end = parse_utc_timestamp(&self.end)?;
        if start >= end {
            return Err(format!("start ({}) must be before end ({})", self.start, self.end).into());
        }
        Ok((self.symbol.trim().to_uppercase(), start, end))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let mut config = AnalyzerConfig::from_env()?;
    if let Some(balance) = cli.balance {
        config = config.with_initial_balance(balance)?;
    }

    match cli.command {
        Commands::Analyze { window, timeframe } => {
            let (symbol, start, end) = window.resolve()?;
            let provider = Arc::new(BinanceMarketDataProvider::from_config(&config)?);
            let scanner = TimeframeScanner::from_config(provider, &config);

            info!(symbol = %symbol, timeframe = %timeframe, "Analyzing {} {}", symbol, timeframe);
            let started = Instant::now();
            let result = scanner.analyze_one(&symbol, timeframe, start, end).await?;
            let elapsed = started.elapsed();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {}", symbol, timeframe);
                print_analysis(&result, elapsed);
            }
        }
        Commands::Scan {
            window,
            timeframes,
            concurrent,
        } => {
            let (symbol, start, end) = window.resolve()?;
            if !timeframes.is_empty() {
                config.timeframes = timeframes;
            }
            config.concurrent_fetches |= concurrent;

            let provider = Arc::new(BinanceMarketDataProvider::from_config(&config)?);
            let scanner = TimeframeScanner::from_config(provider, &config);

            info!(symbol = %symbol, candidates = ?config.timeframes, "Scanning {}", symbol);
            let started = Instant::now();
            let scan = scanner.scan(&symbol, start, end, &config.timeframes).await?;
            let elapsed = started.elapsed();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                print_scan(&symbol, &scan, elapsed);
            }
        }
    }

    Ok(())
}

fn print_scan(symbol: &str, scan: &ScanResult, elapsed: Duration) {
    println!("Timeframe Scan: {}", symbol);
    for summary in &scan.summaries {
        let marker = if summary.timeframe == scan.timeframe { "*" } else { " " };
        println!(
            " {} {:>4}  {:>5} candles  {:>4} trades  ${:.2}",
            marker,
            summary.timeframe,
            summary.candle_count,
            summary.trade_count,
            summary.total_profit
        );
    }
    for failure in &scan.failures {
        println!("   {:>4}  failed: {}", failure.timeframe, failure.reason);
    }
    println!();
    println!("Best timeframe: {}", scan.timeframe);
    print_analysis(&scan.result, elapsed);
}

fn print_analysis(result: &AnalysisResult, elapsed: Duration) {
    println!();
    if result.has_trades() {
        println!("Optimal Trades");
        for trade in &result.trades {
            let [buy, sell] = trade.legs();
            println!("  Buy:    {} at ${:.2}", format_timestamp(buy.timestamp), buy.price);
            println!("  Sell:   {} at ${:.2}", format_timestamp(sell.timestamp), sell.price);
            println!("  Profit: ${:.2} ({:.2}%)", trade.profit, trade.profit_percentage);
            println!();
        }
        println!(
            "Total Profit: ${:.2} ({:.2}%)",
            result.total_profit, result.total_profit_percentage
        );
        if let Some(average) = result.average_profit_percentage {
            println!("Average Trade Return: {:.2}%", average);
        }
        if let Some(best) = &result.best_trade {
            println!(
                "Best Trade: {} -> {} ({:.2}%)",
                format_timestamp(best.entry_timestamp),
                format_timestamp(best.exit_timestamp),
                best.profit_percentage
            );
        }
    } else {
        println!("No profitable trades found.");
    }

    let hold = &result.buy_hold;
    println!();
    println!("Buy and Hold");
    println!("  Start Date:  {}", format_timestamp(hold.start_timestamp));
    println!("  End Date:    {}", format_timestamp(hold.end_timestamp));
    println!("  Start Price: ${:.2}", hold.start_price);
    println!("  End Price:   ${:.2}", hold.end_price);
    println!("  Profit:      ${:.2} ({:.2}%)", hold.profit, hold.profit_percentage);
    println!("  Optimal sequence beats holding by ${:.2}", result.outperformance());

    println!();
    println!("Analysis Statistics");
    println!("  Candles Analyzed:          {}", group_thousands(result.candle_count as u64));
    println!("  Entries and Exits Tested:  {}", group_thousands(result.entry_exit_pairs_tested));
    println!("  Trade Combinations Tested: {}", group_thousands(result.combinations_tested));
    println!("  Time to Complete Analysis: {:.2} seconds", elapsed.as_secs_f64());
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
