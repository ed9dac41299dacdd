//! SmartTrade CLI — one-shot quote and analysis commands.
//!
//! Commands:
//! - `quote` — fetch and print the latest quote for a symbol
//! - `analyze` — fetch a quote (or take a price directly) and print the
//!   derived signal, levels, and position size

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use smarttrade_core::config::AppConfig;
use smarttrade_core::data::{AlphaVantageProvider, CircuitBreaker, QuoteProvider};
use smarttrade_core::domain::{AnalysisResult, Quote, Ticker};
use smarttrade_core::engine;

#[derive(Parser)]
#[command(
    name = "smarttrade",
    about = "SmartTrade CLI — live quotes and signal analysis"
)]
struct Cli {
    /// Path to a config file. Defaults to the standard location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Alpha Vantage API key. Overrides the environment and config file.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the latest quote for a symbol.
    Quote {
        /// Symbol in EXCH:CODE form (e.g. BSE:RELIANCE). Bare codes default to NSE.
        ticker: String,
    },
    /// Fetch a quote and print the derived analysis.
    Analyze {
        /// Symbol in EXCH:CODE form (e.g. BSE:RELIANCE). Bare codes default to NSE.
        ticker: String,

        /// Analyze this price directly instead of fetching a quote.
        #[arg(long)]
        price: Option<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path)?;

    let api_key = cli.api_key.or_else(|| config.resolved_api_key());

    match cli.command {
        Commands::Quote { ticker } => run_quote(&ticker, api_key, &config),
        Commands::Analyze { ticker, price } => run_analyze(&ticker, price, api_key, &config),
    }
}

fn build_provider(api_key: Option<String>, config: &AppConfig) -> AlphaVantageProvider {
    let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
    AlphaVantageProvider::with_timeout(
        api_key,
        circuit_breaker,
        Duration::from_secs(config.http_timeout_secs),
    )
}

fn run_quote(ticker: &str, api_key: Option<String>, config: &AppConfig) -> Result<()> {
    let ticker = Ticker::parse(ticker)?;
    let provider = build_provider(api_key, config);
    let quote = provider
        .fetch(&ticker)
        .with_context(|| format!("fetching quote for {ticker}"))?;

    print_quote(&ticker, &quote);
    Ok(())
}

fn run_analyze(
    ticker: &str,
    price: Option<f64>,
    api_key: Option<String>,
    config: &AppConfig,
) -> Result<()> {
    let ticker = Ticker::parse(ticker)?;

    let (price, quote) = match price {
        Some(p) => (p, None),
        None => {
            let provider = build_provider(api_key, config);
            let quote = provider
                .fetch(&ticker)
                .with_context(|| format!("fetching quote for {ticker}"))?;
            (quote.price, Some(quote))
        }
    };

    let analysis = engine::analyze(price)?;
    print_analysis(&ticker, quote.as_ref(), &analysis);
    Ok(())
}

fn print_quote(ticker: &Ticker, quote: &Quote) {
    println!();
    println!("=== Quote: {ticker} ===");
    println!("Symbol:         {}", quote.symbol);
    println!("Price:          {:.2}", quote.price);
    println!("Open:           {:.2}", quote.open);
    println!("High:           {:.2}", quote.high);
    println!("Low:            {:.2}", quote.low);
    println!("Prev Close:     {:.2}", quote.previous_close);
    println!(
        "Change:         {:+.2} ({:+.2}%)",
        quote.change, quote.change_percent
    );
    println!("Volume:         {}", quote.volume);
    println!("Trading Day:    {}", quote.latest_trading_day);
    println!();
}

fn print_analysis(ticker: &Ticker, quote: Option<&Quote>, analysis: &AnalysisResult) {
    println!();
    println!("=== Analysis: {ticker} ===");
    println!("Price:          {:.2}", analysis.price);
    if let Some(quote) = quote {
        println!(
            "Day Change:     {:+.2} ({:+.2}%)",
            quote.change, quote.change_percent
        );
        println!("Trading Day:    {}", quote.latest_trading_day);
    }
    println!();
    println!("--- Signal ---");
    println!("Trend:          {}", analysis.trend);
    println!("Signal:         {}", analysis.signal);
    println!("Confidence:     {}%", analysis.confidence);
    println!("RSI:            {}", analysis.relative_strength_index);
    println!("Reference Avg:  {:.2}", analysis.reference_average);
    println!();
    println!("--- Execution ---");
    println!("Volatility:     {:.2}", analysis.volatility);
    println!("Stop Loss:      {:.2}", analysis.stop_loss);
    println!("Target:         {:.2}", analysis.target);
    println!("Position Size:  {}", analysis.position_size);
    println!();
}
