// =============================================================================
// Vantage Ticker Scanner — Main Entry Point
// =============================================================================
//
// One-shot CLI: acquire candles for a ticker through the source fallback
// chain, classify the latest indicator row, print the verdict, exit.
// Exit status 2 means no source produced usable data; everything else
// (including a NO DATA verdict on thin history) exits 0.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod config;
mod indicators;
mod ohlc;
mod signals;
mod sources;
mod types;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ScanConfig, DEFAULT_TICKER};
use crate::sources::SourceChain;
use crate::types::{Evidence, Verdict};

#[derive(Debug, Parser)]
#[command(name = "vantage-scan", about = "Resilient ticker signal scanner")]
struct Args {
    /// Ticker symbol to scan.
    #[arg(default_value = DEFAULT_TICKER)]
    ticker: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let ticker = args.ticker.trim().to_string();
    println!("Ticker: {ticker}");

    let config = ScanConfig::from_env();
    debug!(store_dir = %config.store_dir.display(), "configuration resolved");

    let chain = SourceChain::from_config(&config);
    let (series, provenance) = chain.acquire(&ticker).await;

    let Some(series) = series else {
        println!("Signal: {}", Verdict::NoData);
        println!("Reason: Could not retrieve OHLC data from the local store or any remote source.");
        std::process::exit(2);
    };

    let (verdict, evidence) = signals::classify(&series);
    info!(ticker, source = %provenance, %verdict, "scan complete");

    println!("Source: {provenance}");
    match &evidence {
        Evidence::Metrics {
            price,
            fast_over_slow,
            rsi,
            macd_over_signal,
        } => {
            println!("Price: {price}");
            println!(
                "SMA5>SMA10: {fast_over_slow}, RSI7: {rsi}, MACD>Signal: {macd_over_signal}"
            );
        }
        Evidence::Unavailable { reason } => {
            println!("Price: -");
            println!("Reason: {reason}");
        }
    }

    let rendered = match verdict {
        Verdict::Buy => verdict.to_string().green(),
        Verdict::Sell => verdict.to_string().red(),
        Verdict::Hold => verdict.to_string().yellow(),
        Verdict::NoData => verdict.to_string().normal(),
    };
    println!("Signal: {rendered}");

    Ok(())
}
