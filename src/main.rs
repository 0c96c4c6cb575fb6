//! rustxplore - IEEE Xplore metadata crawler
//!
//! Fetches paper metadata from the IEEE Xplore search endpoint and saves it
//! as JSON Lines or CSV.
//!
//! ## Usage
//!
//! ```bash
//! rustxplore --query "landslide detection" --max-records 200 --out output/landslide.jsonl
//! rustxplore --query "slope stability" --start-year 2019 --out output/slope.csv
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rustxplore::config::XploreConfig;
use rustxplore::ieee::{FetchOptions, Fetcher};
use rustxplore::output::OutputFormat;
use rustxplore::pipeline;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Crawl IEEE papers metadata from local-host network environment.
#[derive(Parser)]
#[command(name = "rustxplore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Keyword query for IEEE search
    #[arg(long)]
    query: String,

    /// Maximum number of papers to fetch
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    max_records: u64,

    /// Filter start publication year
    #[arg(long)]
    start_year: Option<i32>,

    /// Filter end publication year
    #[arg(long)]
    end_year: Option<i32>,

    /// Sleep seconds between page requests
    #[arg(long, default_value = "0.8")]
    sleep_sec: f64,

    /// Output path (.jsonl or .csv)
    #[arg(long)]
    out: PathBuf,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    proxy: Option<String>,

    /// Mirror site URL (search endpoint becomes <base-url>/rest/search)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    // Fail on a bad --out before touching the network
    OutputFormat::from_path(&cli.out).context("Invalid --out")?;

    let inter_page_delay = Duration::try_from_secs_f64(cli.sleep_sec)
        .context("--sleep-sec must be a non-negative number of seconds")?;

    let config = match cli.base_url.as_deref() {
        Some(base) => XploreConfig::with_base_url(base).context("Invalid --base-url")?,
        None => XploreConfig::default(),
    }
    .proxy(cli.proxy);

    let fetcher = Fetcher::from_config(config).context("Failed to set up IEEE client")?;

    let options = FetchOptions {
        max_records: usize::try_from(cli.max_records).context("--max-records is too large")?,
        start_year: cli.start_year,
        end_year: cli.end_year,
        inter_page_delay,
    };

    let summary = pipeline::crawl(&fetcher, &cli.query, &options, &cli.out)
        .await
        .context("Crawl failed")?;

    println!("Fetched {} records -> {}", summary.count, summary.path.display());
    Ok(())
}
