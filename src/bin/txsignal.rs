//! txsignal CLI tool
//!
//! Prints the recovered values, one per line. Progress and conflict
//! diagnostics go to stderr; set `RUST_LOG` to change verbosity.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use txsignal::config::{ScanConfig, TimeWindow, DEFAULT_ADDRESS, DEFAULT_ENDPOINT};
use txsignal::utils;

#[derive(Parser)]
#[command(name = "txsignal")]
#[command(about = "Recover values hidden in an address's testnet output amounts")]
struct Cli {
    /// Address whose history is scanned
    #[arg(long, env = "TXSIGNAL_ADDRESS", default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Explorer API root
    #[arg(long, env = "TXSIGNAL_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory for cached pages (default: ./cache)
    #[arg(long, env = "TXSIGNAL_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Keep cached pages in the per-user cache directory instead of ./cache
    #[arg(long, conflicts_with = "cache_dir")]
    user_cache: bool,

    /// Minutes a cached page stays fresh
    #[arg(long, default_value_t = 60)]
    freshness_minutes: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Only transactions received in this year are collected
    #[arg(long, default_value_t = 2021)]
    year: i32,

    /// Zero-based month index (January = 0) where collection stops
    #[arg(long, default_value_t = 3)]
    min_month: u32,
}

impl Cli {
    fn into_config(self) -> Result<ScanConfig> {
        let cache_dir = match (self.cache_dir, self.user_cache) {
            (Some(dir), _) => dir,
            (None, true) => utils::user_cache_dir().context("No per-user cache directory")?,
            (None, false) => utils::default_cache_dir(),
        };

        let mut config = ScanConfig::new(self.address)
            .with_endpoint(self.endpoint)
            .with_cache_dir(cache_dir);
        config.freshness = Duration::from_secs(self.freshness_minutes * 60);
        config.timeout = Duration::from_secs(self.timeout_secs);
        config.window = TimeWindow {
            year: self.year,
            min_month0: self.min_month,
        };
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    let report = txsignal::run(&config)
        .await
        .with_context(|| format!("Scan of {} failed", config.address))?;

    if !report.conflicts.is_empty() {
        tracing::warn!(
            count = report.conflicts.len(),
            "candidates dropped because of input-address conflicts"
        );
    }

    for value in &report.values {
        println!("{}", value);
    }

    Ok(())
}
