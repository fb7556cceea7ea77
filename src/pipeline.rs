//! One scan run: collect, analyse, report

use crate::collector::{Collector, StopReason};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::explorer_client::{ExplorerClient, PageSource};
use crate::page_fetcher::PageFetcher;
use crate::signal::{self, Conflict};
use tracing::info;

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub transactions_collected: usize,
    pub pages_fetched: usize,
    pub network_fetches: usize,
    pub cache_hits: usize,
    pub stop_reason: Option<StopReason>,
    /// Admitted candidates in extraction order
    pub candidates: Vec<u64>,
    pub conflicts: Vec<Conflict>,
    /// Deduplicated values, oldest first
    pub values: Vec<u64>,
}

/// Scan using an arbitrary page source
pub async fn scan<S: PageSource>(source: S, config: &ScanConfig) -> Result<ScanReport> {
    config.validate()?;

    let fetcher = PageFetcher::from_config(source, config);
    let mut collector = Collector::new(fetcher, config.window);
    let transactions = collector.collect().await?;

    let analysis = signal::analyze(&transactions, &config.address, &config.rules);
    let stats = collector.fetcher().stats();

    info!(
        candidates = analysis.admitted.len(),
        conflicts = analysis.conflicts.len(),
        values = analysis.values.len(),
        "analysis finished"
    );

    Ok(ScanReport {
        transactions_collected: transactions.len(),
        pages_fetched: collector.pages(),
        network_fetches: stats.network_fetches,
        cache_hits: stats.cache_hits,
        stop_reason: collector.stop_reason(),
        candidates: analysis.admitted,
        conflicts: analysis.conflicts,
        values: analysis.values,
    })
}

/// Scan against the live explorer
pub async fn run(config: &ScanConfig) -> Result<ScanReport> {
    let client = ExplorerClient::new(config)?;
    scan(client, config).await
}
