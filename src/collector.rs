//! Pagination driver
//!
//! Walks an address's history newest-first, one page at a time, lowering the
//! cursor to the smallest block height seen. Collection stops at the first
//! transaction outside the time window, on an empty page, or when the
//! explorer stops honoring the cursor.

use crate::config::TimeWindow;
use crate::error::Result;
use crate::explorer_client::PageSource;
use crate::page_fetcher::{Cursor, PageFetcher};
use crate::types::Transaction;
use tracing::{debug, info, warn};

/// Why collection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Reached a transaction older than the window (or with a bad timestamp)
    LeftWindow,
    /// Explorer returned an empty page
    Exhausted,
    /// A full page did not lower the cursor
    Stalled,
}

pub struct Collector<S> {
    fetcher: PageFetcher<S>,
    window: TimeWindow,
    pages: usize,
    stop_reason: Option<StopReason>,
}

impl<S: PageSource> Collector<S> {
    pub fn new(fetcher: PageFetcher<S>, window: TimeWindow) -> Self {
        Self {
            fetcher,
            window,
            pages: 0,
            stop_reason: None,
        }
    }

    /// Pages requested so far, cached or not
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn fetcher(&self) -> &PageFetcher<S> {
        &self.fetcher
    }

    /// Collect every in-window transaction, in explorer order
    pub async fn collect(&mut self) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::new();
        let mut cursor = Cursor::Unbounded;

        let reason = loop {
            let page = self.fetcher.fetch(cursor).await?;
            self.pages += 1;
            debug!(?cursor, txs = page.txs.len(), "page received");

            if page.txs.is_empty() {
                break StopReason::Exhausted;
            }

            let previous = cursor;
            let mut left_window = false;
            for tx in page.txs {
                let in_window = tx
                    .received_at()
                    .map(|at| self.window.contains(&at))
                    .unwrap_or(false);
                if !in_window {
                    debug!(hash = %tx.hash, received = %tx.received, "left time window");
                    left_window = true;
                    break;
                }
                cursor = cursor.lowered_to(tx.block_height);
                transactions.push(tx);
            }

            if left_window {
                break StopReason::LeftWindow;
            }
            if cursor == previous {
                warn!(?cursor, "explorer ignored the cursor, stopping pagination");
                break StopReason::Stalled;
            }
        };

        info!(
            transactions = transactions.len(),
            pages = self.pages,
            ?reason,
            "collection finished"
        );
        self.stop_reason = Some(reason);
        Ok(transactions)
    }
}
