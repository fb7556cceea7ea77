//! Page fetcher
//!
//! Fetches one page of history for a cursor. A cached page younger than the
//! freshness window is returned without touching the network; anything older
//! is re-requested and the cache entry overwritten.

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::explorer_client::{Endpoint, PageSource};
use crate::page_cache::{CacheKey, PageCache};
use crate::types::PageResponse;
use std::cmp::Ordering;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// Upper block-height bound for a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Most recent page
    Unbounded,
    /// Transactions strictly below this height
    Before(i64),
}

impl Cursor {
    /// The lower of this cursor and `height`
    pub fn lowered_to(self, height: i64) -> Self {
        self.min(Cursor::Before(height))
    }

    pub fn cache_key(self, address: &str) -> CacheKey {
        match self {
            Cursor::Unbounded => CacheKey::latest(address),
            Cursor::Before(height) => CacheKey::before(address, height),
        }
    }
}

// Unbounded sorts above every height.
impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cursor::Unbounded, Cursor::Unbounded) => Ordering::Equal,
            (Cursor::Unbounded, Cursor::Before(_)) => Ordering::Greater,
            (Cursor::Before(_), Cursor::Unbounded) => Ordering::Less,
            (Cursor::Before(a), Cursor::Before(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub network_fetches: usize,
    pub cache_hits: usize,
}

pub struct PageFetcher<S> {
    source: S,
    cache: PageCache,
    endpoint: Endpoint,
    freshness: Duration,
    stats: FetchStats,
}

impl<S: PageSource> PageFetcher<S> {
    pub fn new(source: S, cache: PageCache, endpoint: Endpoint, freshness: Duration) -> Self {
        Self {
            source,
            cache,
            endpoint,
            freshness,
            stats: FetchStats::default(),
        }
    }

    pub fn from_config(source: S, config: &ScanConfig) -> Self {
        Self::new(
            source,
            PageCache::new(&config.cache_dir),
            Endpoint::from_config(config),
            config.freshness,
        )
    }

    pub fn address(&self) -> &str {
        self.endpoint.address()
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Fetch the page at `cursor`, preferring a fresh cache entry
    pub async fn fetch(&mut self, cursor: Cursor) -> Result<PageResponse> {
        let key = cursor.cache_key(self.endpoint.address());

        if let Some(bytes) = self.read_fresh(&key)? {
            info!(key = %key, "using cached page");
            self.stats.cache_hits += 1;
            return decode(&key, &bytes);
        }

        let uri = self.endpoint.page_uri(cursor);
        let response = self.source.get(&uri).await?;
        self.stats.network_fetches += 1;

        if !response.is_success() {
            return Err(ScanError::FetchFailed {
                address: self.endpoint.address().to_string(),
                status: response.status,
                body: response.body_text(),
            });
        }

        // only well-formed pages are cached
        let page = decode(&key, &response.body)?;
        self.cache.write(&key, &response.body)?;
        debug!(key = %key, txs = page.txs.len(), "fetched page");
        Ok(page)
    }

    fn read_fresh(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        if !self.cache.exists(key) {
            return Ok(None);
        }
        let age = self.cache.age(key, SystemTime::now())?;
        if age >= self.freshness {
            debug!(key = %key, age_secs = age.as_secs(), "cached page is stale");
            return Ok(None);
        }
        self.cache.read(key).map(Some)
    }
}

fn decode(key: &CacheKey, bytes: &[u8]) -> Result<PageResponse> {
    serde_json::from_slice(bytes).map_err(|source| ScanError::Decode {
        key: key.to_string(),
        source,
    })
}
