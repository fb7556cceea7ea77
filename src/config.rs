//! Scan configuration
//!
//! Everything the original tool kept in module-level constants lives here and
//! is handed to each component at construction.

use crate::error::{Result, ScanError};
use crate::utils;
use chrono::{DateTime, Datelike, Utc};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

/// Address whose history is scanned by default
pub const DEFAULT_ADDRESS: &str = "mrenegoxBpVDwia9kr6PMrNcLiK3qb3t7F";
/// BlockCypher testnet3 API root
pub const DEFAULT_ENDPOINT: &str = "https://api.blockcypher.com/v1/btc/test3";
pub const DEFAULT_PAGE_LIMIT: u32 = 30;
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Receipt-time window a transaction must fall in to be collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub year: i32,
    /// Zero-based month index (January = 0); earlier months are out of window
    pub min_month0: u32,
}

impl TimeWindow {
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        at.year() == self.year && at.month0() >= self.min_month0
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            year: 2021,
            min_month0: 3,
        }
    }
}

/// Output filters used by the signal extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRules {
    /// Outputs below this amount are dust or change and never carry a value
    pub min_output_value: u64,
    pub modulus: u64,
    pub candidate_range: RangeInclusive<u64>,
}

impl Default for SignalRules {
    fn default() -> Self {
        Self {
            min_output_value: 999,
            modulus: 1_000_000,
            candidate_range: 200_000..=500_000,
        }
    }
}

/// Full configuration for one scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target address
    pub address: String,
    /// Explorer API root, e.g. "https://api.blockcypher.com/v1/btc/test3"
    pub endpoint: String,
    /// Directory holding cached pages
    pub cache_dir: PathBuf,
    /// Transactions per page requested from the explorer
    pub page_limit: u32,
    /// Cached pages younger than this are reused without a request
    pub freshness: Duration,
    /// Request timeout
    pub timeout: Duration,
    pub window: TimeWindow,
    pub rules: SignalRules,
}

impl ScanConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reject settings that would make the scan meaningless
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ScanError::Config("address must not be empty".into()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ScanError::Config("endpoint must not be empty".into()));
        }
        if self.page_limit == 0 {
            return Err(ScanError::Config("page limit must be at least 1".into()));
        }
        if self.rules.modulus == 0 {
            return Err(ScanError::Config("modulus must be non-zero".into()));
        }
        if self.rules.candidate_range.is_empty() {
            return Err(ScanError::Config(format!(
                "candidate range {:?} is empty",
                self.rules.candidate_range
            )));
        }
        if self.window.min_month0 > 11 {
            return Err(ScanError::Config(format!(
                "month index {} is out of range 0-11",
                self.window.min_month0
            )));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_dir: utils::default_cache_dir(),
            page_limit: DEFAULT_PAGE_LIMIT,
            freshness: DEFAULT_FRESHNESS,
            timeout: DEFAULT_TIMEOUT,
            window: TimeWindow::default(),
            rules: SignalRules::default(),
        }
    }
}
