//! On-disk page cache
//!
//! One file per (address, cursor) pair under a root directory. File contents
//! are the raw explorer response; the file's mtime is the only staleness
//! signal, no TTL is stored alongside.

use crate::error::{Result, ScanError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Identifies one cached page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the most recent page of `address`
    pub fn latest(address: &str) -> Self {
        Self(address.to_string())
    }

    /// Key for the page strictly before `height`
    pub fn before(address: &str, height: i64) -> Self {
        Self(format!("{}-{}", address, height))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filesystem-backed key/value store for raw pages
#[derive(Debug, Clone)]
pub struct PageCache {
    root: PathBuf,
}

impl PageCache {
    /// The directory is created lazily on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    pub fn exists(&self, key: &CacheKey) -> bool {
        self.entry_path(key).is_file()
    }

    pub fn read(&self, key: &CacheKey) -> Result<Vec<u8>> {
        let path = self.entry_path(key);
        std::fs::read(&path).map_err(|e| not_found_or_io(key, path, e))
    }

    /// Store `bytes` under `key`, replacing any previous entry
    pub fn write(&self, key: &CacheKey, bytes: &[u8]) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| ScanError::io(&self.root, e))?;
        }
        let path = self.entry_path(key);
        std::fs::write(&path, bytes).map_err(|e| ScanError::io(path, e))
    }

    pub fn last_modified(&self, key: &CacheKey) -> Result<SystemTime> {
        let path = self.entry_path(key);
        let metadata = std::fs::metadata(&path).map_err(|e| not_found_or_io(key, path.clone(), e))?;
        metadata.modified().map_err(|e| ScanError::io(path, e))
    }

    /// Time since `key` was last written, as seen at `now`
    ///
    /// An mtime ahead of `now` (clock skew) counts as age zero.
    pub fn age(&self, key: &CacheKey, now: SystemTime) -> Result<Duration> {
        let modified = self.last_modified(key)?;
        Ok(now.duration_since(modified).unwrap_or(Duration::ZERO))
    }
}

fn not_found_or_io(key: &CacheKey, path: PathBuf, e: std::io::Error) -> ScanError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ScanError::NotFound {
            key: key.to_string(),
        }
    } else {
        ScanError::io(path, e)
    }
}
