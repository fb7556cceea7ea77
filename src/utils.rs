//! Path helpers

use std::path::PathBuf;

/// Cache directory used when none is configured
///
/// `TXSIGNAL_CACHE_DIR` wins; otherwise `./cache` relative to the working
/// directory, matching where earlier runs left their pages.
pub fn default_cache_dir() -> PathBuf {
    if let Ok(env_dir) = std::env::var("TXSIGNAL_CACHE_DIR") {
        return PathBuf::from(env_dir);
    }
    PathBuf::from("./cache")
}

/// Per-user cache location, for callers that don't want pages in the cwd
pub fn user_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .map(|cache| cache.join("txsignal"))
}
