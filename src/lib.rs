//! txsignal - recover a value signal hidden in an address's output amounts
//!
//! Pages an address's history backward from the explorer, caching raw pages
//! on disk, then pulls candidate values out of the amounts paid to the
//! address and drops those contradicted by input-address reuse.

pub mod collector;
pub mod config;
pub mod error;
/// Explorer HTTP client and page source seam
pub mod explorer_client;
pub mod page_cache;
pub mod page_fetcher;
pub mod pipeline;
pub mod signal;
pub mod types;
/// Path helpers
pub mod utils;

pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use pipeline::{run, scan, ScanReport};
