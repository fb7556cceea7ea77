//! BlockCypher explorer client
//!
//! Thin wrapper around the `addrs/{address}/full` endpoint. The page fetcher
//! talks to it through [`PageSource`], so tests can substitute an in-memory
//! source.

use crate::config::ScanConfig;
use crate::error::Result;
use crate::page_fetcher::Cursor;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Status and body of one explorer response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, for error messages
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can answer a GET for a page URI
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, uri: &str) -> Result<RawResponse>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn get(&self, uri: &str) -> Result<RawResponse> {
        (**self).get(uri).await
    }
}

/// Builds page URIs for one address
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: String,
    address: String,
    limit: u32,
}

impl Endpoint {
    pub fn new(base: &str, address: &str, limit: u32) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            address: address.to_string(),
            limit,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(&config.endpoint, &config.address, config.page_limit)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// URI of the page at `cursor`; the newest page carries no `before`
    pub fn page_uri(&self, cursor: Cursor) -> String {
        match cursor {
            Cursor::Unbounded => format!(
                "{}/addrs/{}/full?limit={}",
                self.base, self.address, self.limit
            ),
            Cursor::Before(height) => format!(
                "{}/addrs/{}/full?before={}&limit={}",
                self.base, self.address, height, self.limit
            ),
        }
    }
}

/// Explorer HTTP client
pub struct ExplorerClient {
    client: Client,
}

impl ExplorerClient {
    /// Create a new client with the configured request timeout
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("txsignal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for ExplorerClient {
    async fn get(&self, uri: &str) -> Result<RawResponse> {
        tracing::debug!(uri, "requesting page");
        let response = self.client.get(uri).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}
