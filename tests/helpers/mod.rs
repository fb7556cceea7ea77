//! Test helpers: in-memory explorers and transaction builders

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use txsignal::explorer_client::{Endpoint, PageSource, RawResponse};
use txsignal::page_fetcher::Cursor;
use txsignal::{Result, ScanConfig};

pub const ADDRESS: &str = "mrenegoxBpVDwia9kr6PMrNcLiK3qb3t7F";
pub const ENDPOINT: &str = "http://explorer.test/v1/btc/test3";

pub fn config(cache_dir: &Path) -> ScanConfig {
    ScanConfig::new(ADDRESS)
        .with_endpoint(ENDPOINT)
        .with_cache_dir(cache_dir)
}

pub fn endpoint() -> Endpoint {
    Endpoint::new(ENDPOINT, ADDRESS, 30)
}

/// Transaction JSON as the explorer would send it
pub fn tx(
    hash: &str,
    received: &str,
    block_height: i64,
    outputs: &[(u64, &[&str])],
    inputs: &[&[&str]],
) -> Value {
    json!({
        "hash": hash,
        "received": received,
        "value": outputs.iter().map(|(v, _)| *v).sum::<u64>(),
        "block_height": block_height,
        "outputs": outputs
            .iter()
            .map(|(value, addresses)| json!({"value": value, "addresses": addresses}))
            .collect::<Vec<_>>(),
        "inputs": inputs
            .iter()
            .map(|addresses| json!({"addresses": addresses}))
            .collect::<Vec<_>>(),
    })
}

/// A payment of `amount` to the target address from `from`
pub fn payment(hash: &str, received: &str, block_height: i64, amount: u64, from: &str) -> Value {
    tx(hash, received, block_height, &[(amount, &[ADDRESS])], &[&[from]])
}

pub fn page_body(txs: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({ "address": ADDRESS, "txs": txs })).unwrap()
}

/// Explorer with canned responses per cursor; unknown URIs get an empty page
#[derive(Default)]
pub struct ScriptedExplorer {
    responses: HashMap<String, RawResponse>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, cursor: Cursor, txs: Vec<Value>) -> Self {
        self.with_response(cursor, 200, page_body(txs))
    }

    pub fn with_response(mut self, cursor: Cursor, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(
            endpoint().page_uri(cursor),
            RawResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedExplorer {
    async fn get(&self, uri: &str) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(uri.to_string());
        Ok(self.responses.get(uri).cloned().unwrap_or_else(|| RawResponse {
            status: 200,
            body: page_body(vec![]),
        }))
    }
}

/// Explorer serving a fixed history the way BlockCypher does: newest first,
/// `before` exclusive, at most `limit` per page
pub struct HistoryExplorer {
    history: Vec<Value>,
    requests: Mutex<Vec<String>>,
}

impl HistoryExplorer {
    pub fn new(history: Vec<Value>) -> Self {
        Self {
            history,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for HistoryExplorer {
    async fn get(&self, uri: &str) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(uri.to_string());
        let before = query_param(uri, "before");
        let limit = query_param(uri, "limit").unwrap_or(30) as usize;

        let txs = self
            .history
            .iter()
            .filter(|tx| before.map_or(true, |b| tx["block_height"].as_i64().unwrap() < b))
            .take(limit)
            .cloned()
            .collect();
        Ok(RawResponse {
            status: 200,
            body: page_body(txs),
        })
    }
}

/// Integer query parameter of `uri`
pub fn query_param(uri: &str, name: &str) -> Option<i64> {
    let query = uri.split_once('?')?.1;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| value.parse().ok())
}
