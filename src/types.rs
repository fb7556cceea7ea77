//! Explorer response types
//!
//! Mirrors the subset of BlockCypher's `addrs/{address}/full` payload the
//! scanner reads. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of an address's transaction history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub txs: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    /// Receipt time as reported by the explorer (RFC 3339)
    pub received: String,
    #[serde(default)]
    pub value: u64,
    /// Containing block height (-1 while unconfirmed)
    pub block_height: i64,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub inputs: Vec<Input>,
}

impl Transaction {
    /// Parsed receipt time, `None` if the explorer sent something unparseable
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.received)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// Amount in satoshis
    pub value: u64,
    /// Recipient addresses; absent or `null` for non-standard scripts
    #[serde(default, deserialize_with = "null_as_empty")]
    pub addresses: Vec<String>,
}

impl Output {
    pub fn pays_to(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    /// Source addresses; may repeat, absent on coinbase inputs
    #[serde(default, deserialize_with = "null_as_empty")]
    pub addresses: Vec<String>,
}

impl Input {
    /// Addresses with duplicates removed, first occurrence kept
    pub fn unique_addresses(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.addresses.len());
        for address in &self.addresses {
            if !seen.contains(&address.as_str()) {
                seen.push(address.as_str());
            }
        }
        seen
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_page_deserialization() {
        let body = r#"{
            "address": "mrenegoxBpVDwia9kr6PMrNcLiK3qb3t7F",
            "hasMore": true,
            "txs": [{
                "hash": "ab01",
                "received": "2021-04-12T10:22:33.123Z",
                "value": 1250300,
                "block_height": 1975000,
                "outputs": [
                    {"value": 1250300, "addresses": ["mrenegoxBpVDwia9kr6PMrNcLiK3qb3t7F"]},
                    {"value": 0, "addresses": null, "script_type": "null-data"}
                ],
                "inputs": [{"addresses": ["a", "a", "b"]}, {"output_index": 0}]
            }]
        }"#;

        let page: PageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.txs.len(), 1);
        let tx = &page.txs[0];
        assert_eq!(tx.block_height, 1975000);
        assert!(tx.outputs[0].pays_to("mrenegoxBpVDwia9kr6PMrNcLiK3qb3t7F"));
        assert!(tx.outputs[1].addresses.is_empty());
        assert_eq!(tx.inputs[0].unique_addresses(), vec!["a", "b"]);
        assert!(tx.inputs[1].addresses.is_empty());

        let received = tx.received_at().unwrap();
        assert_eq!(received.year(), 2021);
        assert_eq!(received.month0(), 3);
    }

    #[test]
    fn test_missing_txs_is_empty_page() {
        let page: PageResponse = serde_json::from_str(r#"{"address": "x"}"#).unwrap();
        assert!(page.txs.is_empty());
    }

    #[test]
    fn test_unparseable_receipt_time() {
        let tx = Transaction {
            hash: "h".into(),
            received: "yesterday".into(),
            value: 0,
            block_height: 1,
            outputs: vec![],
            inputs: vec![],
        };
        assert!(tx.received_at().is_none());
    }
}
