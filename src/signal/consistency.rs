//! Input-address consistency check
//!
//! Every input address is expected to map to a single candidate value for the
//! whole run. A transaction whose input address was previously seen with a
//! different value is a conflict and its candidate is dropped.
//!
//! The registry entry is overwritten with the new value even when the
//! candidate is rejected, and scanning stops at the first conflicting address.

use crate::types::Transaction;
use std::collections::HashMap;
use tracing::warn;

/// An input address seen with two different values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub tx_hash: String,
    pub address: String,
    /// Value being checked
    pub value: u64,
    /// Value previously recorded for the address
    pub previous: u64,
}

/// Seen-input registry for one run
#[derive(Debug, Default)]
pub struct ConsistencyFilter {
    seen: HashMap<String, u64>,
    conflicts: Vec<Conflict>,
}

impl ConsistencyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` against the transaction's input addresses.
    ///
    /// Returns `true` when the candidate must be suppressed.
    pub fn is_conflicting(&mut self, transaction: &Transaction, value: u64) -> bool {
        for input in &transaction.inputs {
            for address in input.unique_addresses() {
                let previous = self.seen.insert(address.to_string(), value);
                if let Some(previous) = previous.filter(|&p| p != value) {
                    warn!(
                        tx = %transaction.hash,
                        value,
                        previous,
                        address,
                        "input address reused with a different value"
                    );
                    self.conflicts.push(Conflict {
                        tx_hash: transaction.hash.clone(),
                        address: address.to_string(),
                        value,
                        previous,
                    });
                    return true;
                }
            }
        }
        false
    }

    /// Last value recorded for `address`
    pub fn recorded(&self, address: &str) -> Option<u64> {
        self.seen.get(address).copied()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn into_conflicts(self) -> Vec<Conflict> {
        self.conflicts
    }
}
