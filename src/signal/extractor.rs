//! Candidate extraction
//!
//! A candidate is the sub-million remainder of an output paying the target
//! address, kept only when it lands inside the configured range.

use crate::config::SignalRules;
use crate::types::Transaction;

/// One candidate value and the transaction it came from
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub transaction: &'a Transaction,
    pub output_index: usize,
    pub value: u64,
}

/// Candidate derived from a single output amount, if any
pub fn candidate_value(output_value: u64, rules: &SignalRules) -> Option<u64> {
    if output_value < rules.min_output_value {
        return None;
    }
    let value = output_value % rules.modulus;
    rules.candidate_range.contains(&value).then_some(value)
}

/// All candidates in transaction order, then output order
pub fn extract_candidates<'a>(
    transactions: &'a [Transaction],
    address: &str,
    rules: &SignalRules,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    for transaction in transactions {
        for (output_index, output) in transaction.outputs.iter().enumerate() {
            if !output.pays_to(address) {
                continue;
            }
            if let Some(value) = candidate_value(output.value, rules) {
                candidates.push(Candidate {
                    transaction,
                    output_index,
                    value,
                });
            }
        }
    }
    candidates
}
