//! Signal recovery
//!
//! Turns the collected history into the final value list.
//!
//! ## Steps
//!
//! 1. **Extract**: every output paying the target address with an amount of at
//!    least the floor yields `amount % modulus`, kept when inside the range
//! 2. **Vet**: each candidate's transaction inputs are checked against the
//!    seen-input registry; conflicting candidates are dropped and logged
//! 3. **Assemble**: admitted values are reversed to oldest first and
//!    deduplicated, first occurrence wins

pub mod assembly;
pub mod consistency;
pub mod extractor;

pub use assembly::assemble;
pub use consistency::{Conflict, ConsistencyFilter};
pub use extractor::{candidate_value, extract_candidates, Candidate};

use crate::config::SignalRules;
use crate::types::Transaction;

/// Result of analysing one collected history
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Candidates that passed the consistency check, in extraction order
    pub admitted: Vec<u64>,
    pub conflicts: Vec<Conflict>,
    /// Final output list
    pub values: Vec<u64>,
}

/// Run extraction, vetting and assembly over `transactions`
pub fn analyze(transactions: &[Transaction], address: &str, rules: &SignalRules) -> Analysis {
    let mut filter = ConsistencyFilter::new();
    let mut admitted = Vec::new();

    for candidate in extract_candidates(transactions, address, rules) {
        if filter.is_conflicting(candidate.transaction, candidate.value) {
            continue;
        }
        admitted.push(candidate.value);
    }

    let values = assemble(&admitted);
    Analysis {
        admitted,
        conflicts: filter.into_conflicts(),
        values,
    }
}
