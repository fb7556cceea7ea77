//! Final ordering of admitted values

use std::collections::HashSet;

/// Flip explorer order (newest first) to oldest first
pub fn oldest_first(values: &[u64]) -> Vec<u64> {
    values.iter().rev().copied().collect()
}

/// Drop repeats, keeping the first occurrence
pub fn dedupe_keep_first(values: &[u64]) -> Vec<u64> {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().copied().filter(|v| seen.insert(*v)).collect()
}

/// Admitted values in extraction order → output list
pub fn assemble(admitted: &[u64]) -> Vec<u64> {
    dedupe_keep_first(&oldest_first(admitted))
}
