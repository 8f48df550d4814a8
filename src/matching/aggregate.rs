//! Aggregation of match sets into the terminal reconciliation result

use indexmap::IndexSet;

use crate::types::{
    MatchCandidate, ReconciliationResult, ReconciliationSummary, TransactionRecord,
};

/// Merge the exact and fuzzy match sets and derive the residual partitions.
///
/// The matched sequence keeps exact pairs first and fuzzy pairs second, each
/// in discovery order. Residual classification is first-seen-wins: a record
/// index touched by any pair never appears in a `*_only` set, while duplicate
/// pairs produced by non-exclusive matching stay in `matched` untouched.
pub(crate) fn build_result(
    bank: &[TransactionRecord],
    internal: &[TransactionRecord],
    exact: Vec<MatchCandidate>,
    fuzzy: Vec<MatchCandidate>,
) -> ReconciliationResult {
    let mut matched = exact;
    matched.extend(fuzzy);

    let matched_bank: IndexSet<usize> = matched.iter().map(|pair| pair.bank.index).collect();
    let matched_internal: IndexSet<usize> =
        matched.iter().map(|pair| pair.internal.index).collect();

    let bank_only: Vec<TransactionRecord> = bank
        .iter()
        .filter(|record| !matched_bank.contains(&record.index))
        .cloned()
        .collect();
    let internal_only: Vec<TransactionRecord> = internal
        .iter()
        .filter(|record| !matched_internal.contains(&record.index))
        .cloned()
        .collect();

    let summary = ReconciliationSummary::new(
        bank.len(),
        internal.len(),
        matched.len(),
        bank_only.len(),
        internal_only.len(),
    );

    ReconciliationResult {
        matched,
        bank_only,
        internal_only,
        summary,
    }
}
