//! Tolerance filtering and fuzzy candidate scanning

use std::collections::HashSet;

use rayon::prelude::*;

use crate::config::{FuzzyStrategy, ReconcileConfig};
use crate::matching::similarity::description_similarity;
use crate::types::{MatchCandidate, TransactionRecord};

/// Outcome of scanning one bank record against the candidate pool
#[derive(Debug)]
pub(crate) struct BankScan {
    /// Ledger index of the scanned bank record
    pub bank_index: usize,
    /// Candidates that survived tolerance filtering
    pub candidate_count: usize,
    /// Candidates that also cleared the similarity threshold
    pub accepted: Vec<MatchCandidate>,
}

/// Whether two records fall within both configured tolerances.
///
/// Bounds are inclusive and conjunctive: a pair exactly at the day bound and
/// exactly at the amount bound qualifies, and widening one tolerance alone
/// never admits a pair the other tolerance rejects. A missing date or amount
/// on either side makes the pair incomparable.
pub fn within_tolerance(
    bank: &TransactionRecord,
    internal: &TransactionRecord,
    config: &ReconcileConfig,
) -> bool {
    let (bank_date, internal_date) = match (bank.date, internal.date) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };
    let (bank_amount, internal_amount) = match (&bank.amount, &internal.amount) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    let day_delta = bank_date
        .signed_duration_since(internal_date)
        .num_days()
        .abs();
    if day_delta > i64::from(config.date_tolerance_days) {
        return false;
    }

    (bank_amount - internal_amount).abs() <= config.value_tolerance
}

/// Scan every remaining bank record against the remaining internal records.
///
/// Each scan reads only shared immutable data and writes only its own
/// accumulator, so the bank records are partitioned across a parallel
/// iterator; collection preserves bank-ledger order, keeping the output
/// identical to a sequential pass.
pub(crate) fn scan_candidates(
    bank: &[&TransactionRecord],
    internal: &[&TransactionRecord],
    config: &ReconcileConfig,
) -> Vec<BankScan> {
    bank.par_iter()
        .map(|bank_record| scan_one(bank_record, internal, config))
        .collect()
}

/// Filter, score, and accept candidates for a single bank record, in
/// internal-ledger order. Every candidate at or above the threshold is
/// accepted; there is no best-of selection at this stage.
fn scan_one(
    bank_record: &TransactionRecord,
    internal: &[&TransactionRecord],
    config: &ReconcileConfig,
) -> BankScan {
    let mut scan = BankScan {
        bank_index: bank_record.index,
        candidate_count: 0,
        accepted: Vec::new(),
    };
    if !bank_record.is_comparable() {
        return scan;
    }

    for internal_record in internal {
        if !within_tolerance(bank_record, internal_record, config) {
            continue;
        }
        scan.candidate_count += 1;

        let score = description_similarity(
            bank_record.description.as_deref(),
            internal_record.description.as_deref(),
        );
        if score >= config.similarity_threshold {
            scan.accepted.push(MatchCandidate::fuzzy(
                bank_record.clone(),
                (*internal_record).clone(),
                score,
            ));
        }
    }
    scan
}

/// Flatten per-record scans into the final fuzzy match list according to
/// the configured strategy
pub(crate) fn resolve_matches(scans: Vec<BankScan>, strategy: FuzzyStrategy) -> Vec<MatchCandidate> {
    let candidates: Vec<MatchCandidate> = scans
        .into_iter()
        .flat_map(|scan| scan.accepted)
        .collect();

    match strategy {
        FuzzyStrategy::NonExclusive => candidates,
        FuzzyStrategy::OneToOne => resolve_one_to_one(candidates),
    }
}

/// Best-score-first assignment where each record is consumed at most once.
/// Ties break by bank index, then internal index, so the committed set is
/// deterministic regardless of scan partitioning.
fn resolve_one_to_one(mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.bank.index.cmp(&b.bank.index))
            .then(a.internal.index.cmp(&b.internal.index))
    });

    let mut claimed_bank: HashSet<usize> = HashSet::new();
    let mut claimed_internal: HashSet<usize> = HashSet::new();
    let mut committed = Vec::new();
    for candidate in candidates {
        if claimed_bank.contains(&candidate.bank.index)
            || claimed_internal.contains(&candidate.internal.index)
        {
            continue;
        }
        claimed_bank.insert(candidate.bank.index);
        claimed_internal.insert(candidate.internal.index);
        committed.push(candidate);
    }
    committed
}
