//! Reconciliation engine orchestration

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::ReconcileConfig;
use crate::matching::{aggregate, exact, fuzzy};
use crate::normalize::{self, RawRecord};
use crate::traits::{MatchEvent, MatchObserver, MatchPhase, NullObserver};
use crate::types::{
    LedgerSide, ReconcileError, ReconcileResult, ReconciliationResult, TransactionRecord,
};

/// Two-phase ledger reconciliation engine.
///
/// Runs exact-identifier matching first (identifier equality is
/// authoritative), then tolerance-plus-similarity fuzzy matching over the
/// remainder, and finally aggregates both match sets into matched pairs and
/// per-side residuals. The engine holds only its configuration: every run
/// is an independent computation over caller-supplied records, so a single
/// engine value serves concurrent requests without shared state.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    config: ReconcileConfig,
}

impl ReconciliationEngine {
    /// Create an engine with the given configuration
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconcile two typed ledgers
    pub fn reconcile(
        &self,
        bank: &[TransactionRecord],
        internal: &[TransactionRecord],
    ) -> ReconcileResult<ReconciliationResult> {
        self.reconcile_with_observer(bank, internal, &mut NullObserver)
    }

    /// Reconcile two typed ledgers, narrating progress into `observer`
    pub fn reconcile_with_observer(
        &self,
        bank: &[TransactionRecord],
        internal: &[TransactionRecord],
        observer: &mut dyn MatchObserver,
    ) -> ReconcileResult<ReconciliationResult> {
        // Preconditions fail the whole request before any matching work
        self.config.validate()?;
        ensure_not_empty(LedgerSide::Bank, bank)?;
        ensure_not_empty(LedgerSide::Internal, internal)?;

        info!(
            total_bank = bank.len(),
            total_internal = internal.len(),
            "starting reconciliation"
        );

        // Phase 1: identifier matching, skipped entirely when no identifier
        // column is configured
        observer.on_event(MatchEvent::PhaseStarted {
            phase: MatchPhase::Exact,
        });
        let exact_matches = if self.config.id_field.is_some() {
            exact::match_exact_ids(bank, internal)
        } else {
            Vec::new()
        };
        for pair in &exact_matches {
            observer.on_event(MatchEvent::MatchAccepted {
                phase: MatchPhase::Exact,
                score: pair.score,
            });
        }
        observer.on_event(MatchEvent::PhaseCompleted {
            phase: MatchPhase::Exact,
            matched: exact_matches.len(),
        });
        debug!(matched = exact_matches.len(), "exact phase complete");

        // Phase 2: fuzzy matching over records no exact pair touched
        observer.on_event(MatchEvent::PhaseStarted {
            phase: MatchPhase::Fuzzy,
        });
        let exact_bank: HashSet<usize> = exact_matches.iter().map(|p| p.bank.index).collect();
        let exact_internal: HashSet<usize> =
            exact_matches.iter().map(|p| p.internal.index).collect();
        let remaining_bank: Vec<&TransactionRecord> = bank
            .iter()
            .filter(|record| !exact_bank.contains(&record.index))
            .collect();
        let remaining_internal: Vec<&TransactionRecord> = internal
            .iter()
            .filter(|record| !exact_internal.contains(&record.index))
            .collect();

        let scans = fuzzy::scan_candidates(&remaining_bank, &remaining_internal, &self.config);
        for scan in &scans {
            observer.on_event(MatchEvent::CandidatesFiltered {
                bank_index: scan.bank_index,
                count: scan.candidate_count,
            });
        }
        let fuzzy_matches = fuzzy::resolve_matches(scans, self.config.strategy);
        for pair in &fuzzy_matches {
            observer.on_event(MatchEvent::MatchAccepted {
                phase: MatchPhase::Fuzzy,
                score: pair.score,
            });
        }
        observer.on_event(MatchEvent::PhaseCompleted {
            phase: MatchPhase::Fuzzy,
            matched: fuzzy_matches.len(),
        });
        debug!(matched = fuzzy_matches.len(), "fuzzy phase complete");

        // Terminal aggregation
        let result = aggregate::build_result(bank, internal, exact_matches, fuzzy_matches);
        observer.on_event(MatchEvent::RunCompleted {
            summary: result.summary.clone(),
        });
        info!(
            matched = result.summary.matched_count,
            bank_only = result.summary.bank_only_count,
            internal_only = result.summary.internal_only_count,
            match_rate = result.summary.match_rate,
            "reconciliation complete"
        );
        Ok(result)
    }

    /// Normalize raw tabular rows for both sides, then reconcile
    pub fn reconcile_rows(
        &self,
        bank_rows: &[RawRecord],
        internal_rows: &[RawRecord],
    ) -> ReconcileResult<ReconciliationResult> {
        self.reconcile_rows_with_observer(bank_rows, internal_rows, &mut NullObserver)
    }

    /// Normalize raw tabular rows for both sides, then reconcile with
    /// progress narration
    pub fn reconcile_rows_with_observer(
        &self,
        bank_rows: &[RawRecord],
        internal_rows: &[RawRecord],
        observer: &mut dyn MatchObserver,
    ) -> ReconcileResult<ReconciliationResult> {
        let bank = normalize::normalize_ledger(LedgerSide::Bank, bank_rows, &self.config)?;
        let internal =
            normalize::normalize_ledger(LedgerSide::Internal, internal_rows, &self.config)?;
        self.reconcile_with_observer(&bank, &internal, observer)
    }
}

fn ensure_not_empty(side: LedgerSide, records: &[TransactionRecord]) -> ReconcileResult<()> {
    if records.is_empty() {
        return Err(ReconcileError::EmptyLedger { side });
    }
    Ok(())
}
