//! Core types and data structures for ledger reconciliation

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Which of the two reconciled ledgers a record or error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSide {
    /// The bank statement feed
    Bank,
    /// The internal accounting feed
    Internal,
}

impl fmt::Display for LedgerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSide::Bank => write!(f, "bank"),
            LedgerSide::Internal => write!(f, "internal"),
        }
    }
}

/// A normalized transaction row from one ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Position of the row within its originating ledger
    pub index: usize,
    /// Business identifier, when the ledger carries one
    pub id: Option<String>,
    /// Transaction date; null when the source value could not be parsed
    pub date: Option<NaiveDate>,
    /// Transaction amount; null when the source value could not be parsed
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Option<BigDecimal>,
    /// Free-text description; null when blank in the source
    pub description: Option<String>,
}

impl TransactionRecord {
    /// Create an empty record at the given ledger position
    pub fn new(index: usize) -> Self {
        Self {
            index,
            id: None,
            date: None,
            amount: None,
            description: None,
        }
    }

    /// Set the business identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the transaction date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the transaction amount
    pub fn with_amount(mut self, amount: BigDecimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the description text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the record carries both fields needed for tolerance comparison
    pub fn is_comparable(&self) -> bool {
        self.date.is_some() && self.amount.is_some()
    }
}

/// Amounts serialize as plain JSON numbers; a value outside f64 range falls
/// back to its decimal string form rather than losing digits silently.
fn serialize_amount<S>(amount: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount {
        Some(value) => match value.to_f64() {
            Some(num) if num.is_finite() => serializer.serialize_f64(num),
            _ => serializer.serialize_str(&value.to_string()),
        },
        None => serializer.serialize_none(),
    }
}

/// How a matched pair was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Paired through identifier equality
    ExactId,
    /// Paired through tolerance filtering plus description similarity
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::ExactId => write!(f, "exact_id"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A pairing of one bank record and one internal record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    /// The bank-side record of the pair
    #[serde(rename = "bank_transaction")]
    pub bank: TransactionRecord,
    /// The internal-side record of the pair
    #[serde(rename = "internal_transaction")]
    pub internal: TransactionRecord,
    /// Normalized similarity in [0.0, 1.0]; identifier matches always carry 1.0
    #[serde(rename = "similarity_score")]
    pub score: f64,
    /// How the pairing was established
    pub match_type: MatchType,
}

impl MatchCandidate {
    /// Pair two records matched by identifier equality
    pub fn exact(bank: TransactionRecord, internal: TransactionRecord) -> Self {
        Self {
            bank,
            internal,
            score: 1.0,
            match_type: MatchType::ExactId,
        }
    }

    /// Pair two records matched by description similarity
    pub fn fuzzy(bank: TransactionRecord, internal: TransactionRecord, score: f64) -> Self {
        Self {
            bank,
            internal,
            score,
            match_type: MatchType::Fuzzy,
        }
    }
}

/// Aggregate counts describing a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationSummary {
    /// Number of records in the bank ledger
    pub total_bank: usize,
    /// Number of records in the internal ledger
    pub total_internal: usize,
    /// Number of matched pairs (pairs, not per-side records)
    pub matched_count: usize,
    /// Bank records with no accepted match
    pub bank_only_count: usize,
    /// Internal records with no accepted match
    pub internal_only_count: usize,
    /// matched_count divided by the larger ledger size (never divides by zero)
    pub match_rate: f64,
}

impl ReconciliationSummary {
    /// Derive the summary from ledger sizes and classification counts
    pub fn new(
        total_bank: usize,
        total_internal: usize,
        matched_count: usize,
        bank_only_count: usize,
        internal_only_count: usize,
    ) -> Self {
        let denominator = total_bank.max(total_internal).max(1);
        Self {
            total_bank,
            total_internal,
            matched_count,
            bank_only_count,
            internal_only_count,
            match_rate: matched_count as f64 / denominator as f64,
        }
    }
}

/// Terminal output of a reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationResult {
    /// Accepted pairs, exact-identifier matches first, then fuzzy matches
    pub matched: Vec<MatchCandidate>,
    /// Bank records that no accepted pair touches, in ledger order
    pub bank_only: Vec<TransactionRecord>,
    /// Internal records that no accepted pair touches, in ledger order
    pub internal_only: Vec<TransactionRecord>,
    /// Aggregate counts for the run
    pub summary: ReconciliationSummary,
}

/// Errors that can occur during reconciliation
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Required field '{field}' not found in {side} ledger (available columns: {available:?})")]
    MissingField {
        field: String,
        side: LedgerSide,
        available: Vec<String>,
    },
    #[error("Empty {side} ledger; nothing to reconcile")]
    EmptyLedger { side: LedgerSide },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
