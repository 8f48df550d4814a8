//! Reconciliation engine configuration

use bigdecimal::BigDecimal;

use crate::types::{ReconcileError, ReconcileResult};

/// How fuzzy candidates are committed into the matched set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FuzzyStrategy {
    /// Emit every candidate that clears the threshold. A record may appear
    /// in multiple accepted pairs; no best-of selection is performed.
    #[default]
    NonExclusive,
    /// Commit candidates best-score-first, consuming each record at most
    /// once. Score ties break by bank index, then internal index.
    OneToOne,
}

/// Configuration for a reconciliation run.
///
/// Always passed explicitly to the engine; there are no process-wide
/// defaults, so concurrent runs with different settings never interfere.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileConfig {
    /// Column holding the transaction date
    pub date_field: String,
    /// Column holding the transaction amount
    pub value_field: String,
    /// Column holding the description text
    pub description_field: String,
    /// Column holding a unique business identifier; `None` disables
    /// exact-identifier matching
    pub id_field: Option<String>,
    /// Maximum whole-day date difference for fuzzy candidacy, inclusive
    pub date_tolerance_days: u32,
    /// Maximum absolute amount difference for fuzzy candidacy, inclusive
    pub value_tolerance: BigDecimal,
    /// Minimum similarity score for accepting a fuzzy match, in [0.0, 1.0]
    pub similarity_threshold: f64,
    /// How fuzzy candidates are committed
    pub strategy: FuzzyStrategy,
}

impl ReconcileConfig {
    /// Create a configuration naming the three required columns, with
    /// default tolerances (1 day, 0.01) and threshold (0.8)
    pub fn new(
        date_field: impl Into<String>,
        value_field: impl Into<String>,
        description_field: impl Into<String>,
    ) -> Self {
        Self {
            date_field: date_field.into(),
            value_field: value_field.into(),
            description_field: description_field.into(),
            id_field: None,
            date_tolerance_days: 1,
            value_tolerance: BigDecimal::new(1.into(), 2),
            similarity_threshold: 0.8,
            strategy: FuzzyStrategy::default(),
        }
    }

    /// Enable exact-identifier matching on the given column
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = Some(id_field.into());
        self
    }

    /// Set the inclusive date tolerance in whole days
    pub fn with_date_tolerance_days(mut self, days: u32) -> Self {
        self.date_tolerance_days = days;
        self
    }

    /// Set the inclusive absolute amount tolerance
    pub fn with_value_tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.value_tolerance = tolerance;
        self
    }

    /// Set the minimum similarity score for fuzzy acceptance
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the fuzzy commitment strategy
    pub fn with_strategy(mut self, strategy: FuzzyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check value ranges before any matching work begins
    pub fn validate(&self) -> ReconcileResult<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ReconcileError::InvalidConfig(format!(
                "similarity_threshold must be within [0.0, 1.0], got {}",
                self.similarity_threshold
            )));
        }
        if self.value_tolerance < BigDecimal::from(0) {
            return Err(ReconcileError::InvalidConfig(format!(
                "value_tolerance must be non-negative, got {}",
                self.value_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for ReconcileConfig {
    /// Defaults suit typed-record input: plain `date` / `amount` /
    /// `description` column names with the standard tolerances
    fn default() -> Self {
        Self::new("date", "amount", "description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_tolerances() {
        let config = ReconcileConfig::default();
        assert_eq!(config.date_tolerance_days, 1);
        assert_eq!(config.value_tolerance, BigDecimal::from_str("0.01").unwrap());
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.id_field, None);
        assert_eq!(config.strategy, FuzzyStrategy::NonExclusive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = ReconcileConfig::new("Data", "Valor", "Descricao")
            .with_id_field("Documento")
            .with_date_tolerance_days(3)
            .with_value_tolerance(BigDecimal::from_str("0.05").unwrap())
            .with_similarity_threshold(0.5)
            .with_strategy(FuzzyStrategy::OneToOne);

        assert_eq!(config.date_field, "Data");
        assert_eq!(config.id_field.as_deref(), Some("Documento"));
        assert_eq!(config.date_tolerance_days, 3);
        assert_eq!(config.value_tolerance, BigDecimal::from_str("0.05").unwrap());
        assert_eq!(config.similarity_threshold, 0.5);
        assert_eq!(config.strategy, FuzzyStrategy::OneToOne);
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let config = ReconcileConfig::default().with_similarity_threshold(1.5);
        assert!(config.validate().is_err());

        let config = ReconcileConfig::default().with_similarity_threshold(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let config = ReconcileConfig::default()
            .with_value_tolerance(BigDecimal::from_str("-0.01").unwrap());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        assert!(ReconcileConfig::default()
            .with_similarity_threshold(0.0)
            .validate()
            .is_ok());
        assert!(ReconcileConfig::default()
            .with_similarity_threshold(1.0)
            .validate()
            .is_ok());
    }
}
