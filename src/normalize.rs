//! Boundary normalization of loosely-typed tabular rows

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::ReconcileConfig;
use crate::types::{LedgerSide, ReconcileError, ReconcileResult, TransactionRecord};

/// A raw tabular row with caller-chosen column names
pub type RawRecord = HashMap<String, Value>;

/// Date formats accepted at the boundary, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Convert one ledger's raw rows into typed records.
///
/// Fails fast when the ledger is empty or when a required column is missing
/// from the ledger's schema (the union of keys across its rows). Individual
/// values that cannot be coerced become null fields: the record is kept,
/// stays countable in totals, and is simply excluded from fuzzy candidacy.
pub fn normalize_ledger(
    side: LedgerSide,
    rows: &[RawRecord],
    config: &ReconcileConfig,
) -> ReconcileResult<Vec<TransactionRecord>> {
    if rows.is_empty() {
        return Err(ReconcileError::EmptyLedger { side });
    }
    validate_columns(side, rows, config)?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(side, index, row, config))
        .collect();
    Ok(records)
}

/// Check that every required column appears in the ledger's schema.
///
/// The identifier column is deliberately not checked: its absence opts the
/// ledger out of exact-identifier matching rather than failing the run.
fn validate_columns(
    side: LedgerSide,
    rows: &[RawRecord],
    config: &ReconcileConfig,
) -> ReconcileResult<()> {
    let schema: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    for field in [
        &config.date_field,
        &config.value_field,
        &config.description_field,
    ] {
        if !schema.contains(field.as_str()) {
            return Err(ReconcileError::MissingField {
                field: field.clone(),
                side,
                available: schema.iter().map(|name| name.to_string()).collect(),
            });
        }
    }
    Ok(())
}

fn normalize_row(
    side: LedgerSide,
    index: usize,
    row: &RawRecord,
    config: &ReconcileConfig,
) -> TransactionRecord {
    let date = match row.get(&config.date_field) {
        Some(value) => {
            let parsed = coerce_date(value);
            if parsed.is_none() && !value.is_null() {
                tracing::warn!(
                    side = %side,
                    row = index,
                    column = %config.date_field,
                    "unparseable date value {value}, treated as null"
                );
            }
            parsed
        }
        None => None,
    };

    let amount = match row.get(&config.value_field) {
        Some(value) => {
            let parsed = coerce_amount(value);
            if parsed.is_none() && !value.is_null() {
                tracing::warn!(
                    side = %side,
                    row = index,
                    column = %config.value_field,
                    "unparseable amount value {value}, treated as null"
                );
            }
            parsed
        }
        None => None,
    };

    let description = row.get(&config.description_field).and_then(coerce_text);
    let id = config
        .id_field
        .as_ref()
        .and_then(|field| row.get(field))
        .and_then(coerce_scalar);

    TransactionRecord {
        index,
        id,
        date,
        amount,
        description,
    }
}

/// Parse a date value, accepting the formats the ingestion layers emit
fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Parse an amount from a JSON number or a decimal string.
///
/// String amounts accept both separator conventions: whichever of comma and
/// dot occurs last is taken as the decimal separator, the other is stripped
/// as a thousands separator ("1.250,50" and "1,250.50" both parse to 1250.50).
fn coerce_amount(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(number) => BigDecimal::from_str(&number.to_string()).ok(),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(value) = BigDecimal::from_str(text) {
        return Some(value);
    }

    let cleaned = match (text.rfind(','), text.rfind('.')) {
        (Some(comma), Some(dot)) if dot > comma => text.replace(',', ""),
        (Some(_), _) => text.replace('.', "").replace(',', "."),
        (None, _) => return None,
    };
    BigDecimal::from_str(&cleaned).ok()
}

/// Extract description text; blank strings become null so two
/// blank-description records can never score as trivially similar
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Extract an identifier as text; numeric ids are common in exported
/// statements and compare by their decimal rendering
fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn config() -> ReconcileConfig {
        ReconcileConfig::new("Data", "Valor", "Descricao")
    }

    #[test]
    fn test_normalizes_basic_row() {
        let rows = vec![row(&[
            ("Data", json!("2023-09-02")),
            ("Valor", json!(250.50)),
            ("Descricao", json!("  PIX RECEBIDO  ")),
        ])];

        let records = normalize_ledger(LedgerSide::Bank, &rows, &config()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2023, 9, 2));
        assert_eq!(
            records[0].amount,
            Some(BigDecimal::from_str("250.5").unwrap())
        );
        assert_eq!(records[0].description.as_deref(), Some("PIX RECEBIDO"));
        assert_eq!(records[0].id, None);
    }

    #[test]
    fn test_accepts_alternate_date_formats() {
        assert_eq!(
            coerce_date(&json!("02/09/2023")),
            NaiveDate::from_ymd_opt(2023, 9, 2)
        );
        assert_eq!(
            coerce_date(&json!("02-09-2023")),
            NaiveDate::from_ymd_opt(2023, 9, 2)
        );
        assert_eq!(coerce_date(&json!("not a date")), None);
        assert_eq!(coerce_date(&json!(20230902)), None);
    }

    #[test]
    fn test_amount_separator_conventions() {
        assert_eq!(
            parse_decimal("250,50"),
            Some(BigDecimal::from_str("250.50").unwrap())
        );
        assert_eq!(
            parse_decimal("1.250,50"),
            Some(BigDecimal::from_str("1250.50").unwrap())
        );
        assert_eq!(
            parse_decimal("1,250.50"),
            Some(BigDecimal::from_str("1250.50").unwrap())
        );
        assert_eq!(parse_decimal("R$ 250,50"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_unparseable_values_become_null() {
        let rows = vec![row(&[
            ("Data", json!("02.09.2023")),
            ("Valor", json!("two hundred")),
            ("Descricao", json!("   ")),
        ])];

        let records = normalize_ledger(LedgerSide::Internal, &rows, &config()).unwrap();
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].amount, None);
        assert_eq!(records[0].description, None);
        assert!(!records[0].is_comparable());
    }

    #[test]
    fn test_row_missing_a_key_coerces_to_null() {
        let rows = vec![
            row(&[
                ("Data", json!("2023-09-02")),
                ("Valor", json!(10)),
                ("Descricao", json!("full row")),
            ]),
            row(&[("Data", json!("2023-09-03")), ("Descricao", json!("no amount"))]),
        ];

        let records = normalize_ledger(LedgerSide::Bank, &rows, &config()).unwrap();
        assert_eq!(records[1].amount, None);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2023, 9, 3));
    }

    #[test]
    fn test_missing_required_column_names_field_and_side() {
        let rows = vec![row(&[("Data", json!("2023-09-02")), ("Valor", json!(10))])];

        let err = normalize_ledger(LedgerSide::Internal, &rows, &config()).unwrap_err();
        match err {
            ReconcileError::MissingField {
                field,
                side,
                available,
            } => {
                assert_eq!(field, "Descricao");
                assert_eq!(side, LedgerSide::Internal);
                assert_eq!(available, vec!["Data".to_string(), "Valor".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_ledger_is_rejected_before_column_checks() {
        let err = normalize_ledger(LedgerSide::Bank, &[], &config()).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::EmptyLedger {
                side: LedgerSide::Bank
            }
        ));
    }

    #[test]
    fn test_missing_id_column_is_not_an_error() {
        let rows = vec![row(&[
            ("Data", json!("2023-09-02")),
            ("Valor", json!(10)),
            ("Descricao", json!("x")),
        ])];
        let config = config().with_id_field("Documento");

        let records = normalize_ledger(LedgerSide::Bank, &rows, &config).unwrap();
        assert_eq!(records[0].id, None);
    }

    #[test]
    fn test_numeric_identifiers_become_text() {
        let rows = vec![row(&[
            ("Data", json!("2023-09-02")),
            ("Valor", json!(10)),
            ("Descricao", json!("x")),
            ("Documento", json!(4711)),
        ])];
        let config = config().with_id_field("Documento");

        let records = normalize_ledger(LedgerSide::Bank, &rows, &config).unwrap();
        assert_eq!(records[0].id.as_deref(), Some("4711"));
    }
}
