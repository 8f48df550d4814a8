//! # Reconciliation Core
//!
//! A bank reconciliation library that identifies which records in a bank
//! statement feed and an internal accounting feed represent the same
//! real-world transaction, despite differing identifiers, minor date drift,
//! and inconsistent description text.
//!
//! ## Features
//!
//! - **Two-phase matching**: authoritative exact-identifier pairing first,
//!   then tolerance-based fuzzy matching over the remainder
//! - **Tolerance filtering**: inclusive, conjunctive date and amount bounds
//!   with exact decimal arithmetic
//! - **Description similarity**: case-insensitive bigram-overlap scoring
//!   against a configurable threshold
//! - **Matching strategies**: the classic non-exclusive greedy pass, or
//!   strict one-to-one assignment
//! - **Boundary normalization**: loosely-typed tabular rows with
//!   caller-chosen column names coerced into a fixed typed schema
//! - **Structured observability**: progress narrated as discrete events into
//!   an injected observer, plus `tracing` diagnostics
//! - **Parallel scanning**: the fuzzy scan partitions bank records across a
//!   thread pool without changing output order
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use reconciliation_core::{ReconcileConfig, ReconciliationEngine, TransactionRecord};
//!
//! let bank = vec![TransactionRecord::new(0)
//!     .with_date(NaiveDate::from_ymd_opt(2023, 9, 2).unwrap())
//!     .with_amount(BigDecimal::from(250))
//!     .with_description("PIX RECEBIDO LOJA 42")];
//! let internal = vec![TransactionRecord::new(0)
//!     .with_date(NaiveDate::from_ymd_opt(2023, 9, 2).unwrap())
//!     .with_amount(BigDecimal::from(250))
//!     .with_description("PIX RECEBIDO LOJA 42")];
//!
//! let engine = ReconciliationEngine::new(ReconcileConfig::default());
//! let result = engine.reconcile(&bank, &internal)?;
//! assert_eq!(result.summary.matched_count, 1);
//! # Ok::<(), reconciliation_core::ReconcileError>(())
//! ```

pub mod config;
pub mod matching;
pub mod normalize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::*;
pub use matching::*;
pub use normalize::*;
pub use traits::*;
pub use types::*;
