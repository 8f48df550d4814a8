//! Observer events and the two fuzzy commitment strategies side by side

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use reconciliation_core::{
    FuzzyStrategy, MatchEvent, ReconcileConfig, ReconciliationEngine, TransactionRecord,
};

fn tx(index: usize, day: &str, value: &str, description: &str) -> TransactionRecord {
    TransactionRecord::new(index)
        .with_date(NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap())
        .with_amount(BigDecimal::from_str(value).unwrap())
        .with_description(description)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    println!("⚖️  Reconciliation Core - Matching Strategies Example\n");

    // One internal deposit that two bank records both resemble, plus an
    // invoice pair tied together by a document number
    let bank = vec![
        tx(0, "2023-09-02", "100.00", "PIX RECEBIDO LOJA CENTRO"),
        tx(1, "2023-09-03", "100.00", "PIX RECEBIDO LOJA"),
        tx(2, "2023-09-10", "740.00", "NF 1042 SERVICOS PRESTADOS").with_id("NF-1042"),
    ];
    let internal = vec![
        tx(0, "2023-09-02", "100.00", "PIX RECEBIDO LOJA"),
        tx(1, "2023-09-10", "740.00", "NOTA FISCAL 1042").with_id("NF-1042"),
    ];

    // 1. Non-exclusive (the default): every qualifying candidate is kept,
    //    so both bank deposits pair with the same internal record
    let config = ReconcileConfig::default()
        .with_id_field("id")
        .with_similarity_threshold(0.6);
    let engine = ReconciliationEngine::new(config.clone());

    let mut events: Vec<MatchEvent> = Vec::new();
    let result = engine.reconcile_with_observer(&bank, &internal, &mut events)?;

    println!("📡 Observer narration (non-exclusive run):");
    for event in &events {
        match event {
            MatchEvent::PhaseStarted { phase } => println!("  ▶ {phase} phase started"),
            MatchEvent::CandidatesFiltered { bank_index, count } => {
                println!("    bank #{bank_index}: {count} candidate(s) within tolerance")
            }
            MatchEvent::MatchAccepted { phase, score } => {
                println!("    ✓ {phase} match accepted (score {score:.3})")
            }
            MatchEvent::PhaseCompleted { phase, matched } => {
                println!("  ■ {phase} phase complete: {matched} match(es)")
            }
            MatchEvent::RunCompleted { summary } => println!(
                "  ✔ run complete: {} pair(s), rate {:.1}%",
                summary.matched_count,
                summary.match_rate * 100.0
            ),
        }
    }

    println!("\n  Non-exclusive matched pairs: {}", result.matched.len());
    for pair in &result.matched {
        println!(
            "    [{}] bank #{} ↔ internal #{} ({:.3})",
            pair.match_type, pair.bank.index, pair.internal.index, pair.score
        );
    }

    // 2. One-to-one: best score first, each record consumed at most once
    let engine =
        ReconciliationEngine::new(config.with_strategy(FuzzyStrategy::OneToOne));
    let result = engine.reconcile(&bank, &internal)?;

    println!("\n  One-to-one matched pairs: {}", result.matched.len());
    for pair in &result.matched {
        println!(
            "    [{}] bank #{} ↔ internal #{} ({:.3})",
            pair.match_type, pair.bank.index, pair.internal.index, pair.score
        );
    }
    println!(
        "  Left unmatched on the bank side: {:?}",
        result
            .bank_only
            .iter()
            .map(|record| record.index)
            .collect::<Vec<_>>()
    );

    Ok(())
}
