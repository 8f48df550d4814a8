//! Basic reconciliation walkthrough over raw statement rows

use std::collections::HashMap;

use serde_json::{json, Value};

use reconciliation_core::{RawRecord, ReconcileConfig, ReconciliationEngine};

fn row(pairs: &[(&str, Value)]) -> RawRecord {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect::<HashMap<_, _>>()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("🏦 Reconciliation Core - Basic Example\n");

    // 1. Two ledgers as they arrive from ingestion: bank statement rows and
    //    internal accounting rows, with Portuguese column headers
    let bank_rows = vec![
        row(&[
            ("Data", json!("2023-09-02")),
            ("Valor", json!(250.50)),
            ("Descricao", json!("TRANSFERENCIA PIX RECEBIDA")),
        ]),
        row(&[
            ("Data", json!("2023-09-04")),
            ("Valor", json!(-89.90)),
            ("Descricao", json!("PAGAMENTO BOLETO ENERGIA")),
        ]),
        row(&[
            ("Data", json!("2023-09-05")),
            ("Valor", json!(-12.00)),
            ("Descricao", json!("TARIFA PACOTE SERVICOS")),
        ]),
    ];
    let internal_rows = vec![
        row(&[
            ("Data", json!("2023-09-02")),
            ("Valor", json!(250.50)),
            ("Descricao", json!("PIX RECEBIDO CLIENTE")),
        ]),
        row(&[
            ("Data", json!("2023-09-05")),
            ("Valor", json!("-89,90")),
            ("Descricao", json!("BOLETO ENERGIA PAGO")),
        ]),
        row(&[
            ("Data", json!("2023-09-20")),
            ("Valor", json!(1500.00)),
            ("Descricao", json!("FATURAMENTO SERVICOS")),
        ]),
    ];

    // 2. Configure and run the engine
    let config = ReconcileConfig::new("Data", "Valor", "Descricao")
        .with_date_tolerance_days(1)
        .with_similarity_threshold(0.5);
    let engine = ReconciliationEngine::new(config);

    let result = engine.reconcile_rows(&bank_rows, &internal_rows)?;

    // 3. Walk the outcome
    println!("🔗 Matched pairs:");
    for pair in &result.matched {
        println!(
            "  ✓ [{}] bank #{} ↔ internal #{} (score {:.3})",
            pair.match_type,
            pair.bank.index,
            pair.internal.index,
            pair.score
        );
    }

    println!("\n🏦 Bank-only records:");
    for record in &result.bank_only {
        println!(
            "  - #{} {} {}",
            record.index,
            record.date.map(|d| d.to_string()).unwrap_or_default(),
            record.description.as_deref().unwrap_or("(blank)")
        );
    }

    println!("\n📒 Internal-only records:");
    for record in &result.internal_only {
        println!(
            "  - #{} {} {}",
            record.index,
            record.date.map(|d| d.to_string()).unwrap_or_default(),
            record.description.as_deref().unwrap_or("(blank)")
        );
    }

    println!("\n📊 Summary:");
    println!("  Bank records:     {}", result.summary.total_bank);
    println!("  Internal records: {}", result.summary.total_internal);
    println!("  Matched pairs:    {}", result.summary.matched_count);
    println!("  Match rate:       {:.1}%", result.summary.match_rate * 100.0);

    // 4. The result serializes directly into the response payload
    println!("\n📦 JSON payload:\n{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
