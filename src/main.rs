use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use statement_mapping::{
    Classifier, ConfidenceScorer, MappingSet, StatementBuilder, TrialBalanceValidator,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statement_mapping=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: statement-mapping <trial_balance.csv> [--json]");
    }
    let as_json = args.iter().any(|a| a == "--json");

    run(Path::new(&args[1]), as_json)
}

fn run(csv_path: &Path, as_json: bool) -> Result<()> {
    // 1. Load trial balance
    let records = statement_mapping::load_csv(csv_path)?;
    println!("📂 Loaded {} ledger records from {:?}", records.len(), csv_path);

    // 2. Validate double-entry integrity
    let validator = TrialBalanceValidator::new();
    let report = validator.validate(&records);
    println!("⚖️  {}", report.summary_line());
    for error in &report.errors {
        println!("   ✗ {}", error);
    }
    for warning in &report.warnings {
        println!("   ⚠ {}", warning);
    }

    // 3. Derive mappings and auto-classify
    let classifier = Classifier::with_defaults();
    let scorer = ConfidenceScorer::new();
    let mappings = MappingSet::from_records(&records).bulk_auto_map(&classifier);

    let stats = mappings.stats(&scorer);
    println!(
        "🗺️  Mapped {}/{} accounts ({:.0}%), {} high confidence, {} need review",
        stats.mapped,
        stats.total,
        stats.percent_mapped(),
        stats.high_confidence,
        stats.need_review
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    // 4. Per-account summary, worst confidence first
    let mut rows: Vec<_> = mappings.iter().collect();
    rows.sort_by_key(|m| match scorer.score(m) {
        statement_mapping::Confidence::Low => 0,
        statement_mapping::Confidence::Medium => 1,
        statement_mapping::Confidence::High => 2,
    });
    for mapping in rows {
        let category = mapping
            .detailed_category
            .map(|c| c.name())
            .unwrap_or("(unmapped)");
        println!(
            "   [{:>6}] {:<40} → {:<45} {}",
            scorer.score(mapping).as_str(),
            mapping.account_description,
            category,
            mapping
                .high_level_category
                .map(|h| h.as_str())
                .unwrap_or(""),
        );
    }

    // 5. Headline metrics from the mapped snapshot
    let builder = StatementBuilder::new();
    let metrics = builder.dashboard_metrics(&records, &mappings);
    println!(
        "📊 Assets {:.2} | Liabilities {:.2} | Equity {:.2} | Net income {:.2}",
        metrics.total_assets, metrics.total_liabilities, metrics.total_equity, metrics.net_income
    );

    Ok(())
}
