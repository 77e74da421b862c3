// results_summary.rs - Summary of the cleaning ledger and annotated comparison results

use clap::{Arg, ArgAction, Command};
use dbcompare::data::layout::CLEANED_EXTENSION;
use dbcompare::data::{list_available, WorkspaceLayout};
use dbcompare::output::{
    read_ledger, summarize_cleaned_file, summarize_results_dir, CleanedSummary, LedgerRow,
    ResultSummary,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct Report {
    ledger: Vec<LedgerRow>,
    cleaned: Vec<CleanedSummary>,
    results: Vec<ResultSummary>,
}

fn collect_cleaned(layout: &WorkspaceLayout) -> Result<Vec<CleanedSummary>, String> {
    if !layout.cleaned.is_dir() {
        return Ok(Vec::new());
    }
    list_available(&layout.cleaned, CLEANED_EXTENSION)?
        .iter()
        .map(|name| summarize_cleaned_file(name, &layout.cleaned_path(name)))
        .collect()
}

fn print_report(report: &Report) {
    println!("\n🧹 === CLEANING YIELD ===");
    if report.ledger.is_empty() {
        println!("  (no ledger rows)");
    }
    for row in &report.ledger {
        println!(
            "  {:<30} {:>8} / {:<8} {:>6.1}%",
            row.database,
            row.cleaned,
            row.total,
            row.stats().yield_percent()
        );
    }

    println!("\n🧬 === CLEANED DATABASES ===");
    for db in &report.cleaned {
        println!(
            "  {:<30} {:>8} records, mean length {:.1} aa",
            db.database, db.records, db.mean_length
        );
    }

    println!("\n🔍 === COMPARISON RESULTS ===");
    if report.results.is_empty() {
        println!("  (no result files)");
    }
    for r in &report.results {
        let pident = r
            .mean_pident
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "NA".to_string());
        println!(
            "  {:<20} vs {:<20} {:>8} hits, {:>6} queries, mean identity {}",
            r.reference, r.query, r.hits, r.distinct_queries, pident
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("Results Summary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarises the cleaning ledger and annotated DIAMOND comparison results")
        .arg(Arg::new("root")
            .long("root")
            .value_name("DIR")
            .help("Working directory holding the stage folders")
            .required(true))
        .arg(Arg::new("reference")
            .long("reference")
            .value_name("NAME")
            .help("Only summarise results of this reference database"))
        .arg(Arg::new("json")
            .long("json")
            .help("Print the summary as JSON")
            .action(ArgAction::SetTrue))
        .get_matches();

    let root = matches.get_one::<String>("root").map(PathBuf::from).ok_or("--root is required")?;
    let reference = matches.get_one::<String>("reference").map(String::as_str);
    let as_json = matches.get_flag("json");

    let layout = WorkspaceLayout::from_root(&root);

    let ledger_path = layout.ledger_path();
    let ledger = if ledger_path.is_file() {
        read_ledger(&ledger_path)?
    } else {
        Vec::new()
    };
    let cleaned = collect_cleaned(&layout)?;
    let results = if layout.results.is_dir() {
        summarize_results_dir(&layout.results, reference)?
    } else {
        Vec::new()
    };

    let report = Report { ledger, cleaned, results };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("📊 dbcompare results summary");
        println!("============================");
        println!("📁 Root: {}", root.display());
        print_report(&report);
    }

    Ok(())
}
