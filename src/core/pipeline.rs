// pipeline.rs - Stage drivers: clean, makedb, compare, visualize

use crate::core::sanitizer::sanitize_file;
use crate::core::scheduler::{plan_jobs, run_jobs, ReferenceSelector, ScheduleReport};
use crate::data::catalog::{list_available_filtered, list_files, DatabaseFilter};
use crate::data::layout::{WorkspaceLayout, CLEANED_EXTENSION, INDEX_EXTENSION};
use crate::output::ledger::{append_row, LedgerRow};
use crate::tools::script::{AxisLimit, ScriptRunner};
use crate::tools::traits::{Aligner, IndexBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::create_dir_all;
use std::path::PathBuf;

/// Per-file results of the cleaning stage
#[derive(Debug, Default)]
pub struct CleanReport {
    pub rows: Vec<LedgerRow>,
    pub failures: Vec<(PathBuf, String)>,
}

/// Per-database results of the index stage
#[derive(Debug, Default)]
pub struct IndexReport {
    pub built: Vec<String>,
    pub failures: Vec<(String, String)>,
}

fn file_progress(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let template = format!(
        "[{{elapsed_precise}}] [{{wide_bar:.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
        unit
    );
    pb.set_style(
        ProgressStyle::with_template(&template).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn create_dir(dir: &std::path::Path) -> Result<(), String> {
    create_dir_all(dir)
        .map_err(|e| format!("Failed to create directory '{}': {}", dir.display(), e))
}

/// Sanitize every raw database file and record its yield in the ledger.
///
/// A file that cannot be read or written is reported and skipped; its ledger row is not written.
pub fn clean_databases(
    layout: &WorkspaceLayout,
    filter: &DatabaseFilter,
) -> Result<CleanReport, String> {
    WorkspaceLayout::require_dir(&layout.sequences, "Sequences")?;
    create_dir(&layout.cleaned)?;

    let files: Vec<PathBuf> = list_files(&layout.sequences)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| !n.starts_with('.') && filter.accepts(n))
                .unwrap_or(false)
        })
        .collect();

    println!("🧬 Cleaning {} FASTA files from {}", files.len(), layout.sequences.display());
    let ledger = layout.ledger_path();
    let pb = file_progress(files.len(), "files");
    let mut report = CleanReport::default();

    for input in files {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name.clone());
        let output = layout.cleaned_path(&name);

        let result = sanitize_file(&input, &output).and_then(|stats| {
            let row = LedgerRow::new(name.as_str(), stats);
            append_row(&ledger, &row).map_err(|e| {
                // unrecorded output must not reach the index stage
                let _ = std::fs::remove_file(&output);
                e
            })?;
            Ok(row)
        });

        match result {
            Ok(row) => {
                pb.println(format!(
                    "  📄 {}: {}/{} sequences kept ({:.1}%)",
                    row.database,
                    row.cleaned,
                    row.total,
                    row.stats().yield_percent()
                ));
                report.rows.push(row);
            }
            Err(e) => {
                pb.println(format!("  ❌ {}: {}", name, e));
                report.failures.push((input, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(report)
}

/// Build one index per cleaned file
pub fn build_indices(
    layout: &WorkspaceLayout,
    filter: &DatabaseFilter,
    builder: &dyn IndexBuilder,
) -> Result<IndexReport, String> {
    WorkspaceLayout::require_dir(&layout.cleaned, "Cleaned FASTA")?;
    create_dir(&layout.indices)?;

    let names = list_available_filtered(&layout.cleaned, CLEANED_EXTENSION, filter)?;
    println!("🔨 Building {} DMND databases in {}", names.len(), layout.indices.display());

    let pb = file_progress(names.len(), "databases");
    let mut report = IndexReport::default();
    for name in names {
        pb.set_message(name.clone());
        match builder.build_index(&layout.cleaned_path(&name), &layout.index_path(&name)) {
            Ok(()) => {
                pb.println(format!("  ✅ DMND database created for {}", name));
                report.built.push(name);
            }
            Err(e) => {
                pb.println(format!("  ❌ Error creating DMND database for {}: {}", name, e));
                report.failures.push((name, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(report)
}

/// Discover indices and queries, plan the jobs for `selector`, and run them.
///
/// Missing folders or an unknown named reference abort before the aligner is invoked.
pub fn compare_databases(
    layout: &WorkspaceLayout,
    selector: &ReferenceSelector,
    filter: &DatabaseFilter,
    aligner: &dyn Aligner,
) -> Result<ScheduleReport, String> {
    WorkspaceLayout::require_dir(&layout.indices, "Database")?;
    WorkspaceLayout::require_dir(&layout.cleaned, "FASTA")?;

    let indices = list_available_filtered(&layout.indices, INDEX_EXTENSION, filter)?;
    let queries = list_available_filtered(&layout.cleaned, CLEANED_EXTENSION, filter)?;
    let jobs = plan_jobs(selector, &indices, &queries, layout)?;

    println!(
        "🚀 Starting {} comparison: {} jobs ({} references × {} queries)",
        selector,
        jobs.len(),
        match selector {
            ReferenceSelector::All => indices.len(),
            ReferenceSelector::Named(_) => 1,
        },
        queries.len()
    );
    create_dir(&layout.results)?;

    Ok(run_jobs(&jobs, aligner))
}

/// Hand the annotated results to the plotting script; returns its stdout
pub fn visualize_results(
    layout: &WorkspaceLayout,
    target: &ReferenceSelector,
    axis: AxisLimit,
    runner: &ScriptRunner,
) -> Result<String, String> {
    WorkspaceLayout::require_dir(&layout.results, "Comparison results")?;
    if let ReferenceSelector::Named(name) = target {
        WorkspaceLayout::require_dir(&layout.reference_dir(name), "Reference results")?;
    }

    println!(
        "📈 Visualising {} results (axis limit: {}) with {}",
        target,
        axis,
        runner.script.display()
    );
    runner.run(&[target.to_string(), axis.to_string()], &layout.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[derive(Debug)]
    struct CopyIndexBuilder;

    impl IndexBuilder for CopyIndexBuilder {
        fn build_index(&self, fasta: &Path, index: &Path) -> Result<(), String> {
            if fasta.to_string_lossy().contains("broken") {
                return Err("makedb failed".to_string());
            }
            fs::copy(fasta, index).map(|_| ()).map_err(|e| e.to_string())
        }
    }

    #[test]
    fn test_clean_databases_writes_files_and_ledger() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::from_root(tmp.path());
        layout.create_all().unwrap();
        fs::write(layout.sequences.join("APD"), ">h1\nAC D*E\n>h2\n").unwrap();
        fs::write(layout.sequences.join("CAMP.fa"), ">c\nMK\nLV\n").unwrap();
        fs::write(layout.sequences.join(".hidden"), ">x\nMK\n").unwrap();

        let report = clean_databases(&layout, &DatabaseFilter::default()).unwrap();
        assert!(report.failures.is_empty());
        assert_eq!(report.rows.len(), 2);

        assert_eq!(fs::read_to_string(layout.cleaned.join("APD.fasta")).unwrap(), ">h1\nACDE\n");
        assert_eq!(fs::read_to_string(layout.cleaned.join("CAMP.fa.fasta")).unwrap(), ">c\nMKLV\n");
        let ledger = fs::read_to_string(layout.ledger_path()).unwrap();
        assert_eq!(
            ledger,
            "Database\tTheoretical Sequences\tObtained Sequences\nAPD\t2\t1\nCAMP.fa\t1\t1\n"
        );
    }

    #[test]
    fn test_unrecordable_name_leaves_no_output() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::from_root(tmp.path());
        layout.create_all().unwrap();
        fs::write(layout.sequences.join("bad\tname"), ">a\nMK\n").unwrap();
        fs::write(layout.sequences.join("good"), ">a\nMK\n").unwrap();

        let report = clean_databases(&layout, &DatabaseFilter::default()).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(!layout.cleaned_path("bad\tname").exists());
        assert!(layout.cleaned_path("good").is_file());
    }

    #[test]
    fn test_clean_requires_sequences_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::from_root(tmp.path());
        assert!(clean_databases(&layout, &DatabaseFilter::default()).is_err());
    }

    #[test]
    fn test_build_indices_isolates_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::from_root(tmp.path());
        layout.create_all().unwrap();
        fs::write(layout.cleaned_path("good"), ">a\nMK\n").unwrap();
        fs::write(layout.cleaned_path("broken"), ">a\nMK\n").unwrap();
        fs::write(layout.ledger_path(), "ledger").unwrap();

        let report = build_indices(&layout, &DatabaseFilter::default(), &CopyIndexBuilder).unwrap();
        assert_eq!(report.built, vec!["good".to_string()]);
        assert_eq!(report.failures.len(), 1);
        assert!(layout.index_path("good").is_file());
        assert!(!layout.index_path("broken").exists());
    }

    #[test]
    fn test_visualize_checks_target_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::from_root(tmp.path());
        layout.create_all().unwrap();
        let runner = ScriptRunner::for_script(
            &layout.functions.join("visualize_rstudio.R"),
            Path::new("Rscript"),
            Path::new("python3"),
        )
        .unwrap();

        let err = visualize_results(&layout, &"APD".parse().unwrap(), AxisLimit::Auto, &runner)
            .unwrap_err();
        assert!(err.contains("does not exist"));
    }
}
