// pipeline.rs - End-to-end runs of the clean, makedb and compare stages against fake tools

use dbcompare::prelude::*;
use dbcompare::data::is_valid_residue;
use dbcompare::output::{read_ledger, summarize_results_dir};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
struct CopyIndexBuilder;

impl IndexBuilder for CopyIndexBuilder {
    fn build_index(&self, fasta: &Path, index: &Path) -> Result<(), String> {
        fs::copy(fasta, index).map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Emits one hit row per query record and remembers every invocation
#[derive(Debug, Default)]
struct RecordingAligner {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl Aligner for RecordingAligner {
    fn name(&self) -> &str {
        "recording"
    }

    fn align(&self, index: &Path, query: &Path, output: &Path) -> Result<(), String> {
        self.calls
            .lock()
            .unwrap()
            .push((index.to_path_buf(), query.to_path_buf()));
        let fasta = fs::read_to_string(query).map_err(|e| e.to_string())?;
        let rows: String = fasta
            .lines()
            .filter_map(|l| l.strip_prefix('>'))
            .map(|id| format!("{}\t{}\t100.0\n", id, id))
            .collect();
        fs::write(output, rows).map_err(|e| e.to_string())
    }
}

fn workspace(files: &[(&str, &str)]) -> (tempfile::TempDir, WorkspaceLayout) {
    let tmp = tempfile::tempdir().unwrap();
    let layout = WorkspaceLayout::from_root(tmp.path());
    layout.create_all().unwrap();
    for (name, content) in files {
        fs::write(layout.sequences.join(name), content).unwrap();
    }
    (tmp, layout)
}

#[test]
fn test_cleaning_scenario_and_ledger() {
    let (_tmp, layout) = workspace(&[("db1", ">h1\nAC D*E\n>h2\n\n")]);

    let report = clean_databases(&layout, &DatabaseFilter::default()).unwrap();
    assert_eq!(report.rows, vec![LedgerRow::new("db1", SanitizeStats { total: 2, cleaned: 1 })]);
    assert_eq!(fs::read_to_string(layout.cleaned_path("db1")).unwrap(), ">h1\nACDE\n");
}

#[test]
fn test_repeated_cleaning_appends_rows_under_one_header() {
    let (_tmp, layout) = workspace(&[("db1", ">a\nMKV\n>b\n123\n")]);

    for _ in 0..3 {
        clean_databases(&layout, &DatabaseFilter::default()).unwrap();
    }

    let content = fs::read_to_string(layout.ledger_path()).unwrap();
    assert_eq!(content.matches("Database\tTheoretical Sequences").count(), 1);
    let rows = read_ledger(&layout.ledger_path()).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.total == 2 && r.cleaned == 1));
}

#[test]
fn test_cleaned_output_is_unwrapped_and_in_alphabet() {
    let raw = ">p1 first\nMKT AYI\nakrq\nQRSX#\n>p2\nBJOUZ\n>p3\n  W Y  \nVV\n";
    let (_tmp, layout) = workspace(&[("mixed", raw)]);

    let report = clean_databases(&layout, &DatabaseFilter::default()).unwrap();
    let row = &report.rows[0];
    assert_eq!(row.total, raw.lines().filter(|l| l.starts_with('>')).count());
    assert!(row.cleaned <= row.total);

    let cleaned = fs::read_to_string(layout.cleaned_path("mixed")).unwrap();
    let lines: Vec<&str> = cleaned.lines().collect();
    assert_eq!(lines, vec![">p1 first", "MKTAYIQRS", ">p3", "WYVV"]);
    for residues in lines.iter().filter(|l| !l.starts_with('>')) {
        assert!(residues.chars().all(is_valid_residue));
    }
}

#[test]
fn test_all_pairs_comparison_annotates_every_result() {
    let (_tmp, layout) = workspace(&[("X", ">x1\nMKV\n"), ("Y", ">y1\nLLA\n>y2\nGG\n")]);
    let filter = DatabaseFilter::default();

    clean_databases(&layout, &filter).unwrap();
    let built = build_indices(&layout, &filter, &CopyIndexBuilder).unwrap();
    assert_eq!(built.built, vec!["X".to_string(), "Y".to_string()]);

    let aligner = RecordingAligner::default();
    let report = compare_databases(&layout, &ReferenceSelector::All, &filter, &aligner).unwrap();
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 0);
    assert_eq!(aligner.calls.lock().unwrap().len(), 4);

    let header = result_header();
    for reference in ["X", "Y"] {
        for query in ["X", "Y"] {
            let path = layout.result_path(reference, query);
            let content = fs::read_to_string(&path).unwrap();
            assert_eq!(content.lines().next(), Some(header.as_str()));
        }
    }

    let summaries = summarize_results_dir(&layout.results, None).unwrap();
    assert_eq!(summaries.len(), 4);
    let x_vs_y = summaries
        .iter()
        .find(|s| s.reference == "X" && s.query == "Y")
        .unwrap();
    assert_eq!(x_vs_y.hits, 2);
}

#[test]
fn test_single_reference_comparison() {
    let (_tmp, layout) = workspace(&[("X", ">x1\nMKV\n"), ("Y", ">y1\nLLA\n")]);
    let filter = DatabaseFilter::default();
    clean_databases(&layout, &filter).unwrap();
    build_indices(&layout, &filter, &CopyIndexBuilder).unwrap();

    let aligner = RecordingAligner::default();
    let report = compare_databases(&layout, &"Y".parse().unwrap(), &filter, &aligner).unwrap();
    assert_eq!(report.succeeded(), 2);
    assert!(layout.result_path("Y", "X").is_file());
    assert!(!layout.reference_dir("X").exists());
}

#[test]
fn test_unknown_reference_aborts_before_aligning() {
    let (_tmp, layout) = workspace(&[("X", ">x1\nMKV\n")]);
    let filter = DatabaseFilter::default();
    clean_databases(&layout, &filter).unwrap();
    build_indices(&layout, &filter, &CopyIndexBuilder).unwrap();

    let aligner = RecordingAligner::default();
    let err =
        compare_databases(&layout, &"Missing".parse().unwrap(), &filter, &aligner).unwrap_err();
    assert!(err.contains("not found"));
    assert!(aligner.calls.lock().unwrap().is_empty());
    assert!(!layout.reference_dir("Missing").exists());
}

#[test]
fn test_comparison_requires_index_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = WorkspaceLayout::from_root(tmp.path());
    let aligner = RecordingAligner::default();

    let filter = DatabaseFilter::default();
    let err = compare_databases(&layout, &ReferenceSelector::All, &filter, &aligner).unwrap_err();
    assert!(err.contains("does not exist"));
    assert!(aligner.calls.lock().unwrap().is_empty());
}

#[test]
fn test_filter_limits_discovered_databases() {
    let (_tmp, layout) = workspace(&[("keep_a", ">a\nMK\n"), ("tmp_b", ">b\nMK\n")]);
    let filter = DatabaseFilter::new(None, Some(regex::Regex::new("^tmp").unwrap()));

    let report = clean_databases(&layout, &filter).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert!(layout.cleaned_path("keep_a").is_file());
    assert!(!layout.cleaned_path("tmp_b").exists());
}
