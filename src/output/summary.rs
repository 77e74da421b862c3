// summary.rs - Summaries of cleaned databases and annotated comparison results

use crate::data::catalog::list_files;
use crate::data::layout::RESULT_EXTENSION;
use bio::io::fasta;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Hit statistics of one annotated comparison file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub reference: String,
    pub query: String,
    pub path: PathBuf,
    pub hits: usize,
    pub distinct_queries: usize,
    pub mean_pident: Option<f64>,
}

/// Record statistics of one cleaned FASTA file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedSummary {
    pub database: String,
    pub records: usize,
    pub residues: usize,
    pub mean_length: f64,
}

/// Split `<reference>_<query>_diamond.tsv` given the known reference name
pub fn query_from_file_name(reference: &str, file_name: &str) -> Option<String> {
    file_name
        .strip_prefix(reference)?
        .strip_prefix('_')?
        .strip_suffix(&format!("_diamond.{}", RESULT_EXTENSION))
        .map(str::to_string)
}

/// Read an annotated result file and count its hits
pub fn summarize_result_file(reference: &str, path: &Path) -> Result<ResultSummary, String> {
    // stitle is free text, so quotes carry no meaning here
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Failed to open result file '{}': {}", path.display(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read header of '{}': {}", path.display(), e))?
        .clone();
    let qseqid_idx = headers
        .iter()
        .position(|h| h == "qseqid")
        .ok_or_else(|| format!("'{}' has no qseqid column (not annotated?)", path.display()))?;
    let pident_idx = headers
        .iter()
        .position(|h| h == "pident")
        .ok_or_else(|| format!("'{}' has no pident column (not annotated?)", path.display()))?;

    let mut hits = 0;
    let mut queries = HashSet::new();
    let mut pident_sum = 0.0;

    for (line_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            format!("Failed to read line {} of '{}': {}", line_num + 2, path.display(), e)
        })?;
        let pident: f64 = record
            .get(pident_idx)
            .unwrap_or("")
            .parse()
            .map_err(|_| {
                format!("Invalid pident at line {} of '{}'", line_num + 2, path.display())
            })?;
        if let Some(q) = record.get(qseqid_idx) {
            queries.insert(q.to_string());
        }
        pident_sum += pident;
        hits += 1;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let query = query_from_file_name(reference, &file_name).unwrap_or(file_name);

    Ok(ResultSummary {
        reference: reference.to_string(),
        query,
        path: path.to_path_buf(),
        hits,
        distinct_queries: queries.len(),
        mean_pident: (hits > 0).then(|| pident_sum / hits as f64),
    })
}

/// Summaries for every result file below `results_root`, optionally restricted
/// to one reference directory. Files are read in parallel.
pub fn summarize_results_dir(
    results_root: &Path,
    reference: Option<&str>,
) -> Result<Vec<ResultSummary>, String> {
    let references: Vec<String> = match reference {
        Some(name) => {
            let dir = results_root.join(name);
            if !dir.is_dir() {
                return Err(format!(
                    "No results for reference '{}' in {}",
                    name,
                    results_root.display()
                ));
            }
            vec![name.to_string()]
        }
        None => {
            let mut names: Vec<String> = std::fs::read_dir(results_root)
                .map_err(|e| {
                    format!("Failed to read directory '{}': {}", results_root.display(), e)
                })?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_dir())
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            names
        }
    };

    let mut files = Vec::new();
    for name in &references {
        for path in list_files(&results_root.join(name))? {
            if path.extension().and_then(|e| e.to_str()) == Some(RESULT_EXTENSION) {
                files.push((name.clone(), path));
            }
        }
    }

    files
        .par_iter()
        .map(|(name, path)| summarize_result_file(name, path))
        .collect()
}

/// Count records and residues of a cleaned FASTA file
pub fn summarize_cleaned_file(database: &str, path: &Path) -> Result<CleanedSummary, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file {}: {}", path.display(), e))?;
    let reader = fasta::Reader::new(BufReader::new(file));

    let mut records = 0;
    let mut residues = 0;
    for record_result in reader.records() {
        let record = record_result
            .map_err(|e| format!("Invalid FASTA record in {}: {}", path.display(), e))?;
        records += 1;
        residues += record.seq().len();
    }

    Ok(CleanedSummary {
        database: database.to_string(),
        records,
        residues,
        mean_length: if records == 0 {
            0.0
        } else {
            residues as f64 / records as f64
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::annotate::result_header;
    use std::fs;

    fn write_result(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        let mut content = format!("{}\n", result_header());
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(&path, content).unwrap();
        path
    }

    const ROW_A: &str = "q1\ts1\t100.0\t5\t0\t0\t1\t5\t1\t5\t1e-3\t12.3\t5\tMKLVA\t\"quoted\" title\t5\tMKLVA";
    const ROW_B: &str = "q1\ts2\t80.0\t5\t1\t0\t1\t5\t2\t6\t0.01\t9.8\t5\tMKLVA\tother\t7\tMKIVA";
    const ROW_C: &str = "q2\ts2\t60.0\t5\t2\t0\t1\t5\t2\t6\t0.02\t8.1\t5\tMKLVA\tother\t7\tMKIVA";

    #[test]
    fn test_query_from_file_name() {
        assert_eq!(query_from_file_name("APD", "APD_CAMP_diamond.tsv").as_deref(), Some("CAMP"));
        assert_eq!(query_from_file_name("A_B", "A_B_C_D_diamond.tsv").as_deref(), Some("C_D"));
        assert_eq!(query_from_file_name("X", "Y_p_diamond.tsv"), None);
    }

    #[test]
    fn test_summarize_result_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_result(tmp.path(), "X_p_diamond.tsv", &[ROW_A, ROW_B, ROW_C]);
        let summary = summarize_result_file("X", &path).unwrap();
        assert_eq!(summary.query, "p");
        assert_eq!(summary.hits, 3);
        assert_eq!(summary.distinct_queries, 2);
        assert!((summary.mean_pident.unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_unannotated_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("raw.tsv");
        fs::write(&path, format!("{}\n", ROW_A)).unwrap();
        assert!(summarize_result_file("X", &path).is_err());
    }

    #[test]
    fn test_summarize_results_dir() {
        let tmp = tempfile::tempdir().unwrap();
        write_result(&tmp.path().join("X"), "X_p_diamond.tsv", &[ROW_A]);
        write_result(&tmp.path().join("X"), "X_q_diamond.tsv", &[]);
        write_result(&tmp.path().join("Y"), "Y_p_diamond.tsv", &[ROW_B, ROW_C]);

        let all = summarize_results_dir(tmp.path(), None).unwrap();
        assert_eq!(all.len(), 3);
        let empty = all.iter().find(|s| s.query == "q").unwrap();
        assert_eq!(empty.hits, 0);
        assert_eq!(empty.mean_pident, None);

        let only_y = summarize_results_dir(tmp.path(), Some("Y")).unwrap();
        assert_eq!(only_y.len(), 1);
        assert_eq!(only_y[0].hits, 2);

        assert!(summarize_results_dir(tmp.path(), Some("Z")).is_err());
    }

    #[test]
    fn test_summarize_cleaned_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("APD.fasta");
        fs::write(&path, ">a\nMKLV\n>b\nGG\n").unwrap();
        let summary = summarize_cleaned_file("APD", &path).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.residues, 6);
        assert!((summary.mean_length - 3.0).abs() < 1e-9);
    }
}
