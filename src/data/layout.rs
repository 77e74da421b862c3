// layout.rs - Directory layout shared by all pipeline stages

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

pub const SEQUENCES_DIR: &str = "Sequences_db";
pub const CLEANED_DIR: &str = "Cleaned_sequences_db";
pub const INDEX_DIR: &str = "DMND_files_db";
pub const RESULTS_DIR: &str = "Comparison_results";
pub const FUNCTIONS_DIR: &str = "Functions";
pub const LEDGER_NAME: &str = "Cleaned_stats.tsv";

/// Extension of sanitizer output files
pub const CLEANED_EXTENSION: &str = "fasta";
/// Extension of DIAMOND index artifacts
pub const INDEX_EXTENSION: &str = "dmnd";
/// Extension of comparison result files
pub const RESULT_EXTENSION: &str = "tsv";

/// Resolved paths of every stage directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub root: PathBuf,
    pub sequences: PathBuf,
    pub cleaned: PathBuf,
    pub indices: PathBuf,
    pub results: PathBuf,
    pub functions: PathBuf,
    pub ledger_name: String,
}

impl WorkspaceLayout {
    /// Standard layout below `root`
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            sequences: root.join(SEQUENCES_DIR),
            cleaned: root.join(CLEANED_DIR),
            indices: root.join(INDEX_DIR),
            results: root.join(RESULTS_DIR),
            functions: root.join(FUNCTIONS_DIR),
            ledger_name: LEDGER_NAME.to_string(),
            root,
        }
    }

    /// Default root: `~/Desktop/Databases_analysis_diamond`
    pub fn default_root() -> PathBuf {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join("Desktop").join("Databases_analysis_diamond")
    }

    /// Persistent yield ledger, kept next to the cleaned files
    pub fn ledger_path(&self) -> PathBuf {
        self.cleaned.join(&self.ledger_name)
    }

    /// `<cleaned>/<raw file name>.fasta`
    pub fn cleaned_path(&self, raw_name: &str) -> PathBuf {
        self.cleaned
            .join(format!("{}.{}", raw_name, CLEANED_EXTENSION))
    }

    pub fn query_path(&self, query_name: &str) -> PathBuf {
        self.cleaned_path(query_name)
    }

    pub fn index_path(&self, name: &str) -> PathBuf {
        self.indices.join(format!("{}.{}", name, INDEX_EXTENSION))
    }

    /// `<results>/<reference>`
    pub fn reference_dir(&self, reference: &str) -> PathBuf {
        self.results.join(reference)
    }

    /// `<results>/<reference>/<reference>_<query>_diamond.tsv`
    pub fn result_path(&self, reference: &str, query: &str) -> PathBuf {
        self.reference_dir(reference).join(format!(
            "{}_{}_diamond.{}",
            reference, query, RESULT_EXTENSION
        ))
    }

    /// Create the root and every stage directory; safe to call repeatedly
    pub fn create_all(&self) -> Result<(), String> {
        for dir in [
            &self.root,
            &self.sequences,
            &self.cleaned,
            &self.indices,
            &self.results,
            &self.functions,
        ] {
            create_dir_all(dir)
                .map_err(|e| format!("Failed to create directory '{}': {}", dir.display(), e))?;
        }
        Ok(())
    }

    /// Fail with a clear message when a required stage directory is absent
    pub fn require_dir(dir: &Path, what: &str) -> Result<(), String> {
        if dir.is_dir() {
            Ok(())
        } else {
            Err(format!("{} folder {} does not exist!", what, dir.display()))
        }
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::from_root(Self::default_root())
    }
}
