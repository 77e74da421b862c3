// mod.rs - Output writers module

pub mod annotate;
pub mod ledger;
pub mod summary;

use std::fs::create_dir_all;
use std::path::Path;

pub use annotate::{annotate_file, result_header, RESULT_COLUMNS};
pub use ledger::{append_row, read_ledger, LedgerRow, LEDGER_HEADER};
pub use summary::{
    summarize_cleaned_file, summarize_result_file, summarize_results_dir, CleanedSummary,
    ResultSummary,
};

/// Ensure parent directory exists before creating file
pub fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}
