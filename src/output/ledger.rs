// ledger.rs - Append-only sanitizer yield ledger (tab-separated)

use crate::core::sanitizer::SanitizeStats;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

pub const LEDGER_HEADER: [&str; 3] = ["Database", "Theoretical Sequences", "Obtained Sequences"];

/// One ledger row: a processed input file and its yield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Database")]
    pub database: String,
    #[serde(rename = "Theoretical Sequences")]
    pub total: usize,
    #[serde(rename = "Obtained Sequences")]
    pub cleaned: usize,
}

impl LedgerRow {
    pub fn new(database: impl Into<String>, stats: SanitizeStats) -> Self {
        Self {
            database: database.into(),
            total: stats.total,
            cleaned: stats.cleaned,
        }
    }

    pub fn stats(&self) -> SanitizeStats {
        SanitizeStats {
            total: self.total,
            cleaned: self.cleaned,
        }
    }
}

/// Append one row, writing the header first when the ledger does not exist yet.
/// Existing content is never truncated or deduplicated.
pub fn append_row(ledger_path: &Path, row: &LedgerRow) -> Result<(), String> {
    // names are written raw, so a field separator inside one would shift the columns
    if row.database.contains(&['\t', '\n', '\r'][..]) {
        return Err(format!(
            "Database name {:?} contains a tab or line break and cannot be recorded in the ledger",
            row.database
        ));
    }

    let file_exists = ledger_path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ledger_path)
        .map_err(|e| format!("Failed to open ledger '{}': {}", ledger_path.display(), e))?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(file);

    if !file_exists {
        writer
            .write_record(LEDGER_HEADER)
            .map_err(|e| format!("Write error: {}", e))?;
    }
    writer
        .serialize(row)
        .map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    Ok(())
}

/// Read every row of an existing ledger, in file order
pub fn read_ledger(ledger_path: &Path) -> Result<Vec<LedgerRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .from_path(ledger_path)
        .map_err(|e| format!("Failed to open ledger '{}': {}", ledger_path.display(), e))?;

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize().enumerate() {
        let row: LedgerRow = result.map_err(|e| {
            format!(
                "Invalid ledger row {} in '{}': {}",
                line_num + 2,
                ledger_path.display(),
                e
            )
        })?;
        rows.push(row);
    }
    Ok(rows)
}
