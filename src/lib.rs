// lib.rs - dbcompare library root

//! # dbcompare - protein database cleaning and pairwise DIAMOND comparison
//!
//! This library prepares protein FASTA databases for similarity searching and
//! drives DIAMOND across every pair of databases.
//!
//! ## Stages
//!
//! - **Clean**: strip invalid residues, unwrap sequences, drop empty records and
//!   log the per-database yield to an append-only ledger
//! - **Makedb**: build one DMND index per cleaned file (external tool)
//! - **Compare**: run `diamond blastp` for each (reference, query) pair and
//!   prepend a stable 17-column header to every result table
//! - **Visualize**: hand the annotated tables to an external plotting script
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use dbcompare::prelude::*;
//!
//! let layout = WorkspaceLayout::from_root("/data/Databases_analysis_diamond");
//! let filter = DatabaseFilter::default();
//!
//! let cleaned = clean_databases(&layout, &filter)?;
//! println!("{} databases cleaned", cleaned.rows.len());
//!
//! let diamond = Diamond::new("diamond").with_threads(6);
//! build_indices(&layout, &filter, &diamond)?;
//!
//! let report = compare_databases(&layout, &ReferenceSelector::All, &filter, &diamond)?;
//! println!("{} jobs failed", report.failed());
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;
pub mod tools;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{build_indices, clean_databases, compare_databases, visualize_results};
    pub use crate::core::{plan_jobs, run_jobs, ComparisonJob, ReferenceSelector, ScheduleReport};
    pub use crate::core::{sanitize, sanitize_file, ParserState, SanitizeStats};
    pub use crate::data::{list_available, DatabaseFilter, Record, WorkspaceLayout};
    pub use crate::output::{annotate_file, append_row, result_header, LedgerRow};
    pub use crate::tools::{Aligner, AxisLimit, Diamond, IndexBuilder, ScriptRunner, Sensitivity};
}

// Re-export main types at the root level for convenience
pub use crate::core::{ReferenceSelector, SanitizeStats};
pub use crate::data::{Record, WorkspaceLayout};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "dbcompare v{} - protein database cleaning and DIAMOND comparison",
        VERSION
    )
}
