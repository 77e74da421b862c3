// mod.rs - Core logic module

pub mod pipeline;
pub mod sanitizer;
pub mod scheduler;

// Re-export main types for convenience
pub use pipeline::{
    build_indices, clean_databases, compare_databases, visualize_results, CleanReport, IndexReport,
};
pub use sanitizer::{sanitize, sanitize_file, ParserState, SanitizeStats};
pub use scheduler::{
    plan_jobs, run_job, run_jobs, ComparisonJob, JobOutcome, ReferenceSelector, ScheduleReport,
    ALL_REFERENCES,
};
