// mod.rs - Data structures module

pub mod catalog;
pub mod layout;
pub mod record;

// Re-export main types for convenience
pub use catalog::{list_available, list_available_filtered, list_files, DatabaseFilter};
pub use layout::WorkspaceLayout;
pub use record::{clean_residues, is_valid_residue, Record, VALID_RESIDUES};
