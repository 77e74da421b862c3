// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::data::{DatabaseFilter, WorkspaceLayout};
use crate::tools::{Diamond, Sensitivity};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct ValidationResult {
    pub layout: WorkspaceLayout,
    pub diamond: Diamond,
    pub filter: DatabaseFilter,
    pub rscript: PathBuf,
    pub python: PathBuf,
    pub script: PathBuf,
}

/// Resolve a folder override against the root; absolute overrides replace it
fn resolve_dir(dir: &mut PathBuf, root: &Path, value: &Option<String>) {
    if let Some(value) = value {
        *dir = root.join(value);
    }
}

fn compile_pattern(pattern: &Option<String>, what: &str) -> Result<Option<Regex>, String> {
    match pattern {
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| format!("Invalid {} regex: {}", what, e)),
        None => Ok(None),
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.threads == 0 {
        return Err("Thread count must be at least 1".to_string());
    }
    let sensitivity = Sensitivity::from_str(&args.sensitivity)?;

    if let Some(name) = &args.ledger_name {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(format!("Invalid ledger name '{}': expected a plain file name", name));
        }
    }

    let root = args
        .root
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(WorkspaceLayout::default_root);
    let mut layout = WorkspaceLayout::from_root(&root);
    resolve_dir(&mut layout.sequences, &root, &args.sequences_dir);
    resolve_dir(&mut layout.cleaned, &root, &args.cleaned_dir);
    resolve_dir(&mut layout.indices, &root, &args.index_dir);
    resolve_dir(&mut layout.results, &root, &args.results_dir);
    if let Some(name) = &args.ledger_name {
        layout.ledger_name = name.clone();
    }

    let filter = DatabaseFilter::new(
        compile_pattern(&args.include_db, "include_db")?,
        compile_pattern(&args.exclude_db, "exclude_db")?,
    );

    let diamond = Diamond::new(args.diamond.clone().unwrap_or_else(|| "diamond".to_string()))
        .with_threads(args.threads)
        .with_sensitivity(sensitivity);

    let script = args
        .script
        .as_ref()
        .map(|s| root.join(s))
        .unwrap_or_else(|| layout.functions.join("visualize_rstudio.R"));

    Ok(ValidationResult {
        diamond,
        filter,
        rscript: PathBuf::from(args.rscript.as_deref().unwrap_or("Rscript")),
        python: PathBuf::from(args.python.as_deref().unwrap_or("python3")),
        script,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(extra: &[&str]) -> Args {
        let mut all: Vec<&str> = extra.to_vec();
        all.push("clean");
        Args::from_args(&["dbcompare"], &all).unwrap()
    }

    #[test]
    fn test_defaults() {
        let result = validate_args(&parse(&["--root", "/ws"])).unwrap();
        assert_eq!(result.layout, WorkspaceLayout::from_root("/ws"));
        assert_eq!(result.diamond.threads, 6);
        assert_eq!(result.diamond.sensitivity, Sensitivity::VerySensitive);
        assert_eq!(result.script, PathBuf::from("/ws/Functions/visualize_rstudio.R"));
        assert_eq!(result.rscript, PathBuf::from("Rscript"));
    }

    #[test]
    fn test_folder_overrides() {
        let result = validate_args(&parse(&[
            "--root",
            "/ws",
            "--index-dir",
            "idx",
            "--results-dir",
            "/elsewhere/out",
            "--ledger-name",
            "yield.tsv",
        ]))
        .unwrap();
        assert_eq!(result.layout.indices, PathBuf::from("/ws/idx"));
        assert_eq!(result.layout.results, PathBuf::from("/elsewhere/out"));
        assert_eq!(
            result.layout.ledger_path(),
            PathBuf::from("/ws/Cleaned_sequences_db/yield.tsv")
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());
        assert!(validate_args(&parse(&["--sensitivity", "turbo"])).is_err());
        assert!(validate_args(&parse(&["--include-db", "("])).is_err());
        assert!(validate_args(&parse(&["--ledger-name", "a/b.tsv"])).is_err());
    }

    #[test]
    fn test_filter_is_compiled() {
        let result = validate_args(&parse(&["--root", "/ws", "--exclude-db", "^tmp"])).unwrap();
        assert!(result.filter.accepts("APD"));
        assert!(!result.filter.accepts("tmp_db"));
    }
}
