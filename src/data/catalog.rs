// catalog.rs - Discovery of the databases available on disk

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name-based include/exclude filter applied at discovery time
#[derive(Debug, Clone, Default)]
pub struct DatabaseFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl DatabaseFilter {
    pub fn new(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }

    pub fn accepts(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                return false;
            }
        }
        true
    }
}

/// Regular files directly inside `folder`, sorted by name
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(folder)
        .map_err(|e| format!("Failed to read directory '{}': {}", folder.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Names (file name minus `.extension`) of the files in `folder` carrying that extension
pub fn list_available(folder: &Path, extension: &str) -> Result<BTreeSet<String>, String> {
    let suffix = format!(".{}", extension);
    let names = list_files(folder)?
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?.to_string();
            file_name
                .strip_suffix(&suffix)
                .filter(|stem| !stem.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(names)
}

/// `list_available` restricted by a name filter
pub fn list_available_filtered(
    folder: &Path,
    extension: &str,
    filter: &DatabaseFilter,
) -> Result<BTreeSet<String>, String> {
    Ok(list_available(folder, extension)?
        .into_iter()
        .filter(|name| filter.accepts(name))
        .collect())
}
