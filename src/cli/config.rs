// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Folders
    pub root: Option<String>,
    pub sequences_dir: Option<String>,
    pub cleaned_dir: Option<String>,
    pub index_dir: Option<String>,
    pub results_dir: Option<String>,
    pub ledger_name: Option<String>,

    // Diamond
    pub diamond: Option<String>,
    pub threads: Option<usize>,
    pub sensitivity: Option<String>,

    // Visualisation
    pub rscript: Option<String>,
    pub python: Option<String>,
    pub visualize_script: Option<String>,

    // Database filtering
    pub include_db: Option<String>,
    pub exclude_db: Option<String>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# dbcompare.toml - Configuration file for dbcompare
# Command line arguments will override these settings

# =============================================================================
# FOLDERS
# =============================================================================

# Working directory holding all stage folders
root = "/home/user/Desktop/Databases_analysis_diamond"

# Stage folders (relative paths are resolved against root)
# sequences_dir = "Sequences_db"
# cleaned_dir = "Cleaned_sequences_db"
# index_dir = "DMND_files_db"
# results_dir = "Comparison_results"

# Yield ledger written next to the cleaned files
ledger_name = "Cleaned_stats.tsv"

# =============================================================================
# DIAMOND
# =============================================================================

# Diamond executable
diamond = "diamond"

# Threads used by each blastp job
threads = 6

# Sensitivity: fast, default, mid-sensitive, sensitive, more-sensitive,
# very-sensitive, ultra-sensitive
sensitivity = "very-sensitive"

# =============================================================================
# VISUALISATION
# =============================================================================

# Interpreters for .R and .py scripts
rscript = "Rscript"
python = "python3"

# Plotting script (default: <root>/Functions/visualize_rstudio.R)
# visualize_script = "/path/to/visualize_rstudio.R"

# =============================================================================
# DATABASE FILTERING
# =============================================================================

# Include only databases matching regex pattern
# include_db = "^(APD|CAMP|DBAASP)"

# Exclude databases matching regex pattern
# exclude_db = "_old$"
"#
        .to_string()
    }
}
