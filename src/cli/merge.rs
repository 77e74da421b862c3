// merge.rs - Merge configuration file with CLI arguments

use crate::cli::args::{DEFAULT_SENSITIVITY, DEFAULT_THREADS};
use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Folders
        if self.root.is_none() {
            self.root = config.root;
        }
        if self.sequences_dir.is_none() {
            self.sequences_dir = config.sequences_dir;
        }
        if self.cleaned_dir.is_none() {
            self.cleaned_dir = config.cleaned_dir;
        }
        if self.index_dir.is_none() {
            self.index_dir = config.index_dir;
        }
        if self.results_dir.is_none() {
            self.results_dir = config.results_dir;
        }
        if self.ledger_name.is_none() {
            self.ledger_name = config.ledger_name;
        }

        // Diamond (only override defaults, not explicit CLI values)
        if self.diamond.is_none() {
            self.diamond = config.diamond;
        }
        if self.threads == DEFAULT_THREADS {
            if let Some(threads) = config.threads {
                self.threads = threads;
            }
        }
        if self.sensitivity == DEFAULT_SENSITIVITY {
            if let Some(sensitivity) = config.sensitivity {
                self.sensitivity = sensitivity;
            }
        }

        // Visualisation
        if self.rscript.is_none() {
            self.rscript = config.rscript;
        }
        if self.python.is_none() {
            self.python = config.python;
        }
        if self.script.is_none() {
            self.script = config.visualize_script;
        }

        // Database filtering
        if self.include_db.is_none() {
            self.include_db = config.include_db;
        }
        if self.exclude_db.is_none() {
            self.exclude_db = config.exclude_db;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    #[test]
    fn test_cli_values_win() {
        let args = Args::from_args(
            &["dbcompare"],
            &["--root", "/cli", "--threads", "2", "compare", "all"],
        )
        .unwrap();
        let config = Config {
            root: Some("/config".to_string()),
            threads: Some(32),
            sensitivity: Some("fast".to_string()),
            diamond: Some("/opt/diamond".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.root.as_deref(), Some("/cli"));
        assert_eq!(merged.threads, 2);
        assert_eq!(merged.sensitivity, "fast");
        assert_eq!(merged.diamond.as_deref(), Some("/opt/diamond"));
    }

    #[test]
    fn test_config_fills_defaults() {
        let args = Args::from_args(&["dbcompare"], &["clean"]).unwrap();
        let config = Config {
            threads: Some(24),
            visualize_script: Some("plot.py".to_string()),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.threads, 24);
        assert_eq!(merged.script.as_deref(), Some("plot.py"));
        assert!(merged.root.is_none());
    }
}
