// diamond.rs - DIAMOND adapter (index building and blastp comparison)

use super::traits::{probe, run_command, Aligner, ExternalTool, IndexBuilder, ToolCheck};
use crate::output::annotate::RESULT_COLUMNS;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

pub const DEFAULT_THREADS: usize = 6;

/// DIAMOND sensitivity preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sensitivity {
    Fast,
    Default,
    MidSensitive,
    Sensitive,
    MoreSensitive,
    #[default]
    VerySensitive,
    UltraSensitive,
}

impl FromStr for Sensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("--") {
            "fast" => Ok(Sensitivity::Fast),
            "default" => Ok(Sensitivity::Default),
            "mid-sensitive" => Ok(Sensitivity::MidSensitive),
            "sensitive" => Ok(Sensitivity::Sensitive),
            "more-sensitive" => Ok(Sensitivity::MoreSensitive),
            "very-sensitive" => Ok(Sensitivity::VerySensitive),
            "ultra-sensitive" => Ok(Sensitivity::UltraSensitive),
            _ => Err(format!(
                "Invalid sensitivity: {}. Use: fast, default, mid-sensitive, sensitive, more-sensitive, very-sensitive, ultra-sensitive",
                s
            )),
        }
    }
}

impl Sensitivity {
    pub fn name(&self) -> &'static str {
        match self {
            Sensitivity::Fast => "fast",
            Sensitivity::Default => "default",
            Sensitivity::MidSensitive => "mid-sensitive",
            Sensitivity::Sensitive => "sensitive",
            Sensitivity::MoreSensitive => "more-sensitive",
            Sensitivity::VerySensitive => "very-sensitive",
            Sensitivity::UltraSensitive => "ultra-sensitive",
        }
    }

    /// Command-line flag, `None` for DIAMOND's default mode
    pub fn flag(&self) -> Option<String> {
        match self {
            Sensitivity::Default => None,
            other => Some(format!("--{}", other.name())),
        }
    }
}

/// Handle on a DIAMOND executable plus the fixed job parameters
#[derive(Debug, Clone)]
pub struct Diamond {
    pub binary: PathBuf,
    pub threads: usize,
    pub sensitivity: Sensitivity,
}

impl Diamond {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
            threads: DEFAULT_THREADS,
            sensitivity: Sensitivity::default(),
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn makedb_args(&self, fasta: &Path, index: &Path) -> Vec<String> {
        vec![
            "makedb".to_string(),
            "--in".to_string(),
            fasta.to_string_lossy().to_string(),
            "--db".to_string(),
            index.to_string_lossy().to_string(),
        ]
    }

    pub fn blastp_args(&self, index: &Path, query: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "blastp".to_string(),
            "--db".to_string(),
            index.to_string_lossy().to_string(),
            "--query".to_string(),
            query.to_string_lossy().to_string(),
            "--out".to_string(),
            output.to_string_lossy().to_string(),
            "--outfmt".to_string(),
            "6".to_string(),
        ];
        args.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
        args.push("--threads".to_string());
        args.push(self.threads.to_string());
        args.push("--log".to_string());
        if let Some(flag) = self.sensitivity.flag() {
            args.push(flag);
        }
        args
    }
}

impl ExternalTool for Diamond {
    fn name(&self) -> &str {
        "Diamond"
    }

    fn description(&self) -> &str {
        "protein aligner used for makedb and blastp"
    }

    fn check(&self) -> ToolCheck {
        probe(&self.binary, &["version"])
    }
}

impl IndexBuilder for Diamond {
    fn build_index(&self, fasta: &Path, index: &Path) -> Result<(), String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.makedb_args(fasta, index));
        run_command(&mut cmd, "diamond makedb")?;
        Ok(())
    }
}

impl Aligner for Diamond {
    fn name(&self) -> &str {
        "diamond blastp"
    }

    fn align(&self, index: &Path, query: &Path, output: &Path) -> Result<(), String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.blastp_args(index, query, output));
        run_command(&mut cmd, "diamond blastp")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitivity_parsing() {
        assert_eq!(
            Sensitivity::from_str("very-sensitive").unwrap(),
            Sensitivity::VerySensitive
        );
        assert_eq!(
            Sensitivity::from_str("--ULTRA-SENSITIVE").unwrap(),
            Sensitivity::UltraSensitive
        );
        assert!(Sensitivity::from_str("extreme").is_err());
        assert_eq!(Sensitivity::Default.flag(), None);
        assert_eq!(Sensitivity::Fast.flag().as_deref(), Some("--fast"));
        assert_eq!(Sensitivity::default(), Sensitivity::VerySensitive);
    }

    #[test]
    fn test_blastp_args() {
        let diamond = Diamond::new("diamond");
        let args = diamond.blastp_args(
            Path::new("idx/X.dmnd"),
            Path::new("clean/p.fasta"),
            Path::new("out/X/X_p_diamond.tsv"),
        );
        assert_eq!(&args[..3], &["blastp", "--db", "idx/X.dmnd"]);
        let fmt = args.iter().position(|a| a == "--outfmt").unwrap();
        assert_eq!(args[fmt + 1], "6");
        assert_eq!(&args[fmt + 2..fmt + 19], &RESULT_COLUMNS.map(String::from)[..]);
        assert!(args.windows(2).any(|w| w[0] == "--threads" && w[1] == "6"));
        assert!(args.contains(&"--log".to_string()));
        assert_eq!(args.last().unwrap(), "--very-sensitive");
    }

    #[test]
    fn test_makedb_args() {
        let diamond = Diamond::new("diamond").with_threads(2);
        let args = diamond.makedb_args(Path::new("a.fasta"), Path::new("a.dmnd"));
        assert_eq!(args, vec!["makedb", "--in", "a.fasta", "--db", "a.dmnd"]);
    }

    #[test]
    fn test_missing_binary_fails_job() {
        let diamond = Diamond::new("no-such-diamond-binary");
        assert!(!diamond.check().available);
        let err = diamond
            .align(Path::new("x.dmnd"), Path::new("q.fasta"), Path::new("o.tsv"))
            .unwrap_err();
        assert!(err.contains("not installed"));
    }
}
