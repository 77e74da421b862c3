// script.rs - Runner for the external visualisation script

use super::traits::run_command;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

/// Upper limit of the peptide-length axis handed to the plotting script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLimit {
    Auto,
    Max(u32),
}

impl FromStr for AxisLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(AxisLimit::Auto);
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(AxisLimit::Max(n)),
            _ => Err(format!(
                "Invalid axis limit '{}'. Use a positive number or 'auto'",
                s
            )),
        }
    }
}

impl Display for AxisLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisLimit::Auto => write!(f, "auto"),
            AxisLimit::Max(n) => write!(f, "{}", n),
        }
    }
}

/// Interpreter chosen from the script's extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRunner {
    pub interpreter: PathBuf,
    pub script: PathBuf,
}

impl ScriptRunner {
    /// `.R` scripts run under `rscript`, `.py` under `python`; anything else is rejected
    pub fn for_script(script: &Path, rscript: &Path, python: &Path) -> Result<Self, String> {
        let extension = script
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let interpreter = match extension {
            "R" | "r" => rscript,
            "py" => python,
            _ => {
                return Err(format!(
                    "Unsupported file type for script '{}' (expected .R or .py)",
                    script.display()
                ))
            }
        };
        Ok(Self {
            interpreter: interpreter.to_path_buf(),
            script: script.to_path_buf(),
        })
    }

    pub fn command_args(&self, args: &[String]) -> Vec<String> {
        let mut all = vec![self.script.to_string_lossy().to_string()];
        all.extend(args.iter().cloned());
        all
    }

    /// Run the script in `workdir` and return its stdout
    pub fn run(&self, args: &[String], workdir: &Path) -> Result<String, String> {
        if !self.script.is_file() {
            return Err(format!("Script not found: {}", self.script.display()));
        }
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(self.command_args(args)).current_dir(workdir);
        let output = run_command(&mut cmd, "visualisation script")?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
