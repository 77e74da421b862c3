// traits.rs - Seams between the pipeline and the external programs it drives

use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output};

/// Result of a capability check by trial invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub available: bool,
    pub diagnostic: String,
}

impl ToolCheck {
    pub fn available(diagnostic: impl Into<String>) -> Self {
        Self {
            available: true,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn missing(diagnostic: impl Into<String>) -> Self {
        Self {
            available: false,
            diagnostic: diagnostic.into(),
        }
    }
}

/// An external program the pipeline depends on
pub trait ExternalTool: Send + Sync + Debug {
    /// Human-readable name
    fn name(&self) -> &str;

    /// What the tool is needed for
    fn description(&self) -> &str;

    /// Probe the tool without side effects
    fn check(&self) -> ToolCheck;
}

/// Builds a binary search index from one cleaned sequence file
pub trait IndexBuilder: Send + Sync + Debug {
    fn build_index(&self, fasta: &Path, index: &Path) -> Result<(), String>;
}

/// Compares one query sequence file against one reference index.
/// Writes a headerless tab-separated table to `output`.
pub trait Aligner: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn align(&self, index: &Path, query: &Path, output: &Path) -> Result<(), String>;
}

/// Run a prepared command to completion, turning a non-zero exit into an error
/// carrying the tool's stderr
pub fn run_command(cmd: &mut Command, what: &str) -> Result<Output, String> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let output = cmd.output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            format!("{}: '{}' is not installed or not on PATH", what, program)
        } else {
            format!("{}: failed to start '{}': {}", what, program, e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{}: '{}' exited with {}: {}",
            what,
            program,
            output.status,
            stderr.trim()
        ));
    }
    Ok(output)
}

/// Trial invocation used by capability checks
pub fn probe(program: &Path, args: &[&str]) -> ToolCheck {
    let mut cmd = Command::new(program);
    cmd.args(args);
    match run_command(&mut cmd, "check") {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            // some tools (Rscript --version) print their banner on stderr
            let banner = stdout
                .lines()
                .chain(stderr.lines())
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or("ok")
                .to_string();
            ToolCheck::available(banner)
        }
        Err(e) => ToolCheck::missing(e),
    }
}
