// registry.rs - Registry of external dependencies checked by `dbcompare check`

use super::diamond::Diamond;
use super::traits::{probe, ExternalTool, ToolCheck};
use std::path::{Path, PathBuf};

/// A dependency checked by running a command and looking at its exit status
#[derive(Debug, Clone)]
pub struct CommandProbe {
    pub name: String,
    pub description: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandProbe {
    pub fn new(name: &str, description: &str, program: &Path, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            program: program.to_path_buf(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl ExternalTool for CommandProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self) -> ToolCheck {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        probe(&self.program, &args)
    }
}

/// Ordered list of the tools the pipeline relies on
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    tools: Vec<Box<dyn ExternalTool>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Diamond, R and the R libraries used by the plotting script
    pub fn standard(diamond: &Diamond, rscript: &Path) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(diamond.clone()));
        registry.register(Box::new(CommandProbe::new(
            "R",
            "runs the visualisation script",
            rscript,
            &["--version"],
        )));
        registry.register(Box::new(CommandProbe::new(
            "R libraries (tidyverse, conflicted)",
            "used by the visualisation script",
            rscript,
            &["-e", "library(tidyverse); library(conflicted)"],
        )));
        registry
    }

    pub fn register(&mut self, tool: Box<dyn ExternalTool>) {
        self.tools.push(tool);
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check every tool in registration order
    pub fn check_all(&self) -> Vec<(String, ToolCheck)> {
        self.tools
            .iter()
            .map(|t| (t.name().to_string(), t.check()))
            .collect()
    }
}
