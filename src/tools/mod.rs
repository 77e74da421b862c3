// mod.rs - External tool adapters

pub mod diamond;
pub mod registry;
pub mod script;
pub mod traits;

// Re-export main types for convenience
pub use diamond::{Diamond, Sensitivity};
pub use registry::{CommandProbe, DependencyRegistry};
pub use script::{AxisLimit, ScriptRunner};
pub use traits::{Aligner, ExternalTool, IndexBuilder, ToolCheck};
