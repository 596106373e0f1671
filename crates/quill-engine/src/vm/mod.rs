//! Reference evaluator for lowered IR
//!
//! Used to observe what lowered programs print: the initializer runs first,
//! then the entry point, with `println` routed through an [`Output`].

pub mod error;
pub mod interpreter;
pub mod output;
pub mod register_file;

pub use error::{VmError, VmResult};
pub use interpreter::Vm;
pub use output::{CapturedOutput, Output, StdoutOutput};
pub use register_file::RegisterFile;

use crate::compiler::ir::IrModule;
use crate::frontend::checker::ConfigError;
use serde::{Deserialize, Serialize};

/// Evaluator limits, loadable from the `[vm]` table of `quill.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VmOptions {
    /// Deepest allowed call nesting
    pub max_call_depth: usize,
    /// Register file capacity shared by all frames
    pub max_registers: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 1024,
            max_registers: register_file::DEFAULT_MAX_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    vm: VmOptions,
}

impl VmOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        if file.vm.max_call_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max-call-depth must be at least 1".to_string(),
            ));
        }
        Ok(file.vm)
    }
}

/// Run a module and collect everything it prints
pub fn run_captured(module: &IrModule, options: VmOptions) -> VmResult<CapturedOutput> {
    let mut vm = Vm::new(module, options, CapturedOutput::new());
    vm.run()?;
    Ok(vm.into_output())
}
