//! Quill compiler back half: typed tree to verified IR
//!
//! The analyzer lives in `frontend::checker`; this module lowers its output
//! and verifies the result.

pub mod error;
pub mod ir;
pub mod lower;

pub use error::{CompileError, CompileResult};
pub use ir::{IrModule, PrettyPrint};
pub use lower::{lower_program, Lowerer};

use crate::frontend::ast::Program;
use crate::frontend::checker::{self, CheckWarning, CheckerOptions, TypedProgram};

/// Result of a successful compilation
#[derive(Debug, Clone)]
pub struct Compilation {
    pub typed: TypedProgram,
    pub module: IrModule,
    pub warnings: Vec<CheckWarning>,
}

/// Main compiler entry point
pub struct Compiler {
    options: CheckerOptions,
}

impl Compiler {
    pub fn new(options: CheckerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Analyse, lower and verify a program
    #[tracing::instrument(level = "debug", skip_all, fields(root = %program.root.name.name))]
    pub fn compile(&self, program: &Program) -> CompileResult<Compilation> {
        let analysis = checker::analyze(program, &self.options)?;
        let module = lower_program(&analysis.program)?;
        module
            .validate()
            .map_err(|errors| CompileError::Verification { errors })?;

        Ok(Compilation {
            typed: analysis.program,
            module,
            warnings: analysis.warnings,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CheckerOptions::default())
    }
}
