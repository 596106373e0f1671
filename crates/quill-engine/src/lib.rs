//! Quill Language Engine
//!
//! Semantic analysis and control-flow lowering for a small Java-like
//! language with nested classes, numeric promotion and C-style `switch`:
//! - **Frontend**: syntax tree, types, and the semantic analyzer (`frontend` module)
//! - **Compiler**: lowering to a basic-block IR and its verification (`compiler` module)
//! - **VM**: a reference evaluator for the IR (`vm` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_engine::frontend::ast::build::*;
//! use quill_engine::{compile_program, run_program, CheckerOptions, Type, VmOptions};
//!
//! let program = program(class("Main").method(method(
//!     "main",
//!     Type::Void,
//!     vec![print(div(int(5), int(2)))],
//! )));
//!
//! let compilation = compile_program(&program, &CheckerOptions::default())?;
//! let output = run_program(&compilation, VmOptions::default())?;
//! assert_eq!(output.lines(), &["2"]);
//! ```
//!
//! The library never installs a `tracing` subscriber; embedders choose one.

#![warn(rust_2018_idioms)]
#![allow(clippy::new_without_default)]

/// Syntax tree, types and semantic analysis
pub mod frontend;

/// Lowering to IR and verification
pub mod compiler;

/// Reference evaluator for lowered IR
pub mod vm;

pub use compiler::{Compilation, CompileError, CompileResult, Compiler, IrModule, PrettyPrint};
pub use frontend::checker::{
    analyze, Analysis, CheckWarning, CheckerOptions, ConfigError, Diagnostic, SemanticError,
    SemanticResult, TypedProgram,
};
pub use frontend::{Program, Span, Type};
pub use vm::{CapturedOutput, Output, StdoutOutput, Vm, VmError, VmOptions};

/// Analyse, lower and verify a program
pub fn compile_program(program: &Program, options: &CheckerOptions) -> CompileResult<Compilation> {
    Compiler::new(options.clone()).compile(program)
}

/// Evaluate a compiled program and capture what it prints
pub fn run_program(compilation: &Compilation, options: VmOptions) -> vm::VmResult<CapturedOutput> {
    vm::run_captured(&compilation.module, options)
}
