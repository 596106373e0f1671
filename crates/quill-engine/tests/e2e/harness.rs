//! Test harness for end-to-end compilation and execution
//!
//! Provides utilities for compiling a program and running it on the
//! reference evaluator.

#![allow(dead_code)]

use quill_engine::{
    Compilation, CheckerOptions, CompileError, Compiler, PrettyPrint, Program, SemanticError,
    VmError, VmOptions,
};

pub use quill_engine::frontend::ast::build::*;
pub use quill_engine::frontend::ast::BinaryOperator;
pub use quill_engine::Type;

/// Error type for e2e tests
#[derive(Debug)]
pub enum E2EError {
    /// Analysis, lowering or verification error
    Compile(CompileError),
    /// Evaluation error
    Vm(VmError),
}

impl std::fmt::Display for E2EError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            E2EError::Compile(e) => write!(f, "Compile error: {}", e),
            E2EError::Vm(e) => write!(f, "VM error: {}", e),
        }
    }
}

impl std::error::Error for E2EError {}

/// Result type for e2e tests
pub type E2EResult<T> = Result<T, E2EError>;

/// Compile with default options
pub fn compile(program: &Program) -> E2EResult<Compilation> {
    compile_with(program, CheckerOptions::default())
}

/// Compile with explicit checker options
pub fn compile_with(program: &Program, options: CheckerOptions) -> E2EResult<Compilation> {
    Compiler::new(options).compile(program).map_err(E2EError::Compile)
}

/// Compile and run, returning the printed lines
pub fn compile_and_run(program: &Program) -> E2EResult<Vec<String>> {
    run_with(program, CheckerOptions::default())
}

pub fn run_with(program: &Program, options: CheckerOptions) -> E2EResult<Vec<String>> {
    let compilation = compile_with(program, options)?;
    quill_engine::run_program(&compilation, VmOptions::default())
        .map(|output| output.into_lines())
        .map_err(E2EError::Vm)
}

/// Compile and run, expecting exactly these printed lines
pub fn expect_output(program: &Program, expected: &[&str]) {
    expect_output_with(program, CheckerOptions::default(), expected)
}

pub fn expect_output_with(program: &Program, options: CheckerOptions, expected: &[&str]) {
    match run_with(program, options.clone()) {
        Ok(lines) => {
            if lines != expected {
                let ir = compile_with(program, options)
                    .map(|c| c.module.pretty_print())
                    .unwrap_or_default();
                panic!(
                    "Wrong output: expected {:?}, got {:?}\nIR:\n{}",
                    expected, lines, ir
                );
            }
        }
        Err(e) => panic!("Compilation/execution failed: {}\nProgram:\n{:#?}", e, program),
    }
}

/// Compile, expecting a semantic error
pub fn expect_semantic_error(program: &Program) -> SemanticError {
    expect_semantic_error_with(program, CheckerOptions::default())
}

pub fn expect_semantic_error_with(program: &Program, options: CheckerOptions) -> SemanticError {
    match compile_with(program, options) {
        Ok(compilation) => panic!(
            "Expected a semantic error, but compilation succeeded\nIR:\n{}",
            compilation.module.pretty_print()
        ),
        Err(E2EError::Compile(CompileError::Semantic(e))) => e,
        Err(e) => panic!("Expected a semantic error, got {}", e),
    }
}

/// Compile and run, expecting an evaluation error
pub fn expect_vm_error(program: &Program) -> VmError {
    match compile_and_run(program) {
        Ok(lines) => panic!("Expected a VM error, program printed {:?}", lines),
        Err(E2EError::Vm(e)) => e,
        Err(e) => panic!("Expected a VM error, got {}", e),
    }
}

/// `class Main { void main() { <body> } }`
pub fn main_only(body: Vec<Statement>) -> Program {
    program(class("Main").method(method("main", Type::Void, body)))
}

pub use quill_engine::frontend::ast::Statement;
