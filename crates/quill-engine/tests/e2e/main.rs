//! End-to-end tests: analyse, lower, verify and evaluate whole programs
//!
//! Programs are assembled with `quill_engine::frontend::ast::build`, the same
//! helpers a parser front end uses.

mod harness;

mod classes;
mod config;
mod diagnostics;
mod operators;
mod switches;
mod variables;
