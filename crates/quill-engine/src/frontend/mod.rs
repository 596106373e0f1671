//! Front end: syntax tree, types and semantic analysis

pub mod ast;
pub mod checker;
pub mod span;
pub mod types;

pub use ast::Program;
pub use checker::{analyze, Analysis, CheckerOptions, SemanticError, SemanticResult};
pub use span::Span;
pub use types::Type;
