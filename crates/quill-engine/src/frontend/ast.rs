//! Abstract Syntax Tree for Quill programs.
//!
//! The tree is produced by an upstream parser (or by [`build`] in tests) and
//! consumed by the checker. A program is a single root class; nested classes
//! are owned by their enclosing class.
//!
//! Every AST node includes a `Span` for precise source location tracking.

use crate::frontend::span::Span;
use crate::frontend::types::Type;

pub mod build;
pub mod expression;
pub mod statement;

pub use expression::*;
pub use statement::*;

/// Root node: one compilation unit rooted at a single top-level class
///
/// # Example
/// ```
/// use quill_engine::frontend::ast::build::*;
/// use quill_engine::frontend::types::Type;
///
/// let program = program(class("Main").method(method("main", Type::Void, vec![])));
/// assert_eq!(program.root.name.name, "Main");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub root: ClassDecl,
    pub span: Span,
}

impl Program {
    pub fn new(root: ClassDecl, span: Span) -> Self {
        Self { root, span }
    }

    /// Total number of classes including the root
    pub fn class_count(&self) -> usize {
        fn count(class: &ClassDecl) -> usize {
            1 + class.nested.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

/// Class declaration with its members and nested classes
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub nested: Vec<ClassDecl>,
    pub span: Span,
}

/// Class-level storage: `long boo = ba;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Identifier,
    pub ty: Type,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// Parameterless method: `int foo() { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: Identifier,
    pub return_type: Type,
    pub body: BlockStatement,
    pub span: Span,
}

/// Identifier: `foo`, `Main`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
