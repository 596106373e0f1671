//! Statement AST nodes

use super::*;

/// Statement (performs an action)
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Block: { ... }
    Block(BlockStatement),

    /// Local declaration: int x = 5;
    VariableDecl(VariableDecl),

    /// Expression statement: foo();
    Expression(ExpressionStatement),

    /// switch (x) { case 0: ... default: ... }
    Switch(SwitchStatement),

    /// break;
    Break(BreakStatement),

    /// return; / return e;
    Return(ReturnStatement),

    /// ;
    Empty(Span),
}

impl Statement {
    pub fn span(&self) -> &Span {
        match self {
            Statement::Block(s) => &s.span,
            Statement::VariableDecl(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::Switch(s) => &s.span,
            Statement::Break(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub ty: Type,
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

/// `case <test>:` or `default:` (test is `None`) followed by its statements
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    pub span: Span,
}

impl SwitchCase {
    pub fn is_default(&self) -> bool {
        self.test.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}
