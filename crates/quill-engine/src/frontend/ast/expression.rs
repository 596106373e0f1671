//! Expression AST nodes
//!
//! Literals, names and qualified paths, unary/binary/logical operators,
//! increments, assignments and calls.

use super::*;
use crate::frontend::types::BinaryOp;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal: 42, 252525353213, 10L
    IntLiteral(IntLiteral),

    /// Float literal: 3.14, 0.1E1, 5.E0
    FloatLiteral(FloatLiteral),

    /// Unqualified name: foo
    Identifier(Identifier),

    /// Qualified member access: Main.Foo.bar
    Path(PathExpression),

    /// Unary expression: !x, -y, +z
    Unary(UnaryExpression),

    /// Increment/decrement: ++x, x--
    Update(UpdateExpression),

    /// Binary expression: x + y, a < b
    Binary(BinaryExpression),

    /// Logical expression: x && y, a || b
    Logical(LogicalExpression),

    /// Assignment: x = 42
    Assignment(AssignmentExpression),

    /// Call: foo(), Main.A.foo(), println(x)
    Call(CallExpression),

    /// Parenthesized: (expr)
    Parenthesized(ParenthesizedExpression),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::IntLiteral(e) => &e.span,
            Expression::FloatLiteral(e) => &e.span,
            Expression::Identifier(e) => &e.span,
            Expression::Path(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Update(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::Logical(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::Parenthesized(e) => &e.span,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::IntLiteral(_) | Expression::FloatLiteral(_)
        )
    }

    /// Strip any number of enclosing parentheses
    pub fn unparenthesized(&self) -> &Expression {
        let mut expr = self;
        while let Expression::Parenthesized(p) = expr {
            expr = &p.expression;
        }
        expr
    }
}

// ============================================================================
// Literals and names
// ============================================================================

/// Integer literal; `long_suffix` records a trailing `L`
#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub long_suffix: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

/// Dotted chain of identifiers; the first names the root class
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl PathExpression {
    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    /// `Main.A.foo`
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,  // +x
    Minus, // -x
    Not,   // !x
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub target: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment, // ++
    Decrement, // --
}

impl UpdateOperator {
    pub fn delta(self) -> i64 {
        match self {
            UpdateOperator::Increment => 1,
            UpdateOperator::Decrement => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %

    // Comparison
    Equal,        // ==
    NotEqual,     // !=
    LessThan,     // <
    LessEqual,    // <=
    GreaterThan,  // >
    GreaterEqual, // >=
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        self.to_op().is_comparison()
    }

    /// The value-level operator this node evaluates with
    pub fn to_op(self) -> BinaryOp {
        match self {
            BinaryOperator::Add => BinaryOp::Add,
            BinaryOperator::Subtract => BinaryOp::Sub,
            BinaryOperator::Multiply => BinaryOp::Mul,
            BinaryOperator::Divide => BinaryOp::Div,
            BinaryOperator::Modulo => BinaryOp::Rem,
            BinaryOperator::Equal => BinaryOp::Eq,
            BinaryOperator::NotEqual => BinaryOp::Ne,
            BinaryOperator::LessThan => BinaryOp::Lt,
            BinaryOperator::LessEqual => BinaryOp::Le,
            BinaryOperator::GreaterThan => BinaryOp::Gt,
            BinaryOperator::GreaterEqual => BinaryOp::Ge,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LogicalOperator {
    And, // &&
    Or,  // ||
}

/// Assignment: `x = 42`; chains nest to the right
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

// ============================================================================
// Calls
// ============================================================================

/// Call through a one-segment (current class) or qualified path
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: PathExpression,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}
