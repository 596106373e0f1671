//! Construction helpers for AST trees
//!
//! The parser is an external collaborator; these helpers let it (and the
//! tests) assemble trees without spelling out spans. Every node gets
//! `Span::default()`.

use super::*;

fn sp() -> Span {
    Span::default()
}

pub fn ident(name: &str) -> Identifier {
    Identifier::new(name, sp())
}

pub fn program(root: ClassDecl) -> Program {
    Program::new(root, sp())
}

pub fn class(name: &str) -> ClassDecl {
    ClassDecl {
        name: ident(name),
        fields: Vec::new(),
        methods: Vec::new(),
        nested: Vec::new(),
        span: sp(),
    }
}

impl ClassDecl {
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn nested(mut self, class: ClassDecl) -> Self {
        self.nested.push(class);
        self
    }
}

pub fn field(name: &str, ty: Type) -> FieldDecl {
    FieldDecl {
        name: ident(name),
        ty,
        initializer: None,
        span: sp(),
    }
}

pub fn field_init(name: &str, ty: Type, init: Expression) -> FieldDecl {
    FieldDecl {
        initializer: Some(init),
        ..field(name, ty)
    }
}

pub fn method(name: &str, return_type: Type, body: Vec<Statement>) -> MethodDecl {
    MethodDecl {
        name: ident(name),
        return_type,
        body: BlockStatement {
            statements: body,
            span: sp(),
        },
        span: sp(),
    }
}

// Expressions

pub fn int(value: i64) -> Expression {
    Expression::IntLiteral(IntLiteral {
        value,
        long_suffix: false,
        span: sp(),
    })
}

/// `10L`
pub fn long(value: i64) -> Expression {
    Expression::IntLiteral(IntLiteral {
        value,
        long_suffix: true,
        span: sp(),
    })
}

pub fn float(value: f64) -> Expression {
    Expression::FloatLiteral(FloatLiteral { value, span: sp() })
}

pub fn name(name: &str) -> Expression {
    Expression::Identifier(ident(name))
}

pub fn path(segments: &[&str]) -> Expression {
    Expression::Path(path_expr(segments))
}

fn path_expr(segments: &[&str]) -> PathExpression {
    PathExpression {
        segments: segments.iter().map(|s| ident(s)).collect(),
        span: sp(),
    }
}

pub fn paren(expression: Expression) -> Expression {
    Expression::Parenthesized(ParenthesizedExpression {
        expression: Box::new(expression),
        span: sp(),
    })
}

pub fn unary(operator: UnaryOperator, operand: Expression) -> Expression {
    Expression::Unary(UnaryExpression {
        operator,
        operand: Box::new(operand),
        span: sp(),
    })
}

pub fn neg(operand: Expression) -> Expression {
    unary(UnaryOperator::Minus, operand)
}

pub fn not(operand: Expression) -> Expression {
    unary(UnaryOperator::Not, operand)
}

fn update(operator: UpdateOperator, prefix: bool, target: Expression) -> Expression {
    Expression::Update(UpdateExpression {
        operator,
        prefix,
        target: Box::new(target),
        span: sp(),
    })
}

pub fn pre_inc(target: Expression) -> Expression {
    update(UpdateOperator::Increment, true, target)
}

pub fn post_inc(target: Expression) -> Expression {
    update(UpdateOperator::Increment, false, target)
}

pub fn pre_dec(target: Expression) -> Expression {
    update(UpdateOperator::Decrement, true, target)
}

pub fn post_dec(target: Expression) -> Expression {
    update(UpdateOperator::Decrement, false, target)
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: sp(),
    })
}

pub fn add(left: Expression, right: Expression) -> Expression {
    binary(BinaryOperator::Add, left, right)
}

pub fn sub(left: Expression, right: Expression) -> Expression {
    binary(BinaryOperator::Subtract, left, right)
}

pub fn mul(left: Expression, right: Expression) -> Expression {
    binary(BinaryOperator::Multiply, left, right)
}

pub fn div(left: Expression, right: Expression) -> Expression {
    binary(BinaryOperator::Divide, left, right)
}

pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Expression {
    Expression::Logical(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: sp(),
    })
}

pub fn and(left: Expression, right: Expression) -> Expression {
    logical(LogicalOperator::And, left, right)
}

pub fn or(left: Expression, right: Expression) -> Expression {
    logical(LogicalOperator::Or, left, right)
}

pub fn assign(left: Expression, right: Expression) -> Expression {
    Expression::Assignment(AssignmentExpression {
        left: Box::new(left),
        right: Box::new(right),
        span: sp(),
    })
}

/// `foo()` for one segment, `Main.A.foo()` for several
pub fn call(callee: &[&str], arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        callee: path_expr(callee),
        arguments,
        span: sp(),
    })
}

pub fn println(argument: Expression) -> Expression {
    call(&["println"], vec![argument])
}

// Statements

pub fn block(statements: Vec<Statement>) -> Statement {
    Statement::Block(BlockStatement {
        statements,
        span: sp(),
    })
}

pub fn var(ty: Type, name: &str, initializer: Option<Expression>) -> Statement {
    Statement::VariableDecl(VariableDecl {
        ty,
        name: ident(name),
        initializer,
        span: sp(),
    })
}

pub fn expr(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement {
        expression,
        span: sp(),
    })
}

pub fn print(argument: Expression) -> Statement {
    expr(println(argument))
}

pub fn switch(discriminant: Expression, cases: Vec<SwitchCase>) -> Statement {
    Statement::Switch(SwitchStatement {
        discriminant,
        cases,
        span: sp(),
    })
}

pub fn case(test: Expression, consequent: Vec<Statement>) -> SwitchCase {
    SwitchCase {
        test: Some(test),
        consequent,
        span: sp(),
    }
}

pub fn default_case(consequent: Vec<Statement>) -> SwitchCase {
    SwitchCase {
        test: None,
        consequent,
        span: sp(),
    }
}

pub fn brk() -> Statement {
    Statement::Break(BreakStatement { span: sp() })
}

pub fn ret(value: Expression) -> Statement {
    Statement::Return(ReturnStatement {
        value: Some(value),
        span: sp(),
    })
}

pub fn ret_void() -> Statement {
    Statement::Return(ReturnStatement {
        value: None,
        span: sp(),
    })
}

pub fn empty() -> Statement {
    Statement::Empty(sp())
}
