//! Expression checking and call resolution
//!
//! Unqualified names resolve against the scope stack, then against fields
//! declared on the current class. Unqualified calls resolve against methods
//! declared on the current class, then the `println` intrinsic. Anything
//! else must be spelled as a qualified path from the root class.

use super::error::{SemanticError, SemanticResult};
use super::method::{coercion_mismatch, MethodChecker};
use super::typed::{ExprKind, Place, TypedExpr};
use crate::frontend::ast::{self, Expression, UnaryOperator};
use crate::frontend::types::{require_value, CoercionEngine, Scalar, Type, UnaryOp};

/// Name of the output intrinsic reachable from any class
pub const PRINTLN: &str = "println";

impl<'a> MethodChecker<'a> {
    pub fn check_expr(&mut self, expr: &Expression) -> SemanticResult<TypedExpr> {
        match expr {
            Expression::IntLiteral(lit) => Ok(self.check_int_literal(lit)),
            Expression::FloatLiteral(lit) => Ok(TypedExpr::constant(Scalar::Double(lit.value), lit.span)),
            Expression::Identifier(ident) => self.check_identifier(ident),
            Expression::Path(path) => {
                let field = self.resolver().resolve_field(path)?;
                let ty = self.table.field(field).ty;
                Ok(TypedExpr::new(ExprKind::Field(field), ty, path.span))
            }
            Expression::Unary(unary) => self.check_unary(unary),
            Expression::Update(update) => self.check_update(update),
            Expression::Binary(binary) => self.check_binary(binary),
            Expression::Logical(logical) => self.check_logical(logical),
            Expression::Assignment(assign) => self.check_assignment(assign),
            Expression::Call(call) => self.check_call(call),
            Expression::Parenthesized(paren) => self.check_expr(&paren.expression),
        }
    }

    /// Check an expression whose value is consumed (not `void`)
    pub(super) fn check_value(&mut self, expr: &Expression) -> SemanticResult<TypedExpr> {
        let typed = self.check_expr(expr)?;
        require_value(typed.ty).map_err(|err| coercion_mismatch(err, typed.span))?;
        Ok(typed)
    }

    fn check_int_literal(&self, lit: &ast::IntLiteral) -> TypedExpr {
        let value = match CoercionEngine::int_literal_type(lit.value, lit.long_suffix) {
            Type::Int => Scalar::Int(lit.value as i32),
            _ => Scalar::Long(lit.value),
        };
        TypedExpr::constant(value, lit.span)
    }

    fn check_identifier(&self, ident: &ast::Identifier) -> SemanticResult<TypedExpr> {
        if let Some(binding) = self.scopes.lookup(&ident.name) {
            return Ok(TypedExpr::new(ExprKind::Local(binding.slot), binding.ty, ident.span));
        }
        if let Some(field) = self.table.lookup_field(self.class, &ident.name) {
            tracing::trace!(name = %ident.name, field = field.id.0, "identifier resolved to own field");
            return Ok(TypedExpr::new(ExprKind::Field(field.id), field.ty, ident.span));
        }
        Err(SemanticError::UndefinedVariable {
            name: ident.name.clone(),
            span: ident.span,
        })
    }

    /// Resolve an assignment or update target
    fn check_place(&self, target: &Expression) -> SemanticResult<(Place, Type)> {
        match target.unparenthesized() {
            Expression::Identifier(ident) => {
                let typed = self.check_identifier(ident)?;
                match typed.kind {
                    ExprKind::Local(slot) => Ok((Place::Local(slot), typed.ty)),
                    ExprKind::Field(field) => Ok((Place::Field(field), typed.ty)),
                    _ => Err(SemanticError::InvalidLvalue { span: ident.span }),
                }
            }
            Expression::Path(path) => {
                let field = self.resolver().resolve_field(path)?;
                Ok((Place::Field(field), self.table.field(field).ty))
            }
            other => Err(SemanticError::InvalidLvalue { span: *other.span() }),
        }
    }

    fn check_unary(&mut self, unary: &ast::UnaryExpression) -> SemanticResult<TypedExpr> {
        let operand = self.check_expr(&unary.operand)?;
        let ty = self
            .engine
            .unary_type(unary.operator, operand.ty)
            .map_err(|err| coercion_mismatch(err, operand.span))?;

        let op = match unary.operator {
            UnaryOperator::Plus => {
                return Ok(TypedExpr {
                    span: unary.span,
                    ..operand
                })
            }
            UnaryOperator::Minus => UnaryOp::Neg,
            UnaryOperator::Not => UnaryOp::Not,
        };
        Ok(TypedExpr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
            unary.span,
        ))
    }

    fn check_update(&mut self, update: &ast::UpdateExpression) -> SemanticResult<TypedExpr> {
        let (place, ty) = self.check_place(&update.target)?;
        let ty = self
            .engine
            .update_type(ty)
            .map_err(|err| coercion_mismatch(err, *update.target.span()))?;
        Ok(TypedExpr::new(
            ExprKind::Update {
                place,
                delta: update.operator.delta(),
                prefix: update.prefix,
            },
            ty,
            update.span,
        ))
    }

    fn check_binary(&mut self, binary: &ast::BinaryExpression) -> SemanticResult<TypedExpr> {
        let left = self.check_expr(&binary.left)?;
        let right = self.check_expr(&binary.right)?;
        let typing = self
            .engine
            .result_type(binary.operator, left.ty, right.ty)
            .map_err(|err| {
                let span = if left.ty.is_void() { left.span } else { right.span };
                coercion_mismatch(err, span)
            })?;

        Ok(TypedExpr::new(
            ExprKind::Binary {
                op: binary.operator.to_op(),
                left: Box::new(left.convert_to(typing.operand)),
                right: Box::new(right.convert_to(typing.operand)),
            },
            typing.result,
            binary.span,
        ))
    }

    fn check_logical(&mut self, logical: &ast::LogicalExpression) -> SemanticResult<TypedExpr> {
        let left = self.check_value(&logical.left)?;
        let right = self.check_value(&logical.right)?;
        let ty = self
            .engine
            .logical_type(left.ty, right.ty)
            .map_err(|err| coercion_mismatch(err, logical.span))?;
        Ok(TypedExpr::new(
            ExprKind::Logical {
                op: logical.operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
            logical.span,
        ))
    }

    /// `a = b = c = 10` nests to the right; each target coerces the value
    /// of the assignment to its right independently
    fn check_assignment(&mut self, assign: &ast::AssignmentExpression) -> SemanticResult<TypedExpr> {
        let (place, ty) = self.check_place(&assign.left)?;
        let value = self.check_expr(&assign.right)?;
        let value = self.coerce(value, ty)?;
        Ok(TypedExpr::new(
            ExprKind::Assign {
                place,
                value: Box::new(value),
            },
            ty,
            assign.span,
        ))
    }

    fn check_call(&mut self, call: &ast::CallExpression) -> SemanticResult<TypedExpr> {
        let method = if call.callee.is_qualified() {
            Some(self.resolver().resolve_method(&call.callee)?)
        } else {
            let name = call
                .callee
                .segments
                .first()
                .map(|s| s.name.as_str())
                .unwrap_or_default();
            match self.table.lookup_method(self.class, name) {
                Some(info) => Some(info.id),
                None if name == PRINTLN => None,
                None => {
                    return Err(SemanticError::MethodNotFound {
                        class: self.class_name(),
                        name: name.to_string(),
                        span: call.callee.span,
                    })
                }
            }
        };

        match method {
            Some(id) => {
                let info = self.table.method(id);
                if !call.arguments.is_empty() {
                    return Err(SemanticError::ArgumentCountMismatch {
                        name: self.table.qualified_method_name(id),
                        expected: "0".to_string(),
                        actual: call.arguments.len(),
                        span: call.span,
                    });
                }
                tracing::trace!(callee = %self.table.qualified_method_name(id), "call resolved");
                Ok(TypedExpr::new(ExprKind::Call(id), info.return_type, call.span))
            }
            None => self.check_println(call),
        }
    }

    fn check_println(&mut self, call: &ast::CallExpression) -> SemanticResult<TypedExpr> {
        let argument = match call.arguments.as_slice() {
            [] => None,
            [arg] => Some(Box::new(self.check_value(arg)?)),
            args => {
                return Err(SemanticError::ArgumentCountMismatch {
                    name: PRINTLN.to_string(),
                    expected: "0 or 1".to_string(),
                    actual: args.len(),
                    span: call.span,
                })
            }
        };
        Ok(TypedExpr::new(ExprKind::Println(argument), Type::Void, call.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::build::*;
    use crate::frontend::checker::config::CheckerOptions;
    use crate::frontend::checker::error::MemberKind;
    use crate::frontend::checker::hierarchy::ClassTable;
    use crate::frontend::checker::symbols::LocalSlot;
    use crate::frontend::ast::Program;
    use crate::frontend::span::Span;

    fn fixture() -> Program {
        program(
            class("Main")
                .field(field("foo", Type::Int))
                .field(field("s", Type::Short))
                .method(method("main", Type::Void, vec![]))
                .method(method("answer", Type::Int, vec![ret(int(42))]))
                .nested(
                    class("Foo")
                        .field(field("bar", Type::Long))
                        .method(method("get", Type::Double, vec![ret(float(1.0))])),
                ),
        )
    }

    fn check(expr: Expression) -> SemanticResult<TypedExpr> {
        let table = ClassTable::build(&fixture()).unwrap();
        let options = CheckerOptions::default();
        let mut checker = MethodChecker::new(&table, &options, table.root(), Type::Void);
        checker.scopes.declare("x", Type::Int, Span::default()).unwrap();
        checker.scopes.declare("d", Type::Double, Span::default()).unwrap();
        checker.check_expr(&expr)
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(check(int(10)).unwrap().ty, Type::Int);
        assert_eq!(check(int(252525353213)).unwrap().ty, Type::Long);
        assert_eq!(check(long(1)).unwrap().ty, Type::Long);
        assert_eq!(check(float(0.1e1)).unwrap().ty, Type::Double);
    }

    #[test]
    fn test_local_shadows_field() {
        let typed = check(name("x")).unwrap();
        assert_eq!(typed.kind, ExprKind::Local(LocalSlot(0)));

        let typed = check(name("foo")).unwrap();
        assert!(matches!(typed.kind, ExprKind::Field(_)));
        assert_eq!(typed.ty, Type::Int);
    }

    #[test]
    fn test_nested_field_needs_qualification() {
        assert!(matches!(
            check(name("bar")),
            Err(SemanticError::UndefinedVariable { .. })
        ));
        let typed = check(path(&["Main", "Foo", "bar"])).unwrap();
        assert_eq!(typed.ty, Type::Long);
    }

    #[test]
    fn test_binary_promotes_operands() {
        let typed = check(add(name("x"), name("d"))).unwrap();
        assert_eq!(typed.ty, Type::Double);
        let ExprKind::Binary { left, .. } = typed.kind else {
            panic!("expected binary");
        };
        assert!(matches!(left.kind, ExprKind::Convert(_)));
        assert_eq!(left.ty, Type::Double);
    }

    #[test]
    fn test_comparison_and_logical_are_short() {
        assert_eq!(
            check(binary(ast::BinaryOperator::GreaterThan, float(1.0), int(0)))
                .unwrap()
                .ty,
            Type::Short
        );
        assert_eq!(check(and(int(10), int(1))).unwrap().ty, Type::Short);
        assert_eq!(check(not(name("d"))).unwrap().ty, Type::Short);
    }

    #[test]
    fn test_unary_plus_is_identity() {
        let typed = check(unary(UnaryOperator::Plus, name("x"))).unwrap();
        assert_eq!(typed.kind, ExprKind::Local(LocalSlot(0)));
        assert_eq!(check(neg(name("d"))).unwrap().ty, Type::Double);
    }

    #[test]
    fn test_update_rules() {
        let typed = check(post_inc(name("x"))).unwrap();
        assert_eq!(
            typed.kind,
            ExprKind::Update {
                place: Place::Local(LocalSlot(0)),
                delta: 1,
                prefix: false
            }
        );
        assert!(matches!(
            check(pre_dec(name("d"))),
            Err(SemanticError::TypeMismatch { .. })
        ));
        assert!(matches!(
            check(pre_inc(int(1))),
            Err(SemanticError::InvalidLvalue { .. })
        ));
    }

    #[test]
    fn test_assignment_coercion() {
        assert_eq!(check(assign(name("d"), name("x"))).unwrap().ty, Type::Double);
        assert!(matches!(
            check(assign(name("x"), name("d"))),
            Err(SemanticError::TypeMismatch { .. })
        ));
        // Literal narrowing into short
        assert_eq!(check(assign(name("s"), int(25))).unwrap().ty, Type::Short);
        assert!(matches!(
            check(assign(add(name("x"), int(1)), int(1))),
            Err(SemanticError::InvalidLvalue { .. })
        ));
    }

    #[test]
    fn test_assignment_chain() {
        let chain = assign(
            path(&["Main", "Foo", "bar"]),
            assign(name("foo"), assign(name("x"), int(10))),
        );
        let typed = check(chain).unwrap();
        assert_eq!(typed.ty, Type::Long);
    }

    #[test]
    fn test_call_resolution() {
        assert_eq!(check(call(&["answer"], vec![])).unwrap().ty, Type::Int);
        assert_eq!(
            check(call(&["Main", "Foo", "get"], vec![])).unwrap().ty,
            Type::Double
        );
        assert!(matches!(
            check(call(&["get"], vec![])),
            Err(SemanticError::MethodNotFound { .. })
        ));
        assert!(matches!(
            check(call(&["Main", "answer"], vec![int(1)])),
            Err(SemanticError::ArgumentCountMismatch { .. })
        ));
        assert!(matches!(
            check(call(&["Main", "Foo", "missing"], vec![])),
            Err(SemanticError::MemberNotFound {
                kind: MemberKind::Method,
                ..
            })
        ));
    }

    #[test]
    fn test_println_intrinsic() {
        let typed = check(println(name("x"))).unwrap();
        assert_eq!(typed.ty, Type::Void);
        assert!(check(call(&["println"], vec![])).is_ok());
        assert!(matches!(
            check(call(&["println"], vec![int(1), int(2)])),
            Err(SemanticError::ArgumentCountMismatch { .. })
        ));
        assert!(matches!(
            check(println(call(&["main"], vec![]))),
            Err(SemanticError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_void_operand_rejected() {
        assert!(matches!(
            check(add(call(&["main"], vec![]), int(1))),
            Err(SemanticError::TypeMismatch { .. })
        ));
        assert!(matches!(
            check(assign(name("x"), call(&["main"], vec![]))),
            Err(SemanticError::TypeMismatch { .. })
        ));
    }
}
