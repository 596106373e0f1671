//! Statement checking: blocks, declarations, switch, break and return
//!
//! A switch body is one scope shared by all of its cases, so a declaration
//! in one case is visible to the cases it falls through into. Statements
//! that follow a `return` or `break` in the same list are checked, reported
//! as unreachable and dropped.

use super::consteval::const_integral;
use super::error::{CheckWarning, SemanticError, SemanticResult};
use super::method::{coercion_mismatch, MethodChecker};
use super::symbols::ScopeKind;
use super::typed::{TypedCase, TypedStmt, TypedSwitch};
use crate::frontend::ast::{self, Statement};
use crate::frontend::types::{require_value, Type};
use rustc_hash::FxHashMap;

impl<'a> MethodChecker<'a> {
    /// Check a statement list in the current scope
    pub fn check_statements(&mut self, statements: &[Statement]) -> SemanticResult<Vec<TypedStmt>> {
        let mut typed = Vec::with_capacity(statements.len());
        let mut reachable = true;
        let mut reported = false;

        for stmt in statements {
            let checked = self.check_stmt(stmt)?;
            if reachable {
                reachable = completes_normally(&checked);
                typed.push(checked);
            } else if !reported && !matches!(stmt, Statement::Empty(_)) {
                // Only the first unreachable statement of a list is reported
                self.warn(CheckWarning::UnreachableCode { span: *stmt.span() })?;
                reported = true;
            }
        }
        Ok(typed)
    }

    fn check_stmt(&mut self, stmt: &Statement) -> SemanticResult<TypedStmt> {
        match stmt {
            Statement::Block(block) => {
                self.scopes.push_block(ScopeKind::Block);
                let result = self.check_statements(&block.statements);
                self.scopes.pop_block();
                Ok(TypedStmt::Block(result?))
            }
            Statement::VariableDecl(decl) => self.check_var_decl(decl),
            Statement::Expression(stmt) => Ok(TypedStmt::Expr(self.check_expr(&stmt.expression)?)),
            Statement::Switch(switch) => self.check_switch(switch),
            Statement::Break(brk) => {
                if self.switch_depth == 0 {
                    return Err(SemanticError::BreakOutsideSwitch { span: brk.span });
                }
                Ok(TypedStmt::Break)
            }
            Statement::Return(ret) => self.check_return(ret),
            Statement::Empty(_) => Ok(TypedStmt::Block(Vec::new())),
        }
    }

    fn check_var_decl(&mut self, decl: &ast::VariableDecl) -> SemanticResult<TypedStmt> {
        if decl.ty.is_void() {
            return Err(SemanticError::type_mismatch(
                "a numeric variable type",
                Type::Void,
                decl.name.span,
            ));
        }

        let init = match &decl.initializer {
            Some(init) => {
                let value = self.check_expr(init)?;
                Some(self.coerce(value, decl.ty)?)
            }
            None => None,
        };

        let declared = self
            .scopes
            .declare(&decl.name.name, decl.ty, decl.name.span)
            .map_err(|dup| SemanticError::DuplicateDeclaration {
                name: dup.name,
                original: dup.original,
                span: dup.duplicate,
            })?;

        if let Some(original) = declared.shadows {
            self.warn(CheckWarning::ShadowedVariable {
                name: decl.name.name.clone(),
                original,
                shadow: decl.name.span,
            })?;
        }

        Ok(TypedStmt::Declare {
            slot: declared.slot,
            init,
        })
    }

    fn check_return(&mut self, ret: &ast::ReturnStatement) -> SemanticResult<TypedStmt> {
        match (&ret.value, self.return_type.is_void()) {
            (None, true) => Ok(TypedStmt::Return(None)),
            (None, false) => Err(SemanticError::type_mismatch(
                self.return_type,
                Type::Void,
                ret.span,
            )),
            (Some(value), true) => {
                let typed = self.check_expr(value)?;
                Err(SemanticError::type_mismatch(Type::Void, typed.ty, typed.span))
            }
            (Some(value), false) => {
                let typed = self.check_expr(value)?;
                Ok(TypedStmt::Return(Some(self.coerce(typed, self.return_type)?)))
            }
        }
    }

    fn check_switch(&mut self, switch: &ast::SwitchStatement) -> SemanticResult<TypedStmt> {
        let scrutinee = self.check_expr(&switch.discriminant)?;
        require_value(scrutinee.ty).map_err(|err| coercion_mismatch(err, scrutinee.span))?;
        if !scrutinee.ty.is_integral() {
            return Err(SemanticError::type_mismatch(
                "an integral type",
                scrutinee.ty,
                scrutinee.span,
            ));
        }

        // Labels first: they fix the comparison type
        let mut labels = Vec::with_capacity(switch.cases.len());
        let mut seen = FxHashMap::default();
        let mut default_span = None;
        let mut compare_type = scrutinee.ty;

        for case in &switch.cases {
            let Some(test) = &case.test else {
                if let Some(original) = default_span {
                    return Err(SemanticError::DuplicateDefault {
                        original,
                        span: case.span,
                    });
                }
                default_span = Some(case.span);
                labels.push(None);
                continue;
            };

            let label = self.check_expr(test)?;
            require_value(label.ty).map_err(|err| coercion_mismatch(err, label.span))?;
            if !label.ty.is_integral() {
                return Err(SemanticError::type_mismatch(
                    "an integral type",
                    label.ty,
                    label.span,
                ));
            }
            let value = const_integral(&label)
                .ok_or(SemanticError::InvalidCaseLabel { span: label.span })?;
            if let Some(&original) = seen.get(&value) {
                return Err(SemanticError::DuplicateCaseLabel {
                    value,
                    original,
                    span: label.span,
                });
            }
            seen.insert(value, label.span);
            compare_type = compare_type.promote(label.ty).unwrap_or(compare_type);
            labels.push(Some(value));
        }

        self.scopes.push_block(ScopeKind::Switch);
        self.switch_depth += 1;
        let bodies = switch
            .cases
            .iter()
            .map(|case| self.check_statements(&case.consequent))
            .collect::<SemanticResult<Vec<_>>>();
        self.switch_depth -= 1;
        self.scopes.pop_block();

        let cases = labels
            .into_iter()
            .zip(bodies?)
            .map(|(label, body)| TypedCase { label, body })
            .collect();

        tracing::trace!(cases = switch.cases.len(), compare = %compare_type, "switch checked");
        Ok(TypedStmt::Switch(TypedSwitch {
            scrutinee: scrutinee.convert_to(compare_type),
            compare_type,
            cases,
        }))
    }
}

/// Whether control can reach the end of a statement
pub fn completes_normally(stmt: &TypedStmt) -> bool {
    match stmt {
        TypedStmt::Return(_) | TypedStmt::Break => false,
        TypedStmt::Block(body) => list_completes_normally(body),
        TypedStmt::Switch(switch) => {
            switch.default_index().is_none()
                || switch.cases.iter().any(|case| breaks_out(&case.body))
                || switch
                    .cases
                    .last()
                    .is_none_or(|case| list_completes_normally(&case.body))
        }
        TypedStmt::Declare { .. } | TypedStmt::Expr(_) => true,
    }
}

/// Whether control can reach the end of a statement list
pub fn list_completes_normally(body: &[TypedStmt]) -> bool {
    body.iter().all(completes_normally)
}

/// Whether a `break` in `body` targets the enclosing switch
fn breaks_out(body: &[TypedStmt]) -> bool {
    body.iter().any(|stmt| match stmt {
        TypedStmt::Break => true,
        TypedStmt::Block(inner) => breaks_out(inner),
        // A nested switch owns its own breaks
        TypedStmt::Switch(_) => false,
        TypedStmt::Declare { .. } | TypedStmt::Expr(_) | TypedStmt::Return(_) => false,
    })
}
