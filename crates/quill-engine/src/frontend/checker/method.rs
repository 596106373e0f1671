//! Per-method checking context
//!
//! A `MethodChecker` owns the scope stack of one method body (or one field
//! initializer) and borrows the shared, read-only class table. The
//! expression and statement rules live in `expr.rs` and `stmt.rs`.

use super::config::CheckerOptions;
use super::error::{CheckWarning, SemanticError, SemanticResult};
use super::hierarchy::{ClassId, ClassTable, FieldId, MethodId};
use super::path::PathResolver;
use super::symbols::ScopeStack;
use super::typed::{TypedExpr, TypedField, TypedMethod};
use crate::frontend::ast::{FieldDecl, MethodDecl};
use crate::frontend::types::{CoercionEngine, CoercionError, Type};

pub struct MethodChecker<'a> {
    pub(super) table: &'a ClassTable,
    pub(super) options: &'a CheckerOptions,
    pub(super) engine: CoercionEngine,
    /// Class whose own members unqualified names resolve against
    pub(super) class: ClassId,
    pub(super) return_type: Type,
    pub(super) scopes: ScopeStack,
    /// Number of enclosing switch statements
    pub(super) switch_depth: usize,
    pub(super) warnings: Vec<CheckWarning>,
}

impl<'a> MethodChecker<'a> {
    pub fn new(
        table: &'a ClassTable,
        options: &'a CheckerOptions,
        class: ClassId,
        return_type: Type,
    ) -> Self {
        Self {
            table,
            options,
            engine: CoercionEngine::new(options.constant_narrowing),
            class,
            return_type,
            scopes: ScopeStack::new(options.switch_redeclaration),
            switch_depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Check one method body
    #[tracing::instrument(level = "debug", skip_all, fields(method = %table.qualified_method_name(id)))]
    pub fn check_method(
        table: &'a ClassTable,
        options: &'a CheckerOptions,
        id: MethodId,
        decl: &MethodDecl,
    ) -> SemanticResult<(TypedMethod, Vec<CheckWarning>)> {
        let info = table.method(id);
        let mut checker = MethodChecker::new(table, options, info.owner, info.return_type);

        let body = checker.check_statements(&decl.body.statements)?;

        if !info.return_type.is_void() && super::stmt::list_completes_normally(&body) {
            return Err(SemanticError::MissingReturn {
                name: table.qualified_method_name(id),
                expected: info.return_type,
                span: decl.name.span,
            });
        }

        tracing::debug!(
            locals = checker.scopes.locals().len(),
            warnings = checker.warnings.len(),
            "method checked"
        );

        let warnings = std::mem::take(&mut checker.warnings);
        let method = TypedMethod {
            id,
            name: table.qualified_method_name(id),
            return_type: info.return_type,
            locals: checker.scopes.into_locals(),
            body,
            span: decl.span,
        };
        Ok((method, warnings))
    }

    /// Check a field's declared type and initializer in its owner's context
    pub fn check_field(
        table: &'a ClassTable,
        options: &'a CheckerOptions,
        id: FieldId,
        decl: &FieldDecl,
    ) -> SemanticResult<TypedField> {
        let info = table.field(id);
        if info.ty.is_void() {
            return Err(SemanticError::type_mismatch(
                "a numeric field type",
                Type::Void,
                decl.name.span,
            ));
        }

        let initializer = match &decl.initializer {
            Some(init) => {
                let mut checker = MethodChecker::new(table, options, info.owner, Type::Void);
                let value = checker.check_expr(init)?;
                Some(checker.coerce(value, info.ty)?)
            }
            None => None,
        };

        Ok(TypedField {
            id,
            name: table.qualified_field_name(id),
            ty: info.ty,
            initializer,
            span: decl.span,
        })
    }

    pub(super) fn resolver(&self) -> PathResolver<'a> {
        PathResolver::new(self.table)
    }

    pub(super) fn class_name(&self) -> String {
        self.table.qualified_name(self.class)
    }

    /// Record a warning, or fail if configuration denies it
    pub(super) fn warn(&mut self, warning: CheckWarning) -> SemanticResult<()> {
        let config = &self.options.warnings;
        let code = warning.code();
        if !config.is_enabled(code) {
            return Ok(());
        }
        if config.is_denied(code) {
            return Err(SemanticError::DeniedWarning { warning });
        }
        tracing::trace!(code = code.as_str(), "warning: {}", warning);
        self.warnings.push(warning);
        Ok(())
    }

    /// Coerce a value for storage into `target` (declarations, assignments,
    /// returns, field initializers)
    pub(super) fn coerce(&self, value: TypedExpr, target: Type) -> SemanticResult<TypedExpr> {
        let constant = super::consteval::const_value(&value);
        self.engine
            .assign(value.ty, target, constant)
            .map_err(|err| coercion_mismatch(err, value.span))?;
        Ok(value.convert_to(target))
    }
}

/// Map a coercion failure onto `TypeMismatch`
pub(super) fn coercion_mismatch(err: CoercionError, span: crate::frontend::span::Span) -> SemanticError {
    match err {
        CoercionError::VoidOperand => SemanticError::type_mismatch("a numeric value", Type::Void, span),
        CoercionError::Narrowing { from, to } => SemanticError::type_mismatch(to, from, span),
        CoercionError::NotIntegral { found } => {
            SemanticError::type_mismatch("an integral type", found, span)
        }
    }
}
