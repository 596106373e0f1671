//! Qualified path resolution
//!
//! A path such as `Main.A.B.foo` must start at the root class, step through
//! nested classes one declaration level at a time, and end in a member
//! declared on exactly the last class reached. There is no fallback search
//! through enclosing or nested classes.

use super::error::{MemberKind, SemanticError, SemanticResult};
use super::hierarchy::{ClassId, ClassTable, FieldId, MethodId};
use crate::frontend::ast::PathExpression;

/// Resolves dotted paths against a [`ClassTable`]
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    table: &'a ClassTable,
}

impl<'a> PathResolver<'a> {
    pub fn new(table: &'a ClassTable) -> Self {
        Self { table }
    }

    /// Resolve every segment but the last to a class
    pub fn resolve_owner(&self, path: &PathExpression) -> SemanticResult<ClassId> {
        let unresolved = |reason: String| SemanticError::UnresolvedQualifiedAccess {
            path: path.dotted(),
            reason,
            span: path.span,
        };

        let Some((_, classes)) = path.segments.split_last() else {
            return Err(unresolved("empty path".to_string()));
        };
        let Some((first, nested)) = classes.split_first() else {
            return Err(unresolved(
                "a qualified path needs a class and a member".to_string(),
            ));
        };

        let root = self.table.root();
        let root_name = &self.table.class(root).name;
        if first.name != *root_name {
            return Err(unresolved(format!(
                "qualified access must start at the root class '{}'",
                root_name
            )));
        }

        let mut current = root;
        for segment in nested {
            current = self.table.nested(current, &segment.name).ok_or_else(|| {
                unresolved(format!(
                    "'{}' has no nested class '{}'",
                    self.table.qualified_name(current),
                    segment.name
                ))
            })?;
        }

        tracing::trace!(path = %path.dotted(), owner = %self.table.qualified_name(current), "resolved owner");
        Ok(current)
    }

    /// Resolve a path in value or assignment position to a field
    pub fn resolve_field(&self, path: &PathExpression) -> SemanticResult<FieldId> {
        let owner = self.resolve_owner(path)?;
        let member = self.member_name(path)?;
        self.table
            .lookup_field(owner, member)
            .map(|field| field.id)
            .ok_or_else(|| self.member_not_found(owner, member, MemberKind::Field, path))
    }

    /// Resolve a path in call position to a method
    pub fn resolve_method(&self, path: &PathExpression) -> SemanticResult<MethodId> {
        let owner = self.resolve_owner(path)?;
        let member = self.member_name(path)?;
        self.table
            .lookup_method(owner, member)
            .map(|method| method.id)
            .ok_or_else(|| self.member_not_found(owner, member, MemberKind::Method, path))
    }

    fn member_name<'p>(&self, path: &'p PathExpression) -> SemanticResult<&'p str> {
        path.segments
            .last()
            .map(|segment| segment.name.as_str())
            .ok_or_else(|| SemanticError::UnresolvedQualifiedAccess {
                path: path.dotted(),
                reason: "empty path".to_string(),
                span: path.span,
            })
    }

    fn member_not_found(
        &self,
        owner: ClassId,
        name: &str,
        kind: MemberKind,
        path: &PathExpression,
    ) -> SemanticError {
        let span = path
            .segments
            .last()
            .map(|segment| segment.span)
            .unwrap_or(path.span);
        SemanticError::MemberNotFound {
            class: self.table.qualified_name(owner),
            name: name.to_string(),
            kind,
            span,
        }
    }
}
