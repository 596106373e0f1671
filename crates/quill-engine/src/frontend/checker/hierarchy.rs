//! Class hierarchy table
//!
//! The nominal tree of classes and their members, built once before any
//! method body is checked and read-only afterwards. Classes, fields and
//! methods live in arenas; a class knows its parent only to print qualified
//! names. Member lookup never walks to the parent or to nested classes.

use super::error::{SemanticError, SemanticResult};
use crate::frontend::ast::{ClassDecl, FieldDecl, MethodDecl, Program};
use crate::frontend::span::Span;
use crate::frontend::types::Type;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Class identifier (registration order, root is 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Field identifier, unique across the whole program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub u32);

/// Method identifier, unique across the whole program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FieldId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MethodId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: String,
    /// Enclosing class, for naming only
    pub parent: Option<ClassId>,
    pub nested: FxHashMap<String, ClassId>,
    pub fields: FxHashMap<String, FieldId>,
    pub methods: FxHashMap<String, MethodId>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub id: FieldId,
    pub name: String,
    pub ty: Type,
    pub owner: ClassId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub id: MethodId,
    pub name: String,
    pub return_type: Type,
    pub owner: ClassId,
    pub span: Span,
}

/// Every class of a program in registration order: the root, then nested
/// classes depth-first in declaration order
pub fn registration_order(program: &Program) -> Vec<&ClassDecl> {
    fn visit<'a>(class: &'a ClassDecl, out: &mut Vec<&'a ClassDecl>) {
        out.push(class);
        for nested in &class.nested {
            visit(nested, out);
        }
    }
    let mut out = Vec::with_capacity(program.class_count());
    visit(&program.root, &mut out);
    out
}

/// Read-only table of classes, fields and methods
#[derive(Debug, Clone)]
pub struct ClassTable {
    classes: Vec<ClassInfo>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
}

impl ClassTable {
    /// Build the table for a program
    ///
    /// Classes are registered first so that ids follow [`registration_order`];
    /// fields and methods follow, class by class in the same order.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %program.root.name.name))]
    pub fn build(program: &Program) -> SemanticResult<ClassTable> {
        let mut table = ClassTable {
            classes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        };

        table.register_class(&program.root, None)?;

        let order = registration_order(program);
        for (index, decl) in order.iter().enumerate() {
            let owner = ClassId(index as u32);
            for field in &decl.fields {
                table.register_field(owner, field)?;
            }
            for method in &decl.methods {
                table.register_method(owner, method)?;
            }
        }

        tracing::debug!(
            classes = table.classes.len(),
            fields = table.fields.len(),
            methods = table.methods.len(),
            "class table built"
        );
        Ok(table)
    }

    fn register_class(&mut self, decl: &ClassDecl, parent: Option<ClassId>) -> SemanticResult<ClassId> {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            id,
            name: decl.name.name.clone(),
            parent,
            nested: FxHashMap::default(),
            fields: FxHashMap::default(),
            methods: FxHashMap::default(),
            span: decl.name.span,
        });
        tracing::trace!(class = %decl.name.name, id = id.0, "register class");

        for nested in &decl.nested {
            if let Some(&existing) = self.classes[id.index()].nested.get(&nested.name.name) {
                return Err(SemanticError::DuplicateClass {
                    name: nested.name.name.clone(),
                    original: self.classes[existing.index()].span,
                    span: nested.name.span,
                });
            }
            let child = self.register_class(nested, Some(id))?;
            self.classes[id.index()]
                .nested
                .insert(nested.name.name.clone(), child);
        }
        Ok(id)
    }

    fn register_field(&mut self, owner: ClassId, decl: &FieldDecl) -> SemanticResult<()> {
        let class = &self.classes[owner.index()];
        if let Some(&existing) = class.fields.get(&decl.name.name) {
            return Err(SemanticError::DuplicateMember {
                class: class.name.clone(),
                name: decl.name.name.clone(),
                original: self.fields[existing.index()].span,
                span: decl.name.span,
            });
        }
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(FieldInfo {
            id,
            name: decl.name.name.clone(),
            ty: decl.ty,
            owner,
            span: decl.name.span,
        });
        self.classes[owner.index()]
            .fields
            .insert(decl.name.name.clone(), id);
        Ok(())
    }

    fn register_method(&mut self, owner: ClassId, decl: &MethodDecl) -> SemanticResult<()> {
        let class = &self.classes[owner.index()];
        if let Some(&existing) = class.methods.get(&decl.name.name) {
            return Err(SemanticError::DuplicateMember {
                class: class.name.clone(),
                name: decl.name.name.clone(),
                original: self.methods[existing.index()].span,
                span: decl.name.span,
            });
        }
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodInfo {
            id,
            name: decl.name.name.clone(),
            return_type: decl.return_type,
            owner,
            span: decl.name.span,
        });
        self.classes[owner.index()]
            .methods
            .insert(decl.name.name.clone(), id);
        Ok(())
    }

    pub fn root(&self) -> ClassId {
        ClassId(0)
    }

    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldInfo {
        &self.fields[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodInfo {
        &self.methods[id.index()]
    }

    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Resolve a fully qualified class name given as segments, e.g.
    /// `["Main", "A", "B"]`
    pub fn lookup_class(&self, segments: &[&str]) -> Option<ClassId> {
        let (first, rest) = segments.split_first()?;
        let root = self.root();
        if self.class(root).name != *first {
            return None;
        }
        rest.iter()
            .try_fold(root, |class, name| self.nested(class, name))
    }

    /// Nested class declared directly inside `class`
    pub fn nested(&self, class: ClassId, name: &str) -> Option<ClassId> {
        self.class(class).nested.get(name).copied()
    }

    /// Field declared directly on `class`
    pub fn lookup_field(&self, class: ClassId, name: &str) -> Option<&FieldInfo> {
        let id = self.class(class).fields.get(name)?;
        Some(self.field(*id))
    }

    /// Method declared directly on `class`
    pub fn lookup_method(&self, class: ClassId, name: &str) -> Option<&MethodInfo> {
        let id = self.class(class).methods.get(name)?;
        Some(self.method(*id))
    }

    /// Dotted name from the root, e.g. `Main.A.B`
    pub fn qualified_name(&self, class: ClassId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(class);
        while let Some(id) = current {
            let info = self.class(id);
            parts.push(info.name.as_str());
            current = info.parent;
        }
        parts.reverse();
        parts.join(".")
    }

    /// `Main.A.foo`
    pub fn qualified_method_name(&self, method: MethodId) -> String {
        let info = self.method(method);
        format!("{}.{}", self.qualified_name(info.owner), info.name)
    }

    /// `Main.Foo.bar`
    pub fn qualified_field_name(&self, field: FieldId) -> String {
        let info = self.field(field);
        format!("{}.{}", self.qualified_name(info.owner), info.name)
    }
}
