//! Typed tree produced by the checker
//!
//! Every expression carries its resolved type and every name its binding
//! (local slot, field id or method id), so lowering performs no further
//! name or type resolution. Implicit conversions are explicit `Convert`
//! nodes.

use super::hierarchy::{FieldId, MethodId};
use super::symbols::{LocalInfo, LocalSlot};
use crate::frontend::ast::LogicalOperator;
use crate::frontend::span::Span;
use crate::frontend::types::{BinaryOp, Scalar, Type, UnaryOp};

/// A checked compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct TypedProgram {
    /// Root class name
    pub name: String,
    /// All fields in registration order, indexed by `FieldId`
    pub fields: Vec<TypedField>,
    /// All methods in registration order, indexed by `MethodId`
    pub methods: Vec<TypedMethod>,
    pub entry: MethodId,
}

impl TypedProgram {
    pub fn method(&self, id: MethodId) -> &TypedMethod {
        &self.methods[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &TypedField {
        &self.fields[id.index()]
    }

    pub fn method_by_name(&self, qualified: &str) -> Option<&TypedMethod> {
        self.methods.iter().find(|m| m.name == qualified)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedField {
    pub id: FieldId,
    /// Qualified name, e.g. `Main.Foo.bar`
    pub name: String,
    pub ty: Type,
    /// Already coerced to `ty`
    pub initializer: Option<TypedExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedMethod {
    pub id: MethodId,
    /// Qualified name, e.g. `Main.A.foo`
    pub name: String,
    pub return_type: Type,
    /// Local storage indexed by `LocalSlot`
    pub locals: Vec<LocalInfo>,
    pub body: Vec<TypedStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmt {
    Block(Vec<TypedStmt>),
    /// Local declaration; no initializer means zero
    Declare {
        slot: LocalSlot,
        init: Option<TypedExpr>,
    },
    Expr(TypedExpr),
    Switch(TypedSwitch),
    /// Leaves the innermost switch
    Break,
    Return(Option<TypedExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedSwitch {
    /// Evaluated once, already converted to `compare_type`
    pub scrutinee: TypedExpr,
    /// Common integral type of the scrutinee and all labels
    pub compare_type: Type,
    /// In declaration order
    pub cases: Vec<TypedCase>,
}

impl TypedSwitch {
    pub fn default_index(&self) -> Option<usize> {
        self.cases.iter().position(|c| c.label.is_none())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedCase {
    /// `None` for `default`
    pub label: Option<i64>,
    pub body: Vec<TypedStmt>,
}

/// Storage an assignment or update writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Local(LocalSlot),
    Field(FieldId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: ExprKind,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Const(Scalar),
    Local(LocalSlot),
    Field(FieldId),
    /// Numeric conversion of the operand to this node's type
    Convert(Box<TypedExpr>),
    Unary {
        op: UnaryOp,
        operand: Box<TypedExpr>,
    },
    /// Both operands already converted to a common type
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    /// Short-circuit `&&`/`||` yielding `short` 0/1
    Logical {
        op: LogicalOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    /// `++`/`--`; prefix yields the new value, postfix the old one
    Update {
        place: Place,
        delta: i64,
        prefix: bool,
    },
    /// Value already converted to the place's type
    Assign {
        place: Place,
        value: Box<TypedExpr>,
    },
    Call(MethodId),
    /// Runtime intrinsic
    Println(Option<Box<TypedExpr>>),
}

impl TypedExpr {
    pub fn new(kind: ExprKind, ty: Type, span: Span) -> Self {
        Self { kind, ty, span }
    }

    pub fn constant(value: Scalar, span: Span) -> Self {
        Self::new(ExprKind::Const(value), value.ty(), span)
    }

    /// Wrap in a conversion unless already of type `to`
    pub fn convert_to(self, to: Type) -> Self {
        if self.ty == to {
            return self;
        }
        let span = self.span;
        TypedExpr::new(ExprKind::Convert(Box::new(self)), to, span)
    }
}
