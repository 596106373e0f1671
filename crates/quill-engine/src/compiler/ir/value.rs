//! IR Values and Registers
//!
//! Defines the value types used in IR instructions.

use crate::frontend::types::{Scalar, Type};

/// Virtual register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u32);

impl RegisterId {
    /// Create a new register ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RegisterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Register with type information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub id: RegisterId,
    pub ty: Type,
}

impl Register {
    /// Create a new register
    pub fn new(id: RegisterId, ty: Type) -> Self {
        Self { id, ty }
    }

    pub fn index(&self) -> usize {
        self.id.0 as usize
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.ty)
    }
}

/// IR values (right-hand side of assignments)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrValue {
    /// A register reference
    Register(Register),
    /// A constant value
    Constant(Scalar),
}

impl IrValue {
    pub fn ty(&self) -> Type {
        match self {
            IrValue::Register(reg) => reg.ty,
            IrValue::Constant(c) => c.ty(),
        }
    }
}

impl std::fmt::Display for IrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrValue::Register(reg) => write!(f, "{}", reg),
            IrValue::Constant(c) => write!(f, "{}{}", c, suffix(c.ty())),
        }
    }
}

fn suffix(ty: Type) -> &'static str {
    match ty {
        Type::Short => "s",
        Type::Long => "L",
        _ => "",
    }
}

/// A local variable slot of an IR function
#[derive(Debug, Clone, PartialEq)]
pub struct IrLocal {
    /// Source name; `None` for compiler temporaries
    pub name: Option<String>,
    pub ty: Type,
}

impl IrLocal {
    pub fn named(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn anonymous(ty: Type) -> Self {
        Self { name: None, ty }
    }
}
