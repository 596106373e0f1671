//! IR Instructions
//!
//! Three-address code instructions for the IR. Operators are shared with the
//! front end so the checker, constant folding and the evaluator agree on
//! their semantics.

use super::value::{IrValue, Register};
pub use crate::frontend::types::{BinaryOp, UnaryOp};

/// Function identifier in the IR
///
/// Methods keep their checker `MethodId` index; the field initializer comes
/// after the last method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

impl FunctionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn{}", self.0)
    }
}

/// IR instruction (Three-Address Code)
#[derive(Debug, Clone, PartialEq)]
pub enum IrInstr {
    /// Assignment: dest = value
    Assign { dest: Register, value: IrValue },

    /// Binary operation on operands of one type: dest = left op right
    BinaryOp {
        dest: Register,
        op: BinaryOp,
        left: Register,
        right: Register,
    },

    /// Unary operation: dest = op operand
    UnaryOp {
        dest: Register,
        op: UnaryOp,
        operand: Register,
    },

    /// Numeric conversion to the destination register's type
    Convert { dest: Register, operand: Register },

    /// Load from local variable: dest = locals[index]
    LoadLocal { dest: Register, index: u32 },

    /// Store to local variable: locals[index] = value
    StoreLocal { index: u32, value: Register },

    /// Load class field: dest = fields[field]
    LoadField { dest: Register, field: u32 },

    /// Store class field: fields[field] = value
    StoreField { field: u32, value: Register },

    /// Call with a fresh frame: dest = func()
    Call {
        dest: Option<Register>,
        func: FunctionId,
    },

    /// Runtime print intrinsic; no value prints an empty line
    Println { value: Option<Register> },
}

impl IrInstr {
    /// The register this instruction writes, if any
    pub fn dest(&self) -> Option<&Register> {
        match self {
            IrInstr::Assign { dest, .. }
            | IrInstr::BinaryOp { dest, .. }
            | IrInstr::UnaryOp { dest, .. }
            | IrInstr::Convert { dest, .. }
            | IrInstr::LoadLocal { dest, .. }
            | IrInstr::LoadField { dest, .. } => Some(dest),
            IrInstr::Call { dest, .. } => dest.as_ref(),
            IrInstr::StoreLocal { .. } | IrInstr::StoreField { .. } | IrInstr::Println { .. } => None,
        }
    }

    /// True if the instruction has an effect beyond its destination register
    pub fn has_side_effects(&self) -> bool {
        matches!(
            self,
            IrInstr::StoreLocal { .. }
                | IrInstr::StoreField { .. }
                | IrInstr::Call { .. }
                | IrInstr::Println { .. }
        )
    }
}
