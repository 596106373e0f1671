//! Intermediate Representation (IR) for Quill
//!
//! Three-address code over basic blocks, produced by `compiler::lower` from
//! the typed tree.
//!
//! # Structure
//!
//! - `IrModule` - fields, functions, initializer and entry point
//! - `IrFunction` - locals, register count and basic blocks
//! - `BasicBlock` - instructions ending in a `Terminator`
//! - `IrInstr` - three-address code instructions
//! - `Register` - virtual registers with type information

pub mod block;
pub mod function;
pub mod instr;
pub mod module;
pub mod pretty;
pub mod value;

pub use block::{BasicBlock, BasicBlockId, Terminator};
pub use function::IrFunction;
pub use instr::{BinaryOp, FunctionId, IrInstr, UnaryOp};
pub use module::{IrField, IrModule};
pub use pretty::PrettyPrint;
pub use value::{IrLocal, IrValue, Register, RegisterId};
