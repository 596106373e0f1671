//! Runtime faults of the reference evaluator

use crate::compiler::ir::{BasicBlockId, FunctionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VmError {
    /// Call depth or register file limit exceeded
    #[error("Stack overflow at call depth {depth}")]
    StackOverflow { depth: usize },

    /// Integral division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown function {0}")]
    UnknownFunction(FunctionId),

    #[error("Unknown block {block} in {function}")]
    UnknownBlock { function: String, block: BasicBlockId },

    #[error("Unknown field {0}")]
    UnknownField(u32),

    /// Control reached a block without a terminator
    #[error("Reached unreachable code in {function} at {block}")]
    Unreachable { function: String, block: BasicBlockId },

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Register index {index} out of bounds (top={top})")]
    RegisterOutOfBounds { index: usize, top: usize },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// VM execution result
pub type VmResult<T> = Result<T, VmError>;
