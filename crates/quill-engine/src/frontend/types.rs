//! Numeric types, values and coercion rules

pub mod coercion;
pub mod scalar;
pub mod ty;

pub use coercion::{require_value, BinaryTyping, CoercionEngine, CoercionError, CoercionKind};
pub use scalar::{ArithError, BinaryOp, Scalar, UnaryOp};
pub use ty::Type;
