//! Operator typing and implicit numeric coercions
//!
//! Implements the promotion order `short < int < long < double`, the result
//! types of unary/binary/logical operators, and the assignability relation
//! `T ~> U` used by declarations, assignments and returns.

use super::scalar::Scalar;
use super::ty::Type;
use crate::frontend::ast::{BinaryOperator, UnaryOperator};
use thiserror::Error;

/// Why an operator or assignment was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("a void value cannot be used here")]
    VoidOperand,

    #[error("cannot convert {from} to {to} without loss")]
    Narrowing { from: Type, to: Type },

    #[error("operator requires an integral operand, found {found}")]
    NotIntegral { found: Type },
}

/// How a source value reaches the target type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionKind {
    /// Same type, no conversion
    Identity,
    /// Lossless promotion to a higher rank
    Widen,
    /// Integral constant that fits the narrower integral target
    ConstantNarrow,
}

impl CoercionKind {
    pub fn needs_conversion(self) -> bool {
        self != CoercionKind::Identity
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoercionKind::Identity => "identity",
            CoercionKind::Widen => "widen",
            CoercionKind::ConstantNarrow => "constant_narrow",
        }
    }
}

/// Operand and result types of a binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryTyping {
    /// Common type both operands are promoted to
    pub operand: Type,
    /// Type of the operator's value
    pub result: Type,
}

/// Typing rules, parameterized by whether constant narrowing is allowed
#[derive(Debug, Clone, Copy)]
pub struct CoercionEngine {
    constant_narrowing: bool,
}

impl Default for CoercionEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CoercionEngine {
    pub fn new(constant_narrowing: bool) -> Self {
        Self { constant_narrowing }
    }

    /// Result type of `left op right`
    ///
    /// Arithmetic yields the higher-ranked operand type; comparisons yield
    /// `short` after promoting both sides to their common type.
    pub fn result_type(
        &self,
        op: BinaryOperator,
        left: Type,
        right: Type,
    ) -> Result<BinaryTyping, CoercionError> {
        let operand = left.promote(right).ok_or(CoercionError::VoidOperand)?;
        let result = if op.is_comparison() {
            Type::BOOLEAN
        } else {
            operand
        };
        Ok(BinaryTyping { operand, result })
    }

    /// `&&`, `||`: any numeric operands, `short` result
    pub fn logical_type(&self, left: Type, right: Type) -> Result<Type, CoercionError> {
        require_value(left)?;
        require_value(right)?;
        Ok(Type::BOOLEAN)
    }

    /// `+x` and `-x` keep the operand type; `!x` yields `short`
    pub fn unary_type(&self, op: UnaryOperator, operand: Type) -> Result<Type, CoercionError> {
        require_value(operand)?;
        Ok(match op {
            UnaryOperator::Plus | UnaryOperator::Minus => operand,
            UnaryOperator::Not => Type::BOOLEAN,
        })
    }

    /// `++`/`--` only apply to integral storage and keep its type
    pub fn update_type(&self, target: Type) -> Result<Type, CoercionError> {
        require_value(target)?;
        if target.is_integral() {
            Ok(target)
        } else {
            Err(CoercionError::NotIntegral { found: target })
        }
    }

    /// Check that a value of `source` can be stored into `target`
    ///
    /// `constant` is the compile-time value of the source expression, if it
    /// has one; it lets `short s = 1;` through even though `1` is an `int`.
    pub fn assign(
        &self,
        source: Type,
        target: Type,
        constant: Option<Scalar>,
    ) -> Result<CoercionKind, CoercionError> {
        require_value(source)?;
        require_value(target)?;

        if source == target {
            return Ok(CoercionKind::Identity);
        }
        if source.widens_to(target) {
            return Ok(CoercionKind::Widen);
        }
        if self.constant_narrowing && source.is_integral() && target.is_integral() {
            if let Some(value) = constant {
                if value.fits(target) {
                    return Ok(CoercionKind::ConstantNarrow);
                }
            }
        }
        Err(CoercionError::Narrowing {
            from: source,
            to: target,
        })
    }

    /// Type of an integer literal: `int` when it fits 32 bits, else `long`
    pub fn int_literal_type(value: i64, long_suffix: bool) -> Type {
        if !long_suffix && Scalar::Long(value).fits(Type::Int) {
            Type::Int
        } else {
            Type::Long
        }
    }
}

/// Reject `void` where a value is needed
pub fn require_value(ty: Type) -> Result<Type, CoercionError> {
    if ty.is_void() {
        Err(CoercionError::VoidOperand)
    } else {
        Ok(ty)
    }
}
