//! Primitive types of the language
//!
//! The language has exactly four value types plus `void`. Booleans do not
//! exist: comparison and logical operators produce `short` 0 or 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared or inferred type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 64-bit IEEE float
    Double,
    /// Absence of a value (method return type only)
    Void,
}

impl Type {
    /// The type comparison and logical operators produce
    pub const BOOLEAN: Type = Type::Short;

    /// All value types in promotion order
    pub const NUMERIC: [Type; 4] = [Type::Short, Type::Int, Type::Long, Type::Double];

    /// Promotion rank: `short < int < long < double`; `void` has none
    pub fn rank(self) -> Option<u8> {
        match self {
            Type::Short => Some(0),
            Type::Int => Some(1),
            Type::Long => Some(2),
            Type::Double => Some(3),
            Type::Void => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.rank().is_some()
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Type::Short | Type::Int | Type::Long)
    }

    pub fn is_void(self) -> bool {
        self == Type::Void
    }

    /// True if a value of `self` converts to `target` without loss of range
    pub fn widens_to(self, target: Type) -> bool {
        match (self.rank(), target.rank()) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }

    /// The higher-ranked of two numeric types
    pub fn promote(self, other: Type) -> Option<Type> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(if a >= b { self } else { other }),
            _ => None,
        }
    }

    /// Inclusive value range of an integral type
    pub fn integral_range(self) -> Option<(i64, i64)> {
        match self {
            Type::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            Type::Int => Some((i32::MIN as i64, i32::MAX as i64)),
            Type::Long => Some((i64::MIN, i64::MAX)),
            Type::Double | Type::Void => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Type::Short => "short",
            Type::Int => "int",
            Type::Long => "long",
            Type::Double => "double",
            Type::Void => "void",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
