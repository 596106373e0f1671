//! Typed numeric values and their arithmetic
//!
//! `Scalar` is shared by constant evaluation, IR constants and the reference
//! evaluator so that all three agree on wrapping, truncating division and the
//! 0/1 results of comparisons.

use super::ty::Type;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Binary operators that act on two operands of one numeric type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators that act on a value (`+x` is the identity and has none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("-"),
            UnaryOp::Not => f.write_str("!"),
        }
    }
}

/// Failures of scalar arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("integral division by zero")]
    DivisionByZero,

    #[error("operands have different types: {left} and {right}")]
    OperandMismatch { left: Type, right: Type },
}

/// Wrapping integral arithmetic; `/` and `%` truncate toward zero
macro_rules! integral_op {
    ($op:expr, $a:expr, $b:expr) => {
        match $op {
            BinaryOp::Add => Ok($a.wrapping_add($b)),
            BinaryOp::Sub => Ok($a.wrapping_sub($b)),
            BinaryOp::Mul => Ok($a.wrapping_mul($b)),
            BinaryOp::Div if $b == 0 => Err(ArithError::DivisionByZero),
            BinaryOp::Div => Ok($a.wrapping_div($b)),
            BinaryOp::Rem if $b == 0 => Err(ArithError::DivisionByZero),
            BinaryOp::Rem => Ok($a.wrapping_rem($b)),
            _ => unreachable!("arithmetic operator"),
        }
    };
}

/// A numeric value tagged with its type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Short(i16),
    Int(i32),
    Long(i64),
    Double(f64),
}

impl Scalar {
    /// The `short` 0/1 value standing in for a boolean
    pub fn boolean(value: bool) -> Self {
        Scalar::Short(value as i16)
    }

    /// The zero value of a numeric type (`None` for `void`)
    pub fn zero(ty: Type) -> Option<Self> {
        match ty {
            Type::Short => Some(Scalar::Short(0)),
            Type::Int => Some(Scalar::Int(0)),
            Type::Long => Some(Scalar::Long(0)),
            Type::Double => Some(Scalar::Double(0.0)),
            Type::Void => None,
        }
    }

    /// Build an integral scalar, wrapping `value` to the width of `ty`
    pub fn integral(ty: Type, value: i64) -> Option<Self> {
        match ty {
            Type::Short => Some(Scalar::Short(value as i16)),
            Type::Int => Some(Scalar::Int(value as i32)),
            Type::Long => Some(Scalar::Long(value)),
            Type::Double | Type::Void => None,
        }
    }

    pub fn ty(self) -> Type {
        match self {
            Scalar::Short(_) => Type::Short,
            Scalar::Int(_) => Type::Int,
            Scalar::Long(_) => Type::Long,
            Scalar::Double(_) => Type::Double,
        }
    }

    /// Integral payload widened to i64
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Scalar::Short(v) => Some(v as i64),
            Scalar::Int(v) => Some(v as i64),
            Scalar::Long(v) => Some(v),
            Scalar::Double(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Short(v) => v as f64,
            Scalar::Int(v) => v as f64,
            Scalar::Long(v) => v as f64,
            Scalar::Double(v) => v,
        }
    }

    /// Zero is false, everything else is true
    pub fn is_truthy(self) -> bool {
        match self {
            Scalar::Double(v) => v != 0.0,
            other => other.as_i64() != Some(0),
        }
    }

    /// True if this integral value is representable in the integral type `ty`
    pub fn fits(self, ty: Type) -> bool {
        match (self.as_i64(), ty.integral_range()) {
            (Some(v), Some((lo, hi))) => lo <= v && v <= hi,
            _ => false,
        }
    }

    /// Convert to another numeric type
    ///
    /// Integral targets wrap; double to integral truncates toward zero.
    pub fn convert(self, to: Type) -> Option<Scalar> {
        match to {
            Type::Double => Some(Scalar::Double(self.as_f64())),
            Type::Void => None,
            integral => {
                let v = match self {
                    Scalar::Double(d) => d as i64,
                    other => other.as_i64()?,
                };
                Scalar::integral(integral, v)
            }
        }
    }

    pub fn negate(self) -> Scalar {
        match self {
            Scalar::Short(v) => Scalar::Short(v.wrapping_neg()),
            Scalar::Int(v) => Scalar::Int(v.wrapping_neg()),
            Scalar::Long(v) => Scalar::Long(v.wrapping_neg()),
            Scalar::Double(v) => Scalar::Double(-v),
        }
    }

    pub fn logical_not(self) -> Scalar {
        Scalar::boolean(!self.is_truthy())
    }

    pub fn unary(self, op: UnaryOp) -> Scalar {
        match op {
            UnaryOp::Neg => self.negate(),
            UnaryOp::Not => self.logical_not(),
        }
    }

    /// Add `delta` keeping the type (used by `++`/`--`)
    pub fn step(self, delta: i64) -> Scalar {
        match self {
            Scalar::Short(v) => Scalar::Short(v.wrapping_add(delta as i16)),
            Scalar::Int(v) => Scalar::Int(v.wrapping_add(delta as i32)),
            Scalar::Long(v) => Scalar::Long(v.wrapping_add(delta)),
            Scalar::Double(v) => Scalar::Double(v + delta as f64),
        }
    }

    /// Apply a binary operator to two operands of the same type
    ///
    /// Arithmetic keeps the operand type; comparisons yield `short` 0/1.
    pub fn apply(self, op: BinaryOp, rhs: Scalar) -> Result<Scalar, ArithError> {
        if self.ty() != rhs.ty() {
            return Err(ArithError::OperandMismatch {
                left: self.ty(),
                right: rhs.ty(),
            });
        }

        if op.is_comparison() {
            let ordering = match (self, rhs) {
                (Scalar::Double(a), Scalar::Double(b)) => a.partial_cmp(&b),
                (a, b) => a.as_i64().zip(b.as_i64()).map(|(a, b)| a.cmp(&b)),
            };
            let result = match (op, ordering) {
                (BinaryOp::Ne, None) => true,
                (_, None) => false,
                (BinaryOp::Eq, Some(o)) => o.is_eq(),
                (BinaryOp::Ne, Some(o)) => o.is_ne(),
                (BinaryOp::Lt, Some(o)) => o.is_lt(),
                (BinaryOp::Le, Some(o)) => o.is_le(),
                (BinaryOp::Gt, Some(o)) => o.is_gt(),
                (BinaryOp::Ge, Some(o)) => o.is_ge(),
                _ => unreachable!("comparison operator"),
            };
            return Ok(Scalar::boolean(result));
        }

        match (self, rhs) {
            (Scalar::Double(a), Scalar::Double(b)) => Ok(Scalar::Double(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Rem => a % b,
                _ => unreachable!("arithmetic operator"),
            })),
            (Scalar::Short(a), Scalar::Short(b)) => {
                integral_op!(op, a, b).map(Scalar::Short)
            }
            (Scalar::Int(a), Scalar::Int(b)) => integral_op!(op, a, b).map(Scalar::Int),
            (Scalar::Long(a), Scalar::Long(b)) => integral_op!(op, a, b).map(Scalar::Long),
            (l, r) => Err(ArithError::OperandMismatch {
                left: l.ty(),
                right: r.ty(),
            }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Short(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Long(v) => write!(f, "{}", v),
            Scalar::Double(v) => write_double(f, *v),
        }
    }
}

/// Shortest round-trip digits without an exponent, always with a fractional
/// part: `1.0`, `2.5`, `100000000000000000.0`. Non-finite values print as
/// `Infinity`, `-Infinity` and `NaN`.
fn write_double(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let digits = v.to_string();
    if digits.contains('.') {
        f.write_str(&digits)
    } else {
        write!(f, "{}.0", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i32) -> Scalar {
        Scalar::Int(v)
    }

    #[test]
    fn test_integer_division_truncates_toward_zero() {
        assert_eq!(int(5).apply(BinaryOp::Div, int(2)), Ok(int(2)));
        assert_eq!(int(5).apply(BinaryOp::Div, int(-2)), Ok(int(-2)));
        assert_eq!(int(-5).apply(BinaryOp::Div, int(2)), Ok(int(-2)));
        assert_eq!(int(-5).apply(BinaryOp::Div, int(-2)), Ok(int(2)));
    }

    #[test]
    fn test_float_division() {
        let result = Scalar::Double(5.0).apply(BinaryOp::Div, Scalar::Double(2.0));
        assert_eq!(result, Ok(Scalar::Double(2.5)));
        assert_eq!(format!("{}", result.unwrap()), "2.5");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            int(1).apply(BinaryOp::Div, int(0)),
            Err(ArithError::DivisionByZero)
        );
        assert_eq!(
            Scalar::Long(1).apply(BinaryOp::Rem, Scalar::Long(0)),
            Err(ArithError::DivisionByZero)
        );
    }

    #[test]
    fn test_comparisons_yield_short() {
        let one = Scalar::Double(1.0);
        let zero = Scalar::Double(0.0);
        assert_eq!(one.apply(BinaryOp::Gt, zero), Ok(Scalar::Short(1)));
        assert_eq!(int(1).apply(BinaryOp::Gt, int(1)), Ok(Scalar::Short(0)));
        assert_eq!(int(1).apply(BinaryOp::Le, int(2)), Ok(Scalar::Short(1)));
        assert_eq!(int(0).apply(BinaryOp::Ne, int(1)), Ok(Scalar::Short(1)));
    }

    #[test]
    fn test_remainder_sign_follows_dividend() {
        assert_eq!(int(-7).apply(BinaryOp::Rem, int(2)), Ok(int(-1)));
        assert_eq!(int(7).apply(BinaryOp::Rem, int(-2)), Ok(int(1)));
    }

    #[test]
    fn test_wrapping_at_type_width() {
        let max = Scalar::Short(i16::MAX);
        assert_eq!(
            max.apply(BinaryOp::Add, Scalar::Short(1)),
            Ok(Scalar::Short(i16::MIN))
        );
        assert_eq!(Scalar::Short(i16::MAX).step(1), Scalar::Short(i16::MIN));
    }

    #[test]
    fn test_mismatched_operands() {
        assert!(matches!(
            int(1).apply(BinaryOp::Add, Scalar::Long(1)),
            Err(ArithError::OperandMismatch { .. })
        ));
    }

    #[test]
    fn test_truthiness_and_not() {
        assert_eq!(int(10).logical_not(), Scalar::Short(0));
        assert_eq!(int(-5).logical_not(), Scalar::Short(0));
        assert_eq!(int(0).logical_not(), Scalar::Short(1));
        assert!(Scalar::Double(0.5).is_truthy());
    }

    #[test]
    fn test_convert_and_fits() {
        assert_eq!(int(10).convert(Type::Double), Some(Scalar::Double(10.0)));
        assert_eq!(Scalar::Short(3).convert(Type::Long), Some(Scalar::Long(3)));
        assert!(int(25).fits(Type::Short));
        assert!(!int(40000).fits(Type::Short));
        assert!(!Scalar::Double(1.0).fits(Type::Int));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Scalar::Double(1.0)), "1.0");
        assert_eq!(format!("{}", Scalar::Double(-1.0)), "-1.0");
        assert_eq!(format!("{}", Scalar::Long(252525353213)), "252525353213");
        assert_eq!(format!("{}", Scalar::Short(-15)), "-15");
    }

    #[test]
    fn test_display_double_never_uses_exponent() {
        assert_eq!(format!("{}", Scalar::Double(1e17)), "100000000000000000.0");
        assert_eq!(format!("{}", Scalar::Double(1e-7)), "0.0000001");
        assert_eq!(format!("{}", Scalar::Double(-0.0)), "-0.0");
        assert_eq!(format!("{}", Scalar::Double(0.1 + 0.2)), "0.30000000000000004");
        assert_eq!(format!("{}", Scalar::Double(f64::INFINITY)), "Infinity");
        assert_eq!(format!("{}", Scalar::Double(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(format!("{}", Scalar::Double(f64::NAN)), "NaN");
    }
}
