//! Compile-time constant evaluation
//!
//! Folds literal arithmetic on the typed tree. Used for case labels and for
//! narrowing an integral constant into a smaller integral type.

use super::typed::{ExprKind, TypedExpr};
use crate::frontend::ast::LogicalOperator;
use crate::frontend::types::Scalar;

/// The value of `expr` if it depends only on literals
///
/// Division by zero is not a constant; it is left for the runtime to report.
pub fn const_value(expr: &TypedExpr) -> Option<Scalar> {
    match &expr.kind {
        ExprKind::Const(value) => Some(*value),
        ExprKind::Convert(inner) => const_value(inner)?.convert(expr.ty),
        ExprKind::Unary { op, operand } => Some(const_value(operand)?.unary(*op)),
        ExprKind::Binary { op, left, right } => {
            let left = const_value(left)?;
            let right = const_value(right)?;
            left.apply(*op, right).ok()
        }
        ExprKind::Logical { op, left, right } => {
            let left = const_value(left)?.is_truthy();
            let right = const_value(right)?.is_truthy();
            Some(Scalar::boolean(match op {
                LogicalOperator::And => left && right,
                LogicalOperator::Or => left || right,
            }))
        }
        ExprKind::Local(_)
        | ExprKind::Field(_)
        | ExprKind::Update { .. }
        | ExprKind::Assign { .. }
        | ExprKind::Call(_)
        | ExprKind::Println(_) => None,
    }
}

/// Integral constant value, for case labels
pub fn const_integral(expr: &TypedExpr) -> Option<i64> {
    if !expr.ty.is_integral() {
        return None;
    }
    const_value(expr)?.as_i64()
}
