//! Expression lowering

use super::Lowerer;
use crate::compiler::error::{CompileError, CompileResult};
use crate::compiler::ir::{BinaryOp, FunctionId, IrInstr, Register, Terminator};
use crate::frontend::ast::LogicalOperator;
use crate::frontend::checker::{ExprKind, Place, TypedExpr};
use crate::frontend::types::{Scalar, Type};

impl<'a> Lowerer<'a> {
    /// Lower an expression that must produce a value
    pub(super) fn lower_value(&mut self, expr: &TypedExpr) -> CompileResult<Register> {
        self.lower_expr(expr)?
            .ok_or_else(|| CompileError::internal("void expression used as a value", expr.span))
    }

    /// Lower an expression; `None` for void calls and `println`
    pub(super) fn lower_expr(&mut self, expr: &TypedExpr) -> CompileResult<Option<Register>> {
        let reg = match &expr.kind {
            ExprKind::Const(value) => self.emit_constant(*value),

            ExprKind::Local(slot) => self.load_place(Place::Local(*slot), expr.ty),

            ExprKind::Field(field) => self.load_place(Place::Field(*field), expr.ty),

            ExprKind::Convert(operand) => {
                let value = self.lower_value(operand)?;
                if value.ty == expr.ty {
                    value
                } else {
                    let dest = self.alloc_register(expr.ty);
                    self.emit(IrInstr::Convert {
                        dest,
                        operand: value,
                    });
                    dest
                }
            }

            ExprKind::Unary { op, operand } => {
                let operand = self.lower_value(operand)?;
                let dest = self.alloc_register(expr.ty);
                self.emit(IrInstr::UnaryOp {
                    dest,
                    op: *op,
                    operand,
                });
                dest
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.lower_value(left)?;
                let right = self.lower_value(right)?;
                let dest = self.alloc_register(expr.ty);
                self.emit(IrInstr::BinaryOp {
                    dest,
                    op: *op,
                    left,
                    right,
                });
                dest
            }

            ExprKind::Logical { op, left, right } => self.lower_logical(*op, left, right)?,

            ExprKind::Update {
                place,
                delta,
                prefix,
            } => {
                let old = self.load_place(*place, expr.ty);
                let step = Scalar::integral(expr.ty, *delta).ok_or_else(|| {
                    CompileError::internal(format!("update of non-integral {}", expr.ty), expr.span)
                })?;
                let step = self.emit_constant(step);
                let new = self.alloc_register(expr.ty);
                self.emit(IrInstr::BinaryOp {
                    dest: new,
                    op: BinaryOp::Add,
                    left: old,
                    right: step,
                });
                self.store_place(*place, new);
                if *prefix {
                    new
                } else {
                    old
                }
            }

            ExprKind::Assign { place, value } => {
                let value = self.lower_value(value)?;
                self.store_place(*place, value);
                value
            }

            ExprKind::Call(method) => {
                let callee = self.program.method(*method);
                let dest = if callee.return_type.is_void() {
                    None
                } else {
                    Some(self.alloc_register(callee.return_type))
                };
                self.emit(IrInstr::Call {
                    dest,
                    func: FunctionId(method.0),
                });
                return Ok(dest);
            }

            ExprKind::Println(argument) => {
                let value = argument
                    .as_deref()
                    .map(|arg| self.lower_value(arg))
                    .transpose()?;
                self.emit(IrInstr::Println { value });
                return Ok(None);
            }
        };
        Ok(Some(reg))
    }

    /// `&&`/`||`: evaluate the right operand only when the left one does not
    /// decide the result; the 0/1 outcome meets in an anonymous local
    fn lower_logical(
        &mut self,
        op: LogicalOperator,
        left: &TypedExpr,
        right: &TypedExpr,
    ) -> CompileResult<Register> {
        let result = self.allocate_anonymous_local(Type::BOOLEAN);
        let cond = self.lower_value(left)?;

        let rhs_block = self.alloc_block(Some("logical.rhs"));
        let short_block = self.alloc_block(Some("logical.short"));
        let merge_block = self.alloc_block(Some("logical.merge"));

        let (then_block, else_block, short_value) = match op {
            LogicalOperator::And => (rhs_block, short_block, false),
            LogicalOperator::Or => (short_block, rhs_block, true),
        };
        self.set_terminator(Terminator::Branch {
            cond,
            then_block,
            else_block,
        });

        self.switch_to(short_block);
        let decided = self.emit_constant(Scalar::boolean(short_value));
        self.emit(IrInstr::StoreLocal {
            index: result,
            value: decided,
        });
        self.set_terminator(Terminator::Jump(merge_block));

        self.switch_to(rhs_block);
        let value = self.lower_value(right)?;
        let zero = self.emit_zero(value.ty, right.span)?;
        let truth = self.alloc_register(Type::BOOLEAN);
        self.emit(IrInstr::BinaryOp {
            dest: truth,
            op: BinaryOp::Ne,
            left: value,
            right: zero,
        });
        self.emit(IrInstr::StoreLocal {
            index: result,
            value: truth,
        });
        self.set_terminator(Terminator::Jump(merge_block));

        self.switch_to(merge_block);
        let dest = self.alloc_register(Type::BOOLEAN);
        self.emit(IrInstr::LoadLocal {
            dest,
            index: result,
        });
        Ok(dest)
    }

    fn load_place(&mut self, place: Place, ty: Type) -> Register {
        let dest = self.alloc_register(ty);
        match place {
            Place::Local(slot) => self.emit(IrInstr::LoadLocal {
                dest,
                index: slot.0,
            }),
            Place::Field(field) => self.emit(IrInstr::LoadField {
                dest,
                field: field.0,
            }),
        }
        dest
    }

    fn store_place(&mut self, place: Place, value: Register) {
        match place {
            Place::Local(slot) => self.emit(IrInstr::StoreLocal {
                index: slot.0,
                value,
            }),
            Place::Field(field) => self.emit(IrInstr::StoreField {
                field: field.0,
                value,
            }),
        }
    }
}
