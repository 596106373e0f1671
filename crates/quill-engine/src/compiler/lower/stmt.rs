//! Statement lowering

use super::{Lowerer, SwitchContext};
use crate::compiler::error::{CompileError, CompileResult};
use crate::compiler::ir::{IrInstr, Terminator};
use crate::frontend::checker::{TypedStmt, TypedSwitch};
use crate::frontend::span::Span;

impl<'a> Lowerer<'a> {
    pub(super) fn lower_block(&mut self, statements: &[TypedStmt]) -> CompileResult<()> {
        for stmt in statements {
            self.lower_stmt(stmt)?;
        }
        Ok(())
    }

    fn lower_stmt(&mut self, stmt: &TypedStmt) -> CompileResult<()> {
        // Code after a terminator goes into a fresh block that nothing jumps
        // to; pruning removes it
        if self.current_block_is_terminated() {
            let dead = self.alloc_block(Some("dead"));
            self.switch_to(dead);
        }

        match stmt {
            TypedStmt::Block(statements) => self.lower_block(statements),

            TypedStmt::Declare { slot, init } => {
                let value = match init {
                    Some(init) => self.lower_value(init)?,
                    None => {
                        let ty = self.local_type(slot.0).ok_or_else(|| {
                            CompileError::internal(
                                format!("undeclared local slot {}", slot.0),
                                Span::default(),
                            )
                        })?;
                        self.emit_zero(ty, Span::default())?
                    }
                };
                self.emit(IrInstr::StoreLocal {
                    index: slot.0,
                    value,
                });
                Ok(())
            }

            TypedStmt::Expr(expr) => self.lower_expr(expr).map(|_| ()),

            TypedStmt::Switch(switch) => self.lower_switch(switch),

            TypedStmt::Break => {
                let target = self.switch_stack.break_target().ok_or_else(|| {
                    CompileError::internal("break outside of a switch", Span::default())
                })?;
                self.set_terminator(Terminator::Jump(target));
                Ok(())
            }

            TypedStmt::Return(value) => {
                let value = value.as_ref().map(|v| self.lower_value(v)).transpose()?;
                self.set_terminator(Terminator::Return(value));
                Ok(())
            }
        }
    }

    /// One block per case in declaration order plus an exit block. The
    /// dispatch maps labels to case blocks and `default` (or the exit when
    /// there is none) as the fallback. A case that runs off its end continues
    /// into the next case block; the last one into the exit.
    fn lower_switch(&mut self, switch: &TypedSwitch) -> CompileResult<()> {
        let scrutinee = self.lower_value(&switch.scrutinee)?;

        let case_blocks: Vec<_> = (0..switch.cases.len())
            .map(|i| self.alloc_block(Some(&format!("switch.case{}", i))))
            .collect();
        let exit_block = self.alloc_block(Some("switch.exit"));

        let cases = switch
            .cases
            .iter()
            .zip(&case_blocks)
            .filter_map(|(case, block)| case.label.map(|label| (label, *block)))
            .collect();
        let default = switch
            .default_index()
            .map(|i| case_blocks[i])
            .unwrap_or(exit_block);
        self.set_terminator(Terminator::Switch {
            value: scrutinee,
            cases,
            default,
        });

        let context = SwitchContext::new(exit_block, case_blocks);
        self.switch_stack.push(context.clone());
        for (index, case) in switch.cases.iter().enumerate() {
            self.switch_to(context.case_blocks[index]);
            self.lower_block(&case.body)?;
            if !self.current_block_is_terminated() {
                self.set_terminator(Terminator::Jump(context.fallthrough_target(index)));
            }
        }
        self.switch_stack.pop();

        self.switch_to(exit_block);
        Ok(())
    }
}
