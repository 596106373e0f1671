//! Typed tree to IR Lowering
//!
//! Converts a checked `TypedProgram` into an `IrModule`. Every method becomes
//! one function with the same index; field initializers are gathered into a
//! synthetic function that runs before the entry point.

mod control_flow;
mod expr;
mod stmt;

pub use control_flow::{SwitchContext, SwitchStack};

use crate::compiler::error::{CompileError, CompileResult};
use crate::compiler::ir::{
    BasicBlock, BasicBlockId, FunctionId, IrField, IrFunction, IrInstr, IrLocal, IrModule,
    IrValue, Register, RegisterId, Terminator,
};
use crate::frontend::checker::{TypedMethod, TypedProgram};
use crate::frontend::span::Span;
use crate::frontend::types::{Scalar, Type};

/// Name of the synthetic field initializer function
pub const INITIALIZER_NAME: &str = "<init>";

/// Lower a checked program
#[tracing::instrument(level = "debug", skip_all, fields(program = %program.name))]
pub fn lower_program(program: &TypedProgram) -> CompileResult<IrModule> {
    let mut module = IrModule::new(program.name.clone());

    for field in &program.fields {
        module.add_field(IrField {
            name: field.name.clone(),
            ty: field.ty,
        });
    }

    for method in &program.methods {
        let function = Lowerer::lower_method(program, method)?;
        module.add_function(function);
    }

    let initializer = Lowerer::lower_initializer(program, FunctionId(program.methods.len() as u32))?;
    module.initializer = module.add_function(initializer);
    module.entry = FunctionId(program.entry.0);

    tracing::debug!(
        functions = module.function_count(),
        fields = module.field_count(),
        "lowered program"
    );
    Ok(module)
}

/// Per-function lowering state
pub struct Lowerer<'a> {
    program: &'a TypedProgram,
    /// Function being built; its blocks live in `blocks` until `finish`
    function: IrFunction,
    /// Blocks indexed by `BasicBlockId`
    blocks: Vec<BasicBlock>,
    current_block: BasicBlockId,
    next_register: u32,
    switch_stack: SwitchStack,
}

impl<'a> Lowerer<'a> {
    fn new(program: &'a TypedProgram, function: IrFunction) -> Self {
        let mut lowerer = Self {
            program,
            function,
            blocks: Vec::new(),
            current_block: BasicBlockId(0),
            next_register: 0,
            switch_stack: SwitchStack::new(),
        };
        lowerer.current_block = lowerer.alloc_block(Some("entry"));
        lowerer
    }

    /// Lower one method body; the function id equals the method id
    pub fn lower_method(program: &'a TypedProgram, method: &TypedMethod) -> CompileResult<IrFunction> {
        let mut function = IrFunction::new(FunctionId(method.id.0), method.name.clone(), method.return_type);
        function.source_span = method.span;
        for local in &method.locals {
            function.add_local(IrLocal::named(local.name.clone(), local.ty));
        }

        let mut lowerer = Lowerer::new(program, function);
        lowerer.lower_block(&method.body)?;
        Ok(lowerer.finish())
    }

    /// Build the function that evaluates every field initializer in
    /// registration order
    pub fn lower_initializer(program: &'a TypedProgram, id: FunctionId) -> CompileResult<IrFunction> {
        let function = IrFunction::new(id, INITIALIZER_NAME, Type::Void);
        let mut lowerer = Lowerer::new(program, function);

        for field in &program.fields {
            if let Some(init) = &field.initializer {
                let value = lowerer.lower_value(init)?;
                lowerer.emit(IrInstr::StoreField {
                    field: field.id.0,
                    value,
                });
            }
        }

        Ok(lowerer.finish())
    }

    /// Seal the function: implicit `return` for void bodies, then prune
    /// blocks nothing jumps to
    fn finish(mut self) -> IrFunction {
        if !self.current_block_is_terminated() && self.function.return_ty.is_void() {
            self.set_terminator(Terminator::Return(None));
        }

        let mut function = self.function;
        for block in self.blocks {
            function.add_block(block);
        }
        function.entry_block = BasicBlockId(0);
        function.register_count = self.next_register;

        let removed = function.remove_unreachable_blocks();
        tracing::trace!(
            function = %function.name,
            blocks = function.block_count(),
            removed,
            "lowered function"
        );
        function
    }

    /// Allocate a new register
    fn alloc_register(&mut self, ty: Type) -> Register {
        let id = RegisterId::new(self.next_register);
        self.next_register += 1;
        Register::new(id, ty)
    }

    /// Allocate a new basic block; layout order is allocation order
    fn alloc_block(&mut self, label: Option<&str>) -> BasicBlockId {
        let id = BasicBlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id, label));
        id
    }

    /// Allocate a compiler temporary local slot
    fn allocate_anonymous_local(&mut self, ty: Type) -> u32 {
        self.function.add_local(IrLocal::anonymous(ty))
    }

    fn local_type(&self, index: u32) -> Option<Type> {
        self.function.locals.get(index as usize).map(|l| l.ty)
    }

    fn current_block_mut(&mut self) -> &mut BasicBlock {
        let index = self.current_block.index();
        &mut self.blocks[index]
    }

    fn switch_to(&mut self, block: BasicBlockId) {
        self.current_block = block;
    }

    /// Add an instruction to the current block
    fn emit(&mut self, instr: IrInstr) {
        self.current_block_mut().push(instr);
    }

    fn set_terminator(&mut self, term: Terminator) {
        self.current_block_mut().terminate(term);
    }

    fn current_block_is_terminated(&self) -> bool {
        self.blocks
            .get(self.current_block.index())
            .is_some_and(|b| b.is_terminated())
    }

    /// Materialise a constant into a fresh register
    fn emit_constant(&mut self, value: Scalar) -> Register {
        let dest = self.alloc_register(value.ty());
        self.emit(IrInstr::Assign {
            dest,
            value: IrValue::Constant(value),
        });
        dest
    }

    fn emit_zero(&mut self, ty: Type, span: Span) -> CompileResult<Register> {
        let zero = Scalar::zero(ty)
            .ok_or_else(|| CompileError::internal(format!("no zero value for {}", ty), span))?;
        Ok(self.emit_constant(zero))
    }
}
