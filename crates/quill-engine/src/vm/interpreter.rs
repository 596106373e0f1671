//! Reference interpreter for lowered IR
//!
//! Executes an `IrModule` with an explicit frame stack. Every call gets a
//! fresh window of locals and registers, so recursion needs no special
//! handling.

use super::error::{VmError, VmResult};
use super::output::Output;
use super::register_file::RegisterFile;
use super::VmOptions;
use crate::compiler::ir::{
    BasicBlock, BasicBlockId, FunctionId, IrFunction, IrInstr, IrModule, IrValue, Register,
    Terminator,
};
use crate::frontend::types::{ArithError, Scalar};

/// One activation record
#[derive(Debug, Clone, Copy)]
struct Frame {
    function: FunctionId,
    block: BasicBlockId,
    /// Next instruction in `block`; equal to its length at the terminator
    ip: usize,
    /// Start of this frame's window; locals come first
    base: usize,
    /// First virtual register slot
    registers: usize,
    /// Caller register receiving the return value
    return_dest: Option<Register>,
}

pub struct Vm<'m, O: Output> {
    module: &'m IrModule,
    options: VmOptions,
    output: O,
    fields: Vec<Scalar>,
    stack: RegisterFile,
    frames: Vec<Frame>,
    /// Number of instructions and terminators executed
    steps: u64,
}

impl<'m, O: Output> Vm<'m, O> {
    pub fn new(module: &'m IrModule, options: VmOptions, output: O) -> Self {
        Self {
            module,
            stack: RegisterFile::with_max_size(options.max_registers),
            options,
            output,
            fields: Vec::new(),
            frames: Vec::new(),
            steps: 0,
        }
    }

    /// Zero every field, run the initializer, then the entry point
    ///
    /// Returns the entry point's return value.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.module.name))]
    pub fn run(&mut self) -> VmResult<Option<Scalar>> {
        self.fields = self
            .module
            .fields
            .iter()
            .map(|f| {
                Scalar::zero(f.ty)
                    .ok_or_else(|| VmError::TypeError(format!("field {} has type {}", f.name, f.ty)))
            })
            .collect::<VmResult<_>>()?;

        self.call(self.module.initializer)?;
        let result = self.call(self.module.entry);
        tracing::debug!(steps = self.steps, ok = result.is_ok(), "run finished");
        result
    }

    /// Run one function to completion
    pub fn call(&mut self, function: FunctionId) -> VmResult<Option<Scalar>> {
        let floor = self.frames.len();
        self.push_frame(function, None)?;

        let result = self.execute(floor);
        if result.is_err() {
            // Unwind frames left behind by the fault
            while self.frames.len() > floor {
                if let Some(frame) = self.frames.pop() {
                    self.stack.free_frame(frame.base);
                }
            }
        }
        result
    }

    pub fn fields(&self) -> &[Scalar] {
        &self.fields
    }

    /// Current value of a field by qualified name
    pub fn field(&self, name: &str) -> Option<Scalar> {
        self.module
            .fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|index| self.fields.get(index).copied())
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn function(&self, id: FunctionId) -> VmResult<&'m IrFunction> {
        self.module
            .get_function(id)
            .ok_or(VmError::UnknownFunction(id))
    }

    fn block(function: &'m IrFunction, id: BasicBlockId) -> VmResult<&'m BasicBlock> {
        function.get_block(id).ok_or_else(|| VmError::UnknownBlock {
            function: function.name.clone(),
            block: id,
        })
    }

    fn push_frame(&mut self, id: FunctionId, return_dest: Option<Register>) -> VmResult<()> {
        let depth = self.frames.len() + 1;
        if depth > self.options.max_call_depth {
            return Err(VmError::StackOverflow { depth });
        }

        let function = self.function(id)?;
        let local_count = function.locals.len();
        let base = self
            .stack
            .alloc_frame(local_count + function.register_count as usize, depth)?;
        for (offset, local) in function.locals.iter().enumerate() {
            let zero = Scalar::zero(local.ty)
                .ok_or_else(|| VmError::TypeError(format!("local of type {}", local.ty)))?;
            self.stack.set(base + offset, zero)?;
        }

        tracing::trace!(function = %function.name, depth, "call");
        self.frames.push(Frame {
            function: id,
            block: function.entry_block,
            ip: 0,
            base,
            registers: base + local_count,
            return_dest,
        });
        Ok(())
    }

    /// Step until the frame stack is back to `floor` frames
    fn execute(&mut self, floor: usize) -> VmResult<Option<Scalar>> {
        loop {
            let Some(frame) = self.frames.last().copied() else {
                return Ok(None);
            };
            let function = self.function(frame.function)?;
            let block = Self::block(function, frame.block)?;
            self.steps += 1;

            if let Some(instr) = block.instructions.get(frame.ip) {
                if let Some(top) = self.frames.last_mut() {
                    top.ip += 1;
                }
                self.execute_instr(&frame, instr)?;
                continue;
            }

            match &block.terminator {
                Terminator::Jump(target) => self.jump(*target),
                Terminator::Branch {
                    cond,
                    then_block,
                    else_block,
                } => {
                    let taken = if self.read(&frame, cond)?.is_truthy() {
                        *then_block
                    } else {
                        *else_block
                    };
                    self.jump(taken);
                }
                Terminator::Switch {
                    value,
                    cases,
                    default,
                } => {
                    let value = self.read(&frame, value)?;
                    let key = value
                        .as_i64()
                        .ok_or_else(|| VmError::TypeError(format!("switch on {}", value.ty())))?;
                    let target = cases
                        .iter()
                        .find(|(label, _)| *label == key)
                        .map(|(_, block)| *block)
                        .unwrap_or(*default);
                    self.jump(target);
                }
                Terminator::Return(value) => {
                    let value = value.map(|reg| self.read(&frame, &reg)).transpose()?;
                    self.frames.pop();
                    self.stack.free_frame(frame.base);

                    if self.frames.len() == floor {
                        return Ok(value);
                    }
                    if let (Some(dest), Some(caller)) = (frame.return_dest, self.frames.last().copied()) {
                        let value = value.ok_or_else(|| {
                            VmError::TypeError(format!("{} returned no value", function.name))
                        })?;
                        self.write(&caller, &dest, value)?;
                    }
                }
                Terminator::Unreachable => {
                    return Err(VmError::Unreachable {
                        function: function.name.clone(),
                        block: frame.block,
                    })
                }
            }
        }
    }

    fn execute_instr(&mut self, frame: &Frame, instr: &IrInstr) -> VmResult<()> {
        match instr {
            IrInstr::Assign { dest, value } => {
                let value = match value {
                    IrValue::Register(reg) => self.read(frame, reg)?,
                    IrValue::Constant(c) => *c,
                };
                self.write(frame, dest, value)
            }

            IrInstr::BinaryOp {
                dest,
                op,
                left,
                right,
            } => {
                let left = self.read(frame, left)?;
                let right = self.read(frame, right)?;
                let value = left.apply(*op, right).map_err(|e| match e {
                    ArithError::DivisionByZero => VmError::DivisionByZero,
                    other => VmError::TypeError(other.to_string()),
                })?;
                self.write(frame, dest, value)
            }

            IrInstr::UnaryOp { dest, op, operand } => {
                let value = self.read(frame, operand)?.unary(*op);
                self.write(frame, dest, value)
            }

            IrInstr::Convert { dest, operand } => {
                let value = self.read(frame, operand)?;
                let converted = value.convert(dest.ty).ok_or_else(|| {
                    VmError::TypeError(format!("cannot convert {} to {}", value.ty(), dest.ty))
                })?;
                self.write(frame, dest, converted)
            }

            IrInstr::LoadLocal { dest, index } => {
                let value = self.stack.get(frame.base + *index as usize)?;
                self.write(frame, dest, value)
            }

            IrInstr::StoreLocal { index, value } => {
                let value = self.read(frame, value)?;
                self.stack.set(frame.base + *index as usize, value)
            }

            IrInstr::LoadField { dest, field } => {
                let value = self
                    .fields
                    .get(*field as usize)
                    .copied()
                    .ok_or(VmError::UnknownField(*field))?;
                self.write(frame, dest, value)
            }

            IrInstr::StoreField { field, value } => {
                let value = self.read(frame, value)?;
                let slot = self
                    .fields
                    .get_mut(*field as usize)
                    .ok_or(VmError::UnknownField(*field))?;
                *slot = value;
                Ok(())
            }

            IrInstr::Call { dest, func } => self.push_frame(*func, *dest),

            IrInstr::Println { value } => {
                let value = value.map(|reg| self.read(frame, &reg)).transpose()?;
                self.output.println(value)?;
                Ok(())
            }
        }
    }

    fn jump(&mut self, target: BasicBlockId) {
        if let Some(top) = self.frames.last_mut() {
            top.block = target;
            top.ip = 0;
        }
    }

    fn read(&self, frame: &Frame, reg: &Register) -> VmResult<Scalar> {
        self.stack.get(frame.registers + reg.index())
    }

    fn write(&mut self, frame: &Frame, reg: &Register, value: Scalar) -> VmResult<()> {
        self.stack.set(frame.registers + reg.index(), value)
    }
}
