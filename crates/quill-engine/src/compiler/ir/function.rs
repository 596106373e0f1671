//! IR Functions
//!
//! Functions in the IR contain locals, a register count, and basic blocks.

use super::block::{BasicBlock, BasicBlockId, Terminator};
use super::instr::{FunctionId, IrInstr};
use super::value::{IrLocal, Register};
use crate::frontend::span::Span;
use crate::frontend::types::Type;
use rustc_hash::{FxHashMap, FxHashSet};

/// An IR function
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub id: FunctionId,
    /// Qualified name, e.g. `Main.A.foo`
    pub name: String,
    pub return_ty: Type,
    /// Local variable slots, zero-initialised on entry
    pub locals: Vec<IrLocal>,
    /// Number of virtual registers used by the body
    pub register_count: u32,
    /// Basic blocks (in layout order)
    pub blocks: Vec<BasicBlock>,
    pub entry_block: BasicBlockId,
    /// Block lookup map for fast access
    block_map: FxHashMap<BasicBlockId, usize>,
    pub source_span: Span,
}

impl IrFunction {
    pub fn new(id: FunctionId, name: impl Into<String>, return_ty: Type) -> Self {
        Self {
            id,
            name: name.into(),
            return_ty,
            locals: Vec::new(),
            register_count: 0,
            blocks: Vec::new(),
            entry_block: BasicBlockId(0),
            block_map: FxHashMap::default(),
            source_span: Span::default(),
        }
    }

    pub fn add_local(&mut self, local: IrLocal) -> u32 {
        self.locals.push(local);
        (self.locals.len() - 1) as u32
    }

    /// Add a basic block and return its ID
    pub fn add_block(&mut self, block: BasicBlock) -> BasicBlockId {
        let id = block.id;
        self.block_map.insert(id, self.blocks.len());
        self.blocks.push(block);
        id
    }

    pub fn get_block(&self, id: BasicBlockId) -> Option<&BasicBlock> {
        self.block_map.get(&id).map(|&idx| &self.blocks[idx])
    }

    pub fn get_block_mut(&mut self, id: BasicBlockId) -> Option<&mut BasicBlock> {
        self.block_map
            .get(&id)
            .copied()
            .map(|idx| &mut self.blocks[idx])
    }

    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry_block)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BasicBlockId> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn local_count(&self) -> usize {
        self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.len()).sum()
    }

    /// Blocks reachable from the entry
    pub fn reachable_blocks(&self) -> FxHashSet<BasicBlockId> {
        let mut seen = FxHashSet::default();
        let mut worklist = vec![self.entry_block];
        while let Some(id) = worklist.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(block) = self.get_block(id) {
                worklist.extend(block.terminator.targets());
            }
        }
        seen
    }

    /// Drop blocks that cannot be reached from the entry
    ///
    /// Returns the number of blocks removed. Layout order of the remaining
    /// blocks is preserved.
    pub fn remove_unreachable_blocks(&mut self) -> usize {
        let reachable = self.reachable_blocks();
        let before = self.blocks.len();
        self.blocks.retain(|b| reachable.contains(&b.id));
        self.block_map = self
            .blocks
            .iter()
            .enumerate()
            .map(|(idx, b)| (b.id, idx))
            .collect();
        before - self.blocks.len()
    }

    /// Validate the function structure
    pub fn validate(&self) -> Result<(), String> {
        if self.blocks.is_empty() {
            return Err("Function has no blocks".to_string());
        }

        if self.get_block(self.entry_block).is_none() {
            return Err(format!("Entry block {} does not exist", self.entry_block));
        }

        for block in &self.blocks {
            if !block.is_terminated() {
                return Err(format!("Block {} is not terminated", block.id));
            }

            for succ in block.terminator.targets() {
                if self.get_block(succ).is_none() {
                    return Err(format!(
                        "Block {} references non-existent successor {}",
                        block.id, succ
                    ));
                }
            }

            for instr in &block.instructions {
                self.validate_instr(block.id, instr)?;
            }

            match &block.terminator {
                Terminator::Return(value) => self.validate_return(block.id, value.as_ref())?,
                Terminator::Branch { cond, .. } => self.validate_register(block.id, cond)?,
                Terminator::Switch { value, cases, .. } => {
                    self.validate_register(block.id, value)?;
                    if !value.ty.is_integral() {
                        return Err(format!(
                            "Block {} switches on non-integral {}",
                            block.id, value
                        ));
                    }
                    let mut labels = FxHashSet::default();
                    for (label, _) in cases {
                        if !labels.insert(*label) {
                            return Err(format!(
                                "Block {} has duplicate switch label {}",
                                block.id, label
                            ));
                        }
                    }
                }
                Terminator::Jump(_) | Terminator::Unreachable => {}
            }
        }

        Ok(())
    }

    fn validate_return(&self, block: BasicBlockId, value: Option<&Register>) -> Result<(), String> {
        match (self.return_ty.is_void(), value) {
            (true, None) => Ok(()),
            (true, Some(reg)) => Err(format!("Block {} returns {} from a void function", block, reg)),
            (false, None) => Err(format!(
                "Block {} returns no value from a function returning {}",
                block, self.return_ty
            )),
            (false, Some(reg)) if reg.ty != self.return_ty => Err(format!(
                "Block {} returns {} but the function returns {}",
                block, reg, self.return_ty
            )),
            (false, Some(reg)) => self.validate_register(block, reg),
        }
    }

    fn validate_instr(&self, block: BasicBlockId, instr: &IrInstr) -> Result<(), String> {
        if let Some(dest) = instr.dest() {
            self.validate_register(block, dest)?;
        }
        match instr {
            IrInstr::LoadLocal { index, .. } | IrInstr::StoreLocal { index, .. }
                if *index as usize >= self.locals.len() =>
            {
                Err(format!("Block {} uses undeclared local {}", block, index))
            }
            _ => Ok(()),
        }
    }

    fn validate_register(&self, block: BasicBlockId, reg: &Register) -> Result<(), String> {
        if reg.id.as_u32() >= self.register_count {
            return Err(format!(
                "Block {} uses {} beyond register count {}",
                block, reg, self.register_count
            ));
        }
        Ok(())
    }
}
