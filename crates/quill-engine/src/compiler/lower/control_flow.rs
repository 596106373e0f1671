//! Control Flow Lowering Utilities
//!
//! Tracks the enclosing switch statements so `break` knows where to go.

use crate::compiler::ir::BasicBlockId;

/// One switch being lowered
#[derive(Debug, Clone)]
pub struct SwitchContext {
    /// Block to jump to for `break`
    pub exit_block: BasicBlockId,
    /// Case blocks in declaration order; case `i` falls through to `i + 1`
    pub case_blocks: Vec<BasicBlockId>,
}

impl SwitchContext {
    pub fn new(exit_block: BasicBlockId, case_blocks: Vec<BasicBlockId>) -> Self {
        Self {
            exit_block,
            case_blocks,
        }
    }

    /// Where control goes when case `index` runs off its end
    pub fn fallthrough_target(&self, index: usize) -> BasicBlockId {
        self.case_blocks
            .get(index + 1)
            .copied()
            .unwrap_or(self.exit_block)
    }
}

/// Stack of active switch contexts for nested switches
#[derive(Debug, Default)]
pub struct SwitchStack {
    stack: Vec<SwitchContext>,
}

impl SwitchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ctx: SwitchContext) {
        self.stack.push(ctx);
    }

    pub fn pop(&mut self) -> Option<SwitchContext> {
        self.stack.pop()
    }

    /// The innermost switch
    pub fn current(&self) -> Option<&SwitchContext> {
        self.stack.last()
    }

    pub fn is_in_switch(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Exit block of the innermost switch
    pub fn break_target(&self) -> Option<BasicBlockId> {
        self.current().map(|ctx| ctx.exit_block)
    }
}
