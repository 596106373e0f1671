//! Blocks of straight-line code and the terminators that join them

use super::instr::IrInstr;
use super::value::Register;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasicBlockId(pub u32);

impl BasicBlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BasicBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// Instructions run in order, then `terminator` picks the next block.
/// Lowering labels blocks after the construct that opened them
/// (`switch.case0`, `logical.merge`) so printed IR can be traced back.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub id: BasicBlockId,
    pub label: Option<String>,
    pub instructions: Vec<IrInstr>,
    pub terminator: Terminator,
}

impl BasicBlock {
    /// An empty block, still open (`Unreachable` terminator)
    pub fn new(id: BasicBlockId, label: Option<&str>) -> Self {
        Self {
            id,
            label: label.map(str::to_owned),
            instructions: Vec::new(),
            terminator: Terminator::Unreachable,
        }
    }

    pub fn push(&mut self, instr: IrInstr) {
        self.instructions.push(instr);
    }

    /// Close the block; a later call replaces the terminator
    pub fn terminate(&mut self, terminator: Terminator) {
        self.terminator = terminator;
    }

    pub fn is_terminated(&self) -> bool {
        !matches!(self.terminator, Terminator::Unreachable)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    Jump(BasicBlockId),

    /// Non-zero `cond` takes `then_block`
    Branch {
        cond: Register,
        then_block: BasicBlockId,
        else_block: BasicBlockId,
    },

    /// Leave the function; void functions carry `None`
    Return(Option<Register>),

    /// Compare `value` against each label in order; `default` when none
    /// matches. Labels are already converted to the compare type.
    Switch {
        value: Register,
        cases: Vec<(i64, BasicBlockId)>,
        default: BasicBlockId,
    },

    /// Open block; executing it is a fault
    Unreachable,
}

impl Terminator {
    /// Blocks control may continue in, switch labels first then `default`
    pub fn targets(&self) -> impl Iterator<Item = BasicBlockId> + '_ {
        let labelled = match self {
            Terminator::Switch { cases, .. } => cases.as_slice(),
            _ => &[],
        };
        let fixed = match self {
            Terminator::Jump(target) => [Some(*target), None],
            Terminator::Branch {
                then_block,
                else_block,
                ..
            } => [Some(*then_block), Some(*else_block)],
            Terminator::Switch { default, .. } => [Some(*default), None],
            Terminator::Return(_) | Terminator::Unreachable => [None, None],
        };
        labelled
            .iter()
            .map(|&(_, block)| block)
            .chain(fixed.into_iter().flatten())
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Jump(target) => write!(f, "goto {}", target),
            Terminator::Branch {
                cond,
                then_block,
                else_block,
            } => write!(f, "if {} then {} else {}", cond, then_block, else_block),
            Terminator::Return(value) => match value {
                Some(value) => write!(f, "return {}", value),
                None => f.write_str("return"),
            },
            Terminator::Switch {
                value,
                cases,
                default,
            } => {
                write!(f, "switch {} {{", value)?;
                for (label, target) in cases {
                    write!(f, " {} -> {},", label, target)?;
                }
                write!(f, " default -> {} }}", default)
            }
            Terminator::Unreachable => f.write_str("unreachable"),
        }
    }
}
