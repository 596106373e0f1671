//! Pretty-printing for IR
//!
//! Provides human-readable output for debugging IR structures.

use super::block::BasicBlock;
use super::function::IrFunction;
use super::instr::IrInstr;
use super::module::IrModule;
use std::fmt::{self, Write};

/// Trait for pretty-printing IR constructs
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

/// Run a writer against a fresh `String`; writing to a `String` cannot fail
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut output = String::new();
    let _ = write(&mut output);
    output
}

impl PrettyPrint for IrModule {
    fn pretty_print(&self) -> String {
        render(|out| {
            writeln!(out, "; module {}", self.name)?;
            writeln!(out, "; entry {}, initializer {}", self.entry, self.initializer)?;
            for (index, field) in self.fields.iter().enumerate() {
                writeln!(out, "; field {} {}: {}", index, field.name, field.ty)?;
            }
            writeln!(out)?;

            for func in &self.functions {
                out.push_str(&func.pretty_print());
                writeln!(out)?;
            }
            Ok(())
        })
    }
}

impl PrettyPrint for IrFunction {
    fn pretty_print(&self) -> String {
        render(|out| {
            writeln!(out, "fn {} {}() -> {} {{", self.id, self.name, self.return_ty)?;

            if !self.locals.is_empty() {
                let locals: Vec<String> = self
                    .locals
                    .iter()
                    .enumerate()
                    .map(|(i, local)| match &local.name {
                        Some(name) => format!("l{} {}: {}", i, name, local.ty),
                        None => format!("l{}: {}", i, local.ty),
                    })
                    .collect();
                writeln!(out, "  ; locals: {}", locals.join(", "))?;
            }

            for block in &self.blocks {
                write_block(out, block)?;
            }

            writeln!(out, "}}")
        })
    }
}

fn write_block(out: &mut String, block: &BasicBlock) -> fmt::Result {
    match &block.label {
        Some(label) => writeln!(out, "  {}: ; {}", block.id, label)?,
        None => writeln!(out, "  {}:", block.id)?,
    }
    for instr in &block.instructions {
        writeln!(out, "    {}", format_instr(instr))?;
    }
    writeln!(out, "    {}", block.terminator)
}

fn format_instr(instr: &IrInstr) -> String {
    match instr {
        IrInstr::Assign { dest, value } => format!("{} = {}", dest, value),
        IrInstr::BinaryOp {
            dest,
            op,
            left,
            right,
        } => format!("{} = {} {} {}", dest, left, op, right),
        IrInstr::UnaryOp { dest, op, operand } => format!("{} = {}{}", dest, op, operand),
        IrInstr::Convert { dest, operand } => format!("{} = convert {}", dest, operand),
        IrInstr::LoadLocal { dest, index } => format!("{} = load_local l{}", dest, index),
        IrInstr::StoreLocal { index, value } => format!("store_local l{}, {}", index, value),
        IrInstr::LoadField { dest, field } => format!("{} = load_field f{}", dest, field),
        IrInstr::StoreField { field, value } => format!("store_field f{}, {}", field, value),
        IrInstr::Call {
            dest: Some(dest),
            func,
        } => format!("{} = call {}()", dest, func),
        IrInstr::Call { dest: None, func } => format!("call {}()", func),
        IrInstr::Println { value: Some(value) } => format!("println {}", value),
        IrInstr::Println { value: None } => "println".to_string(),
    }
}
