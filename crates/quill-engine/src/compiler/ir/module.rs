//! IR Module
//!
//! Top-level container for a compiled program: class fields as global
//! storage, one function per method, and the synthetic field initializer.

use super::function::IrFunction;
use super::instr::{FunctionId, IrInstr};
use crate::frontend::types::Type;
use rustc_hash::FxHashMap;

/// A class field lowered to module-level storage
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    /// Qualified name, e.g. `Main.Foo.bar`
    pub name: String,
    pub ty: Type,
}

/// An IR module (compilation unit)
#[derive(Debug, Clone)]
pub struct IrModule {
    /// Root class name
    pub name: String,
    /// Fields indexed by field id, zero-initialised before the initializer
    pub fields: Vec<IrField>,
    /// Functions indexed by function id
    pub functions: Vec<IrFunction>,
    /// Runs once before the entry point
    pub initializer: FunctionId,
    pub entry: FunctionId,
    /// Function lookup by name
    function_map: FxHashMap<String, FunctionId>,
}

impl IrModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            functions: Vec::new(),
            initializer: FunctionId(0),
            entry: FunctionId(0),
            function_map: FxHashMap::default(),
        }
    }

    pub fn add_field(&mut self, field: IrField) -> u32 {
        self.fields.push(field);
        (self.fields.len() - 1) as u32
    }

    /// Add a function; its id must be the next free index
    pub fn add_function(&mut self, func: IrFunction) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        debug_assert_eq!(func.id, id);
        self.function_map.insert(func.name.clone(), id);
        self.functions.push(func);
        id
    }

    pub fn get_function(&self, id: FunctionId) -> Option<&IrFunction> {
        self.functions.get(id.index())
    }

    pub fn get_function_by_name(&self, name: &str) -> Option<&IrFunction> {
        self.function_map
            .get(name)
            .and_then(|&id| self.get_function(id))
    }

    pub fn get_function_id(&self, name: &str) -> Option<FunctionId> {
        self.function_map.get(name).copied()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn functions(&self) -> impl Iterator<Item = &IrFunction> {
        self.functions.iter()
    }

    /// Validate every function plus cross-function references
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (id, what) in [(self.initializer, "initializer"), (self.entry, "entry point")] {
            if self.get_function(id).is_none() {
                errors.push(format!("Module {} {} {} does not exist", self.name, what, id));
            }
        }

        for func in &self.functions {
            if let Err(e) = func.validate() {
                errors.push(format!("Function {}: {}", func.name, e));
            }

            for block in &func.blocks {
                for instr in &block.instructions {
                    if let Some(e) = self.validate_reference(instr) {
                        errors.push(format!("Function {} block {}: {}", func.name, block.id, e));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_reference(&self, instr: &IrInstr) -> Option<String> {
        match instr {
            IrInstr::LoadField { field, .. } | IrInstr::StoreField { field, .. }
                if *field as usize >= self.fields.len() =>
            {
                Some(format!("unknown field {}", field))
            }
            IrInstr::Call { dest, func } => match self.get_function(*func) {
                None => Some(format!("call to unknown function {}", func)),
                Some(callee) => match dest {
                    Some(d) if d.ty != callee.return_ty => Some(format!(
                        "call to {} stores {} into {}",
                        callee.name, callee.return_ty, d
                    )),
                    _ => None,
                },
            },
            _ => None,
        }
    }
}
