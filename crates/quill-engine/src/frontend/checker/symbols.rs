//! Scope stack for local variables
//!
//! Scopes live in an arena indexed by `ScopeId`; the current scope links to
//! its parent. Every declaration gets a fresh slot from a per-method counter,
//! so shadowing bindings never share storage with the binding they hide.

use crate::frontend::span::Span;
use crate::frontend::types::Type;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Index of a local variable's storage within one method frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalSlot(pub u32);

impl LocalSlot {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scope identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Outermost scope of a method body
    Method,
    /// Compound statement
    Block,
    /// One scope shared by every case of a switch
    Switch,
}

/// What to do when a switch body redeclares a name in a later case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeclarationPolicy {
    /// `DuplicateDeclaration`
    #[default]
    Reject,
    /// Accept as a fresh binding for the rest of the switch
    Rebind,
}

/// A live local binding
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    pub slot: LocalSlot,
    pub scope_id: ScopeId,
    pub span: Span,
}

/// Storage description of one local slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalInfo {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// Scope in the scope tree
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub bindings: FxHashMap<String, Binding>,
}

impl Scope {
    pub fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            kind,
            parent,
            bindings: FxHashMap::default(),
        }
    }
}

/// Outcome of a successful declaration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declared {
    pub slot: LocalSlot,
    /// Span of an outer binding this declaration hides
    pub shadows: Option<Span>,
}

/// Error indicating a name declared twice in one scope
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateDeclarationError {
    pub name: String,
    pub original: Span,
    pub duplicate: Span,
}

/// Stack of lexical scopes for one method body
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    current: ScopeId,
    locals: Vec<LocalInfo>,
    policy: RedeclarationPolicy,
}

impl ScopeStack {
    /// Create a stack holding only the method scope
    pub fn new(policy: RedeclarationPolicy) -> Self {
        ScopeStack {
            scopes: vec![Scope::new(ScopeId(0), ScopeKind::Method, None)],
            current: ScopeId(0),
            locals: Vec::new(),
            policy,
        }
    }

    /// Enter a nested scope and make it current
    pub fn push_block(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, Some(self.current)));
        self.current = id;
        id
    }

    /// Leave the current scope
    ///
    /// Does nothing at the method scope.
    pub fn pop_block(&mut self) {
        if let Some(parent) = self.scopes[self.current.0 as usize].parent {
            self.current = parent;
        }
    }

    /// Declare a local in the current scope
    ///
    /// Fails if the current scope already binds `name`, unless the current
    /// scope is a switch scope and the policy is `Rebind`.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        span: Span,
    ) -> Result<Declared, DuplicateDeclarationError> {
        let current = self.current;
        let scope = &self.scopes[current.0 as usize];

        if let Some(existing) = scope.bindings.get(name) {
            let rebind =
                scope.kind == ScopeKind::Switch && self.policy == RedeclarationPolicy::Rebind;
            if !rebind {
                return Err(DuplicateDeclarationError {
                    name: name.to_string(),
                    original: existing.span,
                    duplicate: span,
                });
            }
        }

        let shadows = scope
            .parent
            .and_then(|parent| self.lookup_from(name, parent))
            .map(|outer| outer.span);

        let slot = LocalSlot(self.locals.len() as u32);
        self.locals.push(LocalInfo {
            name: name.to_string(),
            ty,
            span,
        });
        let binding = Binding {
            name: name.to_string(),
            ty,
            slot,
            scope_id: current,
            span,
        };
        self.scopes[current.0 as usize]
            .bindings
            .insert(name.to_string(), binding);

        Ok(Declared { slot, shadows })
    }

    /// Resolve a name innermost to outermost
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.lookup_from(name, self.current)
    }

    fn lookup_from(&self, name: &str, mut scope_id: ScopeId) -> Option<&Binding> {
        loop {
            let scope = self.scopes.get(scope_id.0 as usize)?;
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding);
            }
            scope_id = scope.parent?;
        }
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current.0 as usize]
    }

    pub fn current_scope_id(&self) -> ScopeId {
        self.current
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// All slots allocated so far, indexed by `LocalSlot`
    pub fn locals(&self) -> &[LocalInfo] {
        &self.locals
    }

    pub fn into_locals(self) -> Vec<LocalInfo> {
        self.locals
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new(RedeclarationPolicy::default())
    }
}
