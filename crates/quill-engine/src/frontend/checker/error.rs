//! Error and warning types for semantic analysis
//!
//! Every error carries the span of the offending node. All errors are fatal to
//! the compilation unit; warnings are collected and may be promoted to errors
//! through [`WarningConfig`].

use crate::frontend::span::Span;
use crate::frontend::types::Type;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected while building the class table or checking method bodies
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    /// Name declared twice in one scope (or one switch body)
    #[error("Duplicate declaration of '{name}'")]
    DuplicateDeclaration {
        name: String,
        original: Span,
        span: Span,
    },

    /// Two sibling classes share a name
    #[error("Duplicate class '{name}'")]
    DuplicateClass {
        name: String,
        original: Span,
        span: Span,
    },

    /// Two fields (or two methods) of one class share a name
    #[error("Duplicate member '{name}' in class '{class}'")]
    DuplicateMember {
        class: String,
        name: String,
        original: Span,
        span: Span,
    },

    /// Qualified path not rooted at the root class, or naming a missing class
    #[error("Cannot resolve qualified access '{path}': {reason}")]
    UnresolvedQualifiedAccess {
        path: String,
        reason: String,
        span: Span,
    },

    /// Last segment of a qualified path is not a member of the resolved class
    #[error("Class '{class}' has no {kind} named '{name}'")]
    MemberNotFound {
        class: String,
        name: String,
        kind: MemberKind,
        span: Span,
    },

    /// Unqualified call with no method on the current class
    #[error("Method '{name}' not found in class '{class}'")]
    MethodNotFound {
        class: String,
        name: String,
        span: Span,
    },

    /// Operator or assignment with no defined coercion
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        span: Span,
    },

    /// Assignment or increment target that is not a variable or field
    #[error("Invalid assignment target")]
    InvalidLvalue { span: Span },

    /// Name bound neither by a local nor a field of the current class
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("'{name}' expects {expected} argument(s), got {actual}")]
    ArgumentCountMismatch {
        name: String,
        expected: String,
        actual: usize,
        span: Span,
    },

    #[error("Duplicate case label {value}")]
    DuplicateCaseLabel {
        value: i64,
        original: Span,
        span: Span,
    },

    #[error("Multiple default labels in one switch")]
    DuplicateDefault { original: Span, span: Span },

    /// Case label that is not an integral compile-time constant
    #[error("Case label must be an integral constant")]
    InvalidCaseLabel { span: Span },

    #[error("'break' outside of a switch")]
    BreakOutsideSwitch { span: Span },

    #[error("Method '{name}' can complete without returning a {expected} value")]
    MissingReturn {
        name: String,
        expected: Type,
        span: Span,
    },

    #[error("Class '{class}' has no entry point '{name}'")]
    MissingEntryPoint {
        class: String,
        name: String,
        span: Span,
    },

    /// A warning promoted to an error by [`WarningConfig`]
    #[error("{warning} (denied)")]
    DeniedWarning { warning: CheckWarning },
}

impl SemanticError {
    /// Get the primary span of this error
    pub fn span(&self) -> Span {
        match self {
            SemanticError::DuplicateDeclaration { span, .. }
            | SemanticError::DuplicateClass { span, .. }
            | SemanticError::DuplicateMember { span, .. }
            | SemanticError::UnresolvedQualifiedAccess { span, .. }
            | SemanticError::MemberNotFound { span, .. }
            | SemanticError::MethodNotFound { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::InvalidLvalue { span }
            | SemanticError::UndefinedVariable { span, .. }
            | SemanticError::ArgumentCountMismatch { span, .. }
            | SemanticError::DuplicateCaseLabel { span, .. }
            | SemanticError::DuplicateDefault { span, .. }
            | SemanticError::InvalidCaseLabel { span }
            | SemanticError::BreakOutsideSwitch { span }
            | SemanticError::MissingReturn { span, .. }
            | SemanticError::MissingEntryPoint { span, .. } => *span,
            SemanticError::DeniedWarning { warning } => warning.span(),
        }
    }

    /// Location of the earlier declaration this error conflicts with
    pub fn original_span(&self) -> Option<Span> {
        match self {
            SemanticError::DuplicateDeclaration { original, .. }
            | SemanticError::DuplicateClass { original, .. }
            | SemanticError::DuplicateMember { original, .. }
            | SemanticError::DuplicateCaseLabel { original, .. }
            | SemanticError::DuplicateDefault { original, .. } => Some(*original),
            _ => None,
        }
    }

    /// Stable error code (e.g. "E3001")
    pub fn code(&self) -> &'static str {
        match self {
            SemanticError::DuplicateDeclaration { .. } => "E3001",
            SemanticError::DuplicateClass { .. } => "E3002",
            SemanticError::DuplicateMember { .. } => "E3003",
            SemanticError::UnresolvedQualifiedAccess { .. } => "E3004",
            SemanticError::MemberNotFound { .. } => "E3005",
            SemanticError::MethodNotFound { .. } => "E3006",
            SemanticError::TypeMismatch { .. } => "E3007",
            SemanticError::InvalidLvalue { .. } => "E3008",
            SemanticError::UndefinedVariable { .. } => "E3009",
            SemanticError::ArgumentCountMismatch { .. } => "E3010",
            SemanticError::DuplicateCaseLabel { .. } => "E3011",
            SemanticError::DuplicateDefault { .. } => "E3012",
            SemanticError::InvalidCaseLabel { .. } => "E3013",
            SemanticError::BreakOutsideSwitch { .. } => "E3014",
            SemanticError::MissingReturn { .. } => "E3015",
            SemanticError::MissingEntryPoint { .. } => "E3016",
            SemanticError::DeniedWarning { warning } => warning.code().as_str(),
        }
    }

    pub(crate) fn type_mismatch(expected: impl ToString, actual: impl ToString, span: Span) -> Self {
        SemanticError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
            span,
        }
    }
}

/// Result alias for analysis passes
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Which namespace a member lookup searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Field => f.write_str("field"),
            MemberKind::Method => f.write_str("method"),
        }
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCode {
    /// Statement after `return` or `break` (W1004)
    UnreachableCode,
    /// Local hides an outer local of the same name (W1005)
    ShadowedVariable,
}

impl WarningCode {
    /// Get the warning code string (e.g., "W1004")
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::UnreachableCode => "W1004",
            WarningCode::ShadowedVariable => "W1005",
        }
    }

    /// Parse the kebab-case name used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unreachable-code" => Some(WarningCode::UnreachableCode),
            "shadowed-variable" => Some(WarningCode::ShadowedVariable),
            _ => None,
        }
    }
}

/// Non-fatal findings of the checker
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckWarning {
    #[error("Unreachable code")]
    UnreachableCode { span: Span },

    #[error("Variable '{name}' shadows an outer declaration")]
    ShadowedVariable {
        name: String,
        original: Span,
        shadow: Span,
    },
}

impl CheckWarning {
    /// Get the primary span associated with this warning
    pub fn span(&self) -> Span {
        match self {
            CheckWarning::UnreachableCode { span } => *span,
            CheckWarning::ShadowedVariable { shadow, .. } => *shadow,
        }
    }

    pub fn code(&self) -> WarningCode {
        match self {
            CheckWarning::UnreachableCode { .. } => WarningCode::UnreachableCode,
            CheckWarning::ShadowedVariable { .. } => WarningCode::ShadowedVariable,
        }
    }
}

/// Which warnings are reported, and which abort compilation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningConfig {
    /// Disabled warning codes (suppressed)
    pub disabled: FxHashSet<WarningCode>,
    /// Warnings promoted to errors
    pub deny: FxHashSet<WarningCode>,
    /// When true, ALL warnings become errors
    pub strict: bool,
}

impl WarningConfig {
    /// Strict mode: all warnings are errors
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, code: WarningCode) -> bool {
        !self.disabled.contains(&code)
    }

    pub fn is_denied(&self, code: WarningCode) -> bool {
        self.strict || self.deny.contains(&code)
    }
}
