//! Compilation errors

use crate::frontend::checker::SemanticError;
use crate::frontend::span::Span;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// The typed tree violated an invariant the checker establishes
    #[error("Internal compiler error: {message}")]
    InternalError { message: String, span: Span },

    #[error("IR verification failed: {}", errors.join("; "))]
    Verification { errors: Vec<String> },
}

impl CompileError {
    pub(crate) fn internal(message: impl Into<String>, span: Span) -> Self {
        CompileError::InternalError {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Semantic(e) => Some(e.span()),
            CompileError::InternalError { span, .. } => Some(*span),
            CompileError::Verification { .. } => None,
        }
    }

    /// The semantic error, if this failure came from analysis
    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            CompileError::Semantic(e) => Some(e),
            _ => None,
        }
    }
}
