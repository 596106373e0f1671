//! Diagnostic rendering for semantic errors and warnings
//!
//! Renders with source context through codespan-reporting, or as JSON for
//! editor integration.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, LabelStyle, Severity};
use codespan_reporting::files::Files;
pub use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use termcolor::{ColorChoice, NoColor, StandardStream};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{CheckWarning, SemanticError};
use crate::frontend::span::Span;

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message with source code context
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    /// Error code (e.g., "E3005")
    code: Option<ErrorCode>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.inner = self.inner.with_code(code.0);
        self.code = Some(code);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(mut self, file_id: usize, span: Span, message: impl Into<String>) -> Self {
        let label = Label::primary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a secondary label (related location)
    pub fn with_secondary_label(mut self, file_id: usize, span: Span, message: impl Into<String>) -> Self {
        let label = Label::secondary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create diagnostic from a SemanticError
    pub fn from_semantic_error(error: &SemanticError, file_id: usize) -> Self {
        use SemanticError::*;

        let code = ErrorCode(error.code());
        let span = error.span();

        match error {
            DuplicateDeclaration { original, .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "duplicate declaration")
                .with_secondary_label(file_id, *original, "first declaration here"),

            DuplicateClass { original, .. } | DuplicateMember { original, .. } => {
                Diagnostic::error(error.to_string())
                    .with_code(code)
                    .with_primary_label(file_id, span, "declared again here")
                    .with_secondary_label(file_id, *original, "first declaration here")
            }

            UnresolvedQualifiedAccess { reason, .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, reason.clone())
                .with_help("qualify the path from the root class, one nested class at a time"),

            MemberNotFound { class, .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "not declared on this class")
                .with_note(format!(
                    "members of enclosing or nested classes are not searched from '{}'",
                    class
                )),

            MethodNotFound { .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "not found in the current class")
                .with_help("methods of other classes need a qualified path such as Main.Nested.method()"),

            TypeMismatch { expected, actual, .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, format!("expected {}, found {}", expected, actual)),

            UndefinedVariable { .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "not found in this scope"),

            DuplicateCaseLabel { original, .. } | DuplicateDefault { original, .. } => {
                Diagnostic::error(error.to_string())
                    .with_code(code)
                    .with_primary_label(file_id, span, "repeated here")
                    .with_secondary_label(file_id, *original, "first used here")
            }

            BreakOutsideSwitch { .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "not inside a switch"),

            MissingReturn { .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, "end of method is reachable"),

            DeniedWarning { warning } => Diagnostic::from_warning(warning, file_id)
                .into_error()
                .with_note("this warning is configured as an error"),

            InvalidLvalue { .. }
            | ArgumentCountMismatch { .. }
            | InvalidCaseLabel { .. }
            | MissingEntryPoint { .. } => Diagnostic::error(error.to_string())
                .with_code(code)
                .with_primary_label(file_id, span, ""),
        }
    }

    /// Create diagnostic from a CheckWarning
    pub fn from_warning(warning: &CheckWarning, file_id: usize) -> Self {
        let code = ErrorCode(warning.code().as_str());
        match warning {
            CheckWarning::UnreachableCode { span } => Diagnostic::warning(warning.to_string())
                .with_code(code)
                .with_primary_label(file_id, *span, "this statement is never executed"),
            CheckWarning::ShadowedVariable {
                original, shadow, ..
            } => Diagnostic::warning(warning.to_string())
                .with_code(code)
                .with_primary_label(file_id, *shadow, "shadowing declaration")
                .with_secondary_label(file_id, *original, "outer declaration here"),
        }
    }

    fn into_error(mut self) -> Self {
        self.inner.severity = Severity::Error;
        self
    }

    pub fn severity(&self) -> Severity {
        self.inner.severity
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(&self, files: &SimpleFiles<String, String>) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();
        term::emit(&mut writer, &config, files, &self.inner)
    }

    /// Render without colors, for logs and snapshots
    pub fn render(&self, files: &SimpleFiles<String, String>) -> Result<String, codespan_reporting::files::Error> {
        let mut writer = NoColor::new(Vec::new());
        let config = term::Config::default();
        term::emit(&mut writer, &config, files, &self.inner)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(&self, files: &SimpleFiles<String, String>) -> Result<String, serde_json::Error> {
        let json_diag = JsonDiagnostic::from_diagnostic(self, files);
        serde_json::to_string_pretty(&json_diag)
    }
}

/// JSON representation of a diagnostic
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub code: Option<String>,
    pub severity: String,
    pub message: String,
    pub labels: Vec<JsonLabel>,
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    pub file: String,
    /// 1-indexed
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub message: Option<String>,
    /// "primary" or "secondary"
    pub style: String,
}

impl JsonDiagnostic {
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file = files.get(label.file_id).ok()?;
                let start = file.location((), label.range.start).ok()?;
                let end = file.location((), label.range.end).ok()?;

                Some(JsonLabel {
                    file: file.name().to_string(),
                    start_line: start.line_number,
                    start_column: start.column_number,
                    end_line: end.line_number,
                    end_column: end.column_number,
                    message: Some(label.message.clone()).filter(|m| !m.is_empty()),
                    style: match label.style {
                        LabelStyle::Primary => "primary",
                        LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Helper to create a SimpleFiles instance from source code
pub fn create_files(path: impl Into<PathBuf>, source: impl Into<String>) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}
