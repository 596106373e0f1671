//! Rendering analysis failures for humans and tools

use super::harness::*;
use quill_engine::frontend::checker::diagnostic::JsonDiagnostic;
use quill_engine::frontend::checker::{create_files, Diagnostic};
use quill_engine::frontend::span::Span;
use quill_engine::SemanticError;

const SOURCE: &str = "class Main {\n    void main() { nothing(); }\n}\n";

/// Span of `nothing` in `SOURCE`
fn nothing_span() -> Span {
    let start = SOURCE.find("nothing").unwrap();
    Span::new(start, start + "nothing".len(), 2, 19)
}

fn missing_method_error() -> SemanticError {
    match expect_semantic_error(&main_only(vec![expr(call(&["nothing"], vec![]))])) {
        SemanticError::MethodNotFound { class, name, .. } => SemanticError::MethodNotFound {
            class,
            name,
            span: nothing_span(),
        },
        other => panic!("expected MethodNotFound, got {:?}", other),
    }
}

#[test]
fn test_render_points_at_source() {
    let files = create_files("Main.quill", SOURCE);
    let rendered = Diagnostic::from_semantic_error(&missing_method_error(), 0)
        .render(&files)
        .unwrap();

    assert!(rendered.contains("error[E3006]"), "{}", rendered);
    assert!(rendered.contains("Method 'nothing' not found in class 'Main'"));
    assert!(rendered.contains("Main.quill:2:19"), "{}", rendered);
    assert!(rendered.contains("not found in the current class"));
}

#[test]
fn test_json_output() {
    let files = create_files("Main.quill", SOURCE);
    let json = Diagnostic::from_semantic_error(&missing_method_error(), 0)
        .to_json(&files)
        .unwrap();
    let parsed: JsonDiagnostic = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.code.as_deref(), Some("E3006"));
    assert_eq!(parsed.severity, "error");
    assert_eq!(parsed.labels.len(), 1);
    assert_eq!(parsed.labels[0].start_line, 2);
    assert_eq!(parsed.labels[0].start_column, 19);
    assert_eq!(parsed.labels[0].style, "primary");
}

#[test]
fn test_warning_diagnostic() {
    let program = main_only(vec![
        var(Type::Int, "x", None),
        block(vec![var(Type::Int, "x", None)]),
    ]);
    let compilation = compile(&program).unwrap();
    let files = create_files("Main.quill", SOURCE);

    let diagnostics: Vec<_> = compilation
        .warnings
        .iter()
        .map(|w| Diagnostic::from_warning(w, 0))
        .collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code().map(|c| c.as_str()), Some("W1005"));
    assert!(diagnostics[0].render(&files).unwrap().contains("warning[W1005]"));
}
