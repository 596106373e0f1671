//! Local declarations, scoping and shadowing

use super::harness::*;
use quill_engine::frontend::checker::{CheckWarning, WarningCode, WarningConfig};
use quill_engine::{CheckerOptions, SemanticError};

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_declaration_without_initializer_is_zero() {
    expect_output(
        &main_only(vec![
            var(Type::Int, "i", None),
            var(Type::Double, "d", None),
            print(name("i")),
            print(name("d")),
        ]),
        &["0", "0.0"],
    );
}

#[test]
fn test_constant_narrowing_into_short() {
    expect_output(
        &main_only(vec![var(Type::Short, "s", Some(int(300))), print(name("s"))]),
        &["300"],
    );
}

#[test]
fn test_constant_out_of_range_is_rejected() {
    let err = expect_semantic_error(&main_only(vec![var(Type::Short, "s", Some(int(40000)))]));
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn test_constant_narrowing_can_be_disabled() {
    let options = CheckerOptions {
        constant_narrowing: false,
        ..CheckerOptions::default()
    };
    let err = expect_semantic_error_with(
        &main_only(vec![var(Type::Short, "s", Some(int(1)))]),
        options,
    );
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn test_double_does_not_narrow_to_int() {
    let err = expect_semantic_error(&main_only(vec![var(Type::Int, "i", Some(float(1.0)))]));
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn test_duplicate_in_same_scope() {
    let err = expect_semantic_error(&main_only(vec![
        var(Type::Int, "x", None),
        var(Type::Long, "x", None),
    ]));
    assert!(matches!(err, SemanticError::DuplicateDeclaration { ref name, .. } if name == "x"));
}

#[test]
fn test_undefined_variable() {
    let err = expect_semantic_error(&main_only(vec![print(name("ghost"))]));
    assert!(matches!(err, SemanticError::UndefinedVariable { ref name, .. } if name == "ghost"));
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_block_scope_ends_with_block() {
    let err = expect_semantic_error(&main_only(vec![
        block(vec![var(Type::Int, "inner", Some(int(1)))]),
        print(name("inner")),
    ]));
    assert!(matches!(err, SemanticError::UndefinedVariable { .. }));
}

#[test]
fn test_sibling_blocks_may_reuse_a_name() {
    expect_output(
        &main_only(vec![
            block(vec![var(Type::Int, "t", Some(int(1))), print(name("t"))]),
            block(vec![var(Type::Int, "t", Some(int(2))), print(name("t"))]),
        ]),
        &["1", "2"],
    );
}

#[test]
fn test_shadowing_warns_and_inner_binding_wins() {
    let program = main_only(vec![
        var(Type::Int, "x", Some(int(1))),
        block(vec![var(Type::Int, "x", Some(int(2))), print(name("x"))]),
        print(name("x")),
    ]);
    expect_output(&program, &["2", "1"]);

    let compilation = compile(&program).unwrap();
    assert!(matches!(
        compilation.warnings.as_slice(),
        [CheckWarning::ShadowedVariable { name, .. }] if name == "x"
    ));
}

#[test]
fn test_local_hides_field() {
    let program = program(
        class("Main")
            .field(field_init("v", Type::Int, int(1)))
            .method(method(
                "main",
                Type::Void,
                vec![
                    var(Type::Int, "v", Some(int(2))),
                    print(name("v")),
                    print(path(&["Main", "v"])),
                ],
            )),
    );
    expect_output(&program, &["2", "1"]);
}

#[test]
fn test_denied_warning_aborts() {
    let mut warnings = WarningConfig::default();
    warnings.deny.insert(WarningCode::ShadowedVariable);
    let options = CheckerOptions {
        warnings,
        ..CheckerOptions::default()
    };
    let err = expect_semantic_error_with(
        &main_only(vec![
            var(Type::Int, "x", None),
            block(vec![var(Type::Int, "x", None)]),
        ]),
        options,
    );
    assert!(matches!(err, SemanticError::DeniedWarning { .. }));
}

#[test]
fn test_unreachable_code_is_dropped() {
    let program = main_only(vec![print(int(1)), ret_void(), print(int(2))]);
    expect_output(&program, &["1"]);
    let compilation = compile(&program).unwrap();
    assert!(matches!(
        compilation.warnings.as_slice(),
        [CheckWarning::UnreachableCode { .. }]
    ));
}
