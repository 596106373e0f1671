//! `switch` dispatch, fallthrough and `break`

use super::harness::*;
use quill_engine::frontend::checker::RedeclarationPolicy;
use quill_engine::{CheckerOptions, Program, SemanticError};

fn fallthrough(x: i64) -> Program {
    main_only(vec![
        var(Type::Int, "x", Some(int(x))),
        switch(
            name("x"),
            vec![
                case(int(0), vec![print(int(10))]),
                case(int(1), vec![print(int(20))]),
                case(int(2), vec![print(int(30))]),
                default_case(vec![print(int(40))]),
            ],
        ),
    ])
}

// ============================================================================
// Dispatch and fallthrough
// ============================================================================

#[test]
fn test_fallthrough_from_first_case() {
    expect_output(&fallthrough(0), &["10", "20", "30", "40"]);
}

#[test]
fn test_fallthrough_from_middle_case() {
    expect_output(&fallthrough(2), &["30", "40"]);
}

#[test]
fn test_unmatched_value_takes_default() {
    expect_output(&fallthrough(3), &["40"]);
}

#[test]
fn test_unmatched_value_without_default_skips_switch() {
    expect_output(
        &main_only(vec![
            switch(int(9), vec![case(int(1), vec![print(int(1))])]),
            print(int(2)),
        ]),
        &["2"],
    );
}

#[test]
fn test_break_leaves_switch() {
    expect_output(
        &main_only(vec![
            switch(
                int(1),
                vec![
                    case(int(1), vec![print(int(1)), brk()]),
                    case(int(2), vec![print(int(2))]),
                ],
            ),
            print(int(3)),
        ]),
        &["1", "3"],
    );
}

#[test]
fn test_default_in_the_middle_falls_into_next_case() {
    expect_output(
        &main_only(vec![switch(
            int(7),
            vec![
                case(int(1), vec![print(int(1))]),
                default_case(vec![print(int(0))]),
                case(int(2), vec![print(int(2))]),
            ],
        )]),
        &["0", "2"],
    );
}

#[test]
fn test_nested_switch_break_targets_inner() {
    expect_output(
        &main_only(vec![switch(
            int(1),
            vec![
                case(
                    int(1),
                    vec![
                        switch(int(5), vec![case(int(5), vec![print(int(50)), brk()])]),
                        print(int(10)),
                    ],
                ),
                case(int(2), vec![print(int(20))]),
            ],
        )]),
        &["50", "10", "20"],
    );
}

#[test]
fn test_constant_expression_labels() {
    expect_output(
        &main_only(vec![switch(
            int(6),
            vec![
                case(mul(int(2), int(3)), vec![print(int(6)), brk()]),
                default_case(vec![print(int(0))]),
            ],
        )]),
        &["6"],
    );
}

// ============================================================================
// Static rules
// ============================================================================

#[test]
fn test_duplicate_case_label() {
    let err = expect_semantic_error(&main_only(vec![switch(
        int(1),
        vec![case(int(1), vec![]), case(add(int(0), int(1)), vec![])],
    )]));
    assert!(matches!(err, SemanticError::DuplicateCaseLabel { value: 1, .. }));
}

#[test]
fn test_non_constant_label() {
    let err = expect_semantic_error(&main_only(vec![
        var(Type::Int, "y", Some(int(1))),
        switch(int(1), vec![case(name("y"), vec![])]),
    ]));
    assert!(matches!(err, SemanticError::InvalidCaseLabel { .. }));
}

#[test]
fn test_double_scrutinee_is_rejected() {
    let err = expect_semantic_error(&main_only(vec![switch(float(1.0), vec![])]));
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn test_break_outside_switch() {
    let err = expect_semantic_error(&main_only(vec![brk()]));
    assert!(matches!(err, SemanticError::BreakOutsideSwitch { .. }));
}

// ============================================================================
// Declarations across cases
// ============================================================================

fn redeclaring_switch(x: i64) -> Program {
    main_only(vec![switch(
        int(x),
        vec![
            case(int(1), vec![var(Type::Int, "y", Some(int(1))), print(name("y")), brk()]),
            case(int(2), vec![var(Type::Int, "y", Some(int(2))), print(name("y"))]),
        ],
    )])
}

#[test]
fn test_redeclaration_across_cases_rejected_by_default() {
    let err = expect_semantic_error(&redeclaring_switch(2));
    assert!(matches!(err, SemanticError::DuplicateDeclaration { ref name, .. } if name == "y"));
}

#[test]
fn test_redeclaration_across_cases_with_rebind() {
    let options = CheckerOptions {
        switch_redeclaration: RedeclarationPolicy::Rebind,
        ..CheckerOptions::default()
    };
    expect_output_with(&redeclaring_switch(2), options.clone(), &["2"]);
    expect_output_with(&redeclaring_switch(1), options, &["1"]);
}

#[test]
fn test_declaration_is_visible_in_later_cases() {
    expect_output(
        &main_only(vec![switch(
            int(1),
            vec![
                case(int(1), vec![var(Type::Int, "z", Some(int(4)))]),
                case(int(2), vec![print(name("z"))]),
            ],
        )]),
        &["4"],
    );
}

#[test]
fn test_declaration_is_not_visible_after_switch() {
    let err = expect_semantic_error(&main_only(vec![
        switch(int(1), vec![case(int(1), vec![var(Type::Int, "z", Some(int(4)))])]),
        print(name("z")),
    ]));
    assert!(matches!(err, SemanticError::UndefinedVariable { ref name, .. } if name == "z"));
}
