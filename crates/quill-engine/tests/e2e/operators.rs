//! Arithmetic, comparison, logical and update operators
//!
//! Results are observed through `println`.

use super::harness::*;
use quill_engine::frontend::ast::Expression;
use quill_engine::{SemanticError, VmError};

fn rem(left: Expression, right: Expression) -> Expression {
    binary(BinaryOperator::Modulo, left, right)
}

fn cmp(op: BinaryOperator, left: Expression, right: Expression) -> Expression {
    binary(op, left, right)
}

// ============================================================================
// Division
// ============================================================================

#[test]
fn test_integer_division_truncates_toward_zero() {
    expect_output(
        &main_only(vec![
            print(div(int(5), int(2))),
            print(div(int(5), neg(int(2)))),
            print(div(neg(int(5)), int(2))),
            print(div(neg(int(5)), neg(int(2)))),
        ]),
        &["2", "-2", "-2", "2"],
    );
}

#[test]
fn test_mixed_division_promotes_to_double() {
    expect_output(&main_only(vec![print(div(float(5.0), int(2)))]), &["2.5"]);
}

#[test]
fn test_remainder_follows_dividend_sign() {
    expect_output(
        &main_only(vec![
            print(rem(int(7), int(3))),
            print(rem(neg(int(7)), int(3))),
            print(rem(int(7), neg(int(3)))),
        ]),
        &["1", "-1", "1"],
    );
}

#[test]
fn test_integer_division_by_zero_is_a_runtime_error() {
    let err = expect_vm_error(&main_only(vec![print(div(int(1), int(0)))]));
    assert!(matches!(err, VmError::DivisionByZero));
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_long_arithmetic() {
    expect_output(
        &main_only(vec![
            var(Type::Long, "big", Some(long(10))),
            print(mul(name("big"), int(3))),
        ]),
        &["30"],
    );
}

#[test]
fn test_double_prints_with_fraction() {
    expect_output(
        &main_only(vec![var(Type::Double, "d", Some(int(1))), print(name("d"))]),
        &["1.0"],
    );
}

#[test]
fn test_doubles_print_without_exponent() {
    expect_output(
        &main_only(vec![
            print(float(1e17)),
            print(float(1e-7)),
            print(div(float(1.0), float(0.0))),
            print(div(neg(float(1.0)), float(0.0))),
        ]),
        &["100000000000000000.0", "0.0000001", "Infinity", "-Infinity"],
    );
}

// ============================================================================
// Comparison and logical operators
// ============================================================================

#[test]
fn test_comparison_yields_zero_or_one() {
    expect_output(
        &main_only(vec![
            print(cmp(
                BinaryOperator::Equal,
                paren(cmp(BinaryOperator::GreaterThan, float(1.0), int(0))),
                int(1),
            )),
            print(cmp(BinaryOperator::LessThan, int(3), int(2))),
            print(cmp(BinaryOperator::NotEqual, long(3), float(3.0))),
        ]),
        &["1", "0", "0"],
    );
}

#[test]
fn test_logical_operators_normalise_to_zero_or_one() {
    expect_output(
        &main_only(vec![
            print(and(int(10), int(1))),
            print(or(int(10), int(1))),
            print(and(int(10), int(0))),
            print(or(int(0), float(0.5))),
            print(not(int(7))),
        ]),
        &["1", "1", "0", "1", "0"],
    );
}

#[test]
fn test_logical_operators_short_circuit() {
    let program = program(
        class("Main")
            .method(method(
                "main",
                Type::Void,
                vec![
                    print(and(int(0), call(&["loud"], vec![]))),
                    print(or(int(1), call(&["loud"], vec![]))),
                    print(or(int(0), call(&["loud"], vec![]))),
                ],
            ))
            .method(method(
                "loud",
                Type::Int,
                vec![print(int(99)), ret(int(1))],
            )),
    );
    expect_output(&program, &["0", "1", "99", "1"]);
}

// ============================================================================
// Increment and decrement
// ============================================================================

#[test]
fn test_postfix_and_prefix_increment() {
    expect_output(
        &main_only(vec![
            var(Type::Int, "foo", Some(int(0))),
            print(post_inc(name("foo"))),
            print(name("foo")),
            print(pre_inc(name("foo"))),
            print(name("foo")),
        ]),
        &["0", "1", "2", "2"],
    );
}

#[test]
fn test_decrement_on_field() {
    let program = program(
        class("Main")
            .field(field_init("count", Type::Short, int(3)))
            .method(method(
                "main",
                Type::Void,
                vec![
                    print(pre_dec(path(&["Main", "count"]))),
                    print(post_dec(name("count"))),
                    print(name("count")),
                ],
            )),
    );
    expect_output(&program, &["2", "2", "1"]);
}

#[test]
fn test_increment_of_literal_is_rejected() {
    let err = expect_semantic_error(&main_only(vec![expr(pre_inc(int(1)))]));
    assert!(matches!(err, SemanticError::InvalidLvalue { .. }));
}
