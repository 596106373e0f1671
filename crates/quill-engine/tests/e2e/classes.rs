//! Nested classes, qualified access, fields and calls

use super::harness::*;
use quill_engine::frontend::checker::MemberKind;
use quill_engine::{Program, SemanticError};

/// `Main` with `A.foo()` and `A.B.foo()`, each returning a distinct value
fn explicit_access(body: Vec<Statement>) -> Program {
    program(
        class("Main").method(method("main", Type::Void, body)).nested(
            class("A")
                .method(method("foo", Type::Int, vec![ret(int(1))]))
                .nested(
                    class("B")
                        .method(method("foo", Type::Int, vec![ret(int(2))]))
                        .nested(class("C")),
                ),
        ),
    )
}

// ============================================================================
// Qualified access
// ============================================================================

#[test]
fn test_qualified_calls_reach_their_own_class() {
    expect_output(
        &explicit_access(vec![
            print(call(&["Main", "A", "foo"], vec![])),
            print(call(&["Main", "A", "B", "foo"], vec![])),
        ]),
        &["1", "2"],
    );
}

#[test]
fn test_qualified_call_does_not_fall_back_to_enclosing_class() {
    let err = expect_semantic_error(&explicit_access(vec![print(call(
        &["Main", "A", "B", "C", "foo"],
        vec![],
    ))]));
    assert!(matches!(
        err,
        SemanticError::MemberNotFound { ref class, kind: MemberKind::Method, .. } if class == "Main.A.B.C"
    ));
}

#[test]
fn test_qualified_call_must_start_at_root() {
    let err = expect_semantic_error(&explicit_access(vec![print(call(
        &["A", "B", "C", "foo"],
        vec![],
    ))]));
    assert!(matches!(err, SemanticError::UnresolvedQualifiedAccess { .. }));
}

#[test]
fn test_unqualified_call_searches_current_class_only() {
    let program = program(
        class("Main")
            .method(method("main", Type::Void, vec![print(call(&["Main", "A", "run"], vec![]))]))
            .method(method("helper", Type::Int, vec![ret(int(0))]))
            .nested(class("A").method(method(
                "run",
                Type::Int,
                vec![ret(call(&["helper"], vec![]))],
            ))),
    );
    let err = expect_semantic_error(&program);
    assert!(matches!(
        err,
        SemanticError::MethodNotFound { ref class, ref name, .. } if class == "Main.A" && name == "helper"
    ));
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_field_initializers_run_before_entry() {
    let program = program(
        class("Main")
            .field(field_init("a", Type::Int, int(3)))
            .field(field_init("b", Type::Int, mul(name("a"), int(2))))
            .method(method(
                "main",
                Type::Void,
                vec![print(name("a")), print(path(&["Main", "b"]))],
            )),
    );
    expect_output(&program, &["3", "6"]);
}

#[test]
fn test_nested_class_field_through_path() {
    let program = program(
        class("Main")
            .method(method(
                "main",
                Type::Void,
                vec![
                    expr(assign(path(&["Main", "Foo", "bar"]), int(5))),
                    print(call(&["Main", "Foo", "get"], vec![])),
                ],
            ))
            .nested(
                class("Foo")
                    .field(field("bar", Type::Int))
                    .method(method("get", Type::Int, vec![ret(name("bar"))])),
            ),
    );
    expect_output(&program, &["5"]);
}

#[test]
fn test_uninitialised_field_reads_zero() {
    let program = program(
        class("Main")
            .field(field("d", Type::Double))
            .method(method("main", Type::Void, vec![print(name("d"))])),
    );
    expect_output(&program, &["0.0"]);
}

#[test]
fn test_field_and_method_share_a_name() {
    let program = program(
        class("Main")
            .field(field_init("foo", Type::Int, int(3)))
            .method(method("foo", Type::Int, vec![ret(int(4))]))
            .method(method(
                "main",
                Type::Void,
                vec![print(name("foo")), print(call(&["foo"], vec![]))],
            )),
    );
    expect_output(&program, &["3", "4"]);
}

#[test]
fn test_chained_assignment_through_field() {
    let program = program(
        class("Main").field(field("ba", Type::Int)).method(method(
            "main",
            Type::Void,
            vec![
                var(Type::Long, "boo", None),
                var(Type::Int, "foo", None),
                var(Type::Int, "bar", None),
                var(Type::Int, "baz", None),
                expr(assign(
                    name("boo"),
                    assign(
                        path(&["Main", "ba"]),
                        assign(name("foo"), assign(name("bar"), assign(name("baz"), int(10)))),
                    ),
                )),
                print(name("boo")),
                print(name("ba")),
                print(name("foo")),
                print(name("bar")),
                print(name("baz")),
            ],
        )),
    );
    expect_output(&program, &["10", "10", "10", "10", "10"]);
}

/// Mixed-width chains: `short` takes the constant by narrowing, every outer
/// target widens the value of the assignment to its right
#[test]
fn test_read_write_chain_across_widths() {
    let blank = || expr(call(&["println"], vec![]));
    let locals = || {
        vec![
            var(Type::Long, "foo", None),
            var(Type::Int, "bar", None),
            var(Type::Short, "baz", None),
        ]
    };
    let print_locals = || vec![print(name("foo")), print(name("bar")), print(name("baz"))];

    let mut inner = locals();
    inner.push(expr(assign(
        name("foo"),
        assign(name("bar"), assign(name("baz"), int(25))),
    )));
    inner.extend(print_locals());
    inner.push(blank());

    let mut body = vec![print(name("boo")), blank()];
    body.extend(locals());
    body.push(block(inner));
    body.extend(print_locals());
    body.push(blank());

    body.push(expr(assign(
        name("boo"),
        assign(
            path(&["Main", "ba"]),
            assign(name("foo"), assign(name("bar"), assign(name("baz"), int(10)))),
        ),
    )));
    body.extend(print_locals());
    body.extend([print(name("boo")), print(name("ba")), blank()]);

    body.extend([
        expr(assign(name("foo"), int(10))),
        expr(assign(name("bar"), int(20))),
        expr(assign(name("baz"), int(30))),
        expr(assign(name("boo"), int(40))),
        expr(assign(path(&["Main", "ba"]), int(50))),
    ]);
    body.extend(print_locals());
    body.extend([print(name("boo")), print(name("ba")), blank()]);

    body.push(expr(assign(path(&["Main", "Foo", "bar"]), name("foo"))));
    body.push(print(path(&["Main", "Foo", "bar"])));

    let program = program(
        class("Main")
            .nested(class("Foo").field(field("bar", Type::Long)))
            .field(field_init("ba", Type::Long, int(1000)))
            .field(field_init("boo", Type::Long, name("ba")))
            .method(method("main", Type::Void, body)),
    );

    expect_output(
        &program,
        &[
            "1000", "",
            "25", "25", "25", "",
            "0", "0", "0", "",
            "10", "10", "10", "10", "10", "",
            "10", "20", "30", "40", "50", "",
            "10",
        ],
    );

    // The inner block's declarations shadow the outer ones
    let compilation = compile(&program).unwrap();
    assert_eq!(compilation.warnings.len(), 3);
}

// ============================================================================
// Calls and returns
// ============================================================================

#[test]
fn test_recursive_factorial_through_field() {
    let program = program(
        class("Main")
            .field(field_init("param", Type::Int, int(7)))
            .method(method(
                "main",
                Type::Void,
                vec![print(call(&["fact"], vec![]))],
            ))
            .method(method(
                "fact",
                Type::Int,
                vec![switch(
                    name("param"),
                    vec![
                        case(int(0), vec![]),
                        case(int(1), vec![ret(int(1))]),
                        default_case(vec![
                            var(Type::Int, "p", Some(name("param"))),
                            expr(assign(name("param"), sub(name("param"), int(1)))),
                            ret(mul(name("p"), call(&["fact"], vec![]))),
                        ]),
                    ],
                )],
            )),
    );
    expect_output(&program, &["5040"]);
}

#[test]
fn test_return_value_widens_to_declared_type() {
    let program = program(
        class("Main")
            .method(method("intMethod", Type::Int, vec![ret(int(3))]))
            .method(method(
                "doubleMethod",
                Type::Double,
                vec![ret(call(&["intMethod"], vec![]))],
            ))
            .method(method(
                "main",
                Type::Void,
                vec![print(call(&["doubleMethod"], vec![]))],
            )),
    );
    expect_output(&program, &["3.0"]);
}

#[test]
fn test_constant_return_narrows_to_short() {
    let program = program(
        class("Main")
            .method(method("baz", Type::Short, vec![ret(int(1))]))
            .method(method("main", Type::Void, vec![print(call(&["baz"], vec![]))])),
    );
    expect_output(&program, &["1"]);
}

#[test]
fn test_narrowing_non_constant_is_rejected() {
    let program = program(
        class("Main")
            .field(field("wide", Type::Int))
            .method(method("baz", Type::Short, vec![ret(name("wide"))]))
            .method(method("main", Type::Void, vec![])),
    );
    let err = expect_semantic_error(&program);
    assert!(matches!(err, SemanticError::TypeMismatch { .. }));
}

#[test]
fn test_missing_method() {
    let err = expect_semantic_error(&main_only(vec![expr(call(&["nothing"], vec![]))]));
    assert!(matches!(err, SemanticError::MethodNotFound { ref name, .. } if name == "nothing"));
}

#[test]
fn test_unbounded_recursion_overflows() {
    let program = program(
        class("Main")
            .method(method("main", Type::Void, vec![expr(call(&["main"], vec![]))])),
    );
    let err = expect_vm_error(&program);
    assert!(matches!(err, quill_engine::VmError::StackOverflow { .. }));
}
