//! JavaScript printing: layout, precedence, escaping.

use bumpalo::Bump;
use elmjet_core::ast::BinaryOp;
use elmjet_core::codegen::CodeGenerator;
use elmjet_core::config::OutputFormat;
use elmjet_core::MutableProgram;
use elmjet_test_helpers::build::{
    binary, call, conditional, func_decl, ident, if_stmt, member, number, object, program, ret,
    string, var_stmt,
};
use indoc::indoc;

fn sample_unit<'a>(arena: &'a Bump) -> MutableProgram<'a> {
    let condition = binary(
        arena,
        BinaryOp::GreaterThan,
        member(arena, ident(arena, "point"), "x"),
        number(0.0),
    );
    let describe = func_decl(
        arena,
        "describe",
        &["point"],
        vec![if_stmt(
            arena,
            condition,
            vec![ret(string(arena, "right"))],
            Some(vec![ret(string(arena, "left"))]),
        )],
    );
    program(vec![
        describe,
        var_stmt(
            arena,
            "origin",
            object(arena, vec![("x", number(0.0)), ("y", number(0.0))]),
        ),
        var_stmt(
            arena,
            "side",
            call(arena, ident(arena, "describe"), vec![ident(arena, "origin")]),
        ),
    ])
}

#[test]
fn readable_output_is_indented() {
    let arena = Bump::new();
    let unit = sample_unit(&arena);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(
        output,
        indoc! {r#"
            function describe(point) {
                if (point.x > 0) {
                    return "right";
                } else {
                    return "left";
                }
            }
            var origin = { x: 0, y: 0 };
            var side = describe(origin);
        "#}
    );
}

#[test]
fn compact_output_has_no_line_breaks() {
    let arena = Bump::new();
    let unit = sample_unit(&arena);

    let output = CodeGenerator::new()
        .with_format(OutputFormat::Compact)
        .generate(&unit);

    assert!(!output.contains('\n'));
    assert!(output.contains("return \"right\";"));
    assert!(output.contains("var origin = { x: 0, y: 0 };"));
}

#[test]
fn string_literals_are_escaped() {
    let arena = Bump::new();
    let unit = program(vec![var_stmt(
        &arena,
        "s",
        string(&arena, "say \"hi\"\nback\\slash"),
    )]);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(output, "var s = \"say \\\"hi\\\"\\nback\\\\slash\";\n");
}

#[test]
fn whole_numbers_print_without_a_fraction() {
    let arena = Bump::new();
    let unit = program(vec![
        var_stmt(&arena, "a", number(2.0)),
        var_stmt(&arena, "b", number(1.5)),
    ]);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(output, "var a = 2;\nvar b = 1.5;\n");
}

#[test]
fn conditionals_and_nested_binaries_parenthesize_correctly() {
    let arena = Bump::new();
    // (a + b) * c — the lower-precedence child needs parens.
    let sum = binary(
        &arena,
        BinaryOp::Add,
        ident(&arena, "a"),
        ident(&arena, "b"),
    );
    let product = binary(&arena, BinaryOp::Multiply, sum, ident(&arena, "c"));
    let pick = conditional(
        &arena,
        binary(
            &arena,
            BinaryOp::LessThan,
            ident(&arena, "a"),
            ident(&arena, "b"),
        ),
        product,
        number(0.0),
    );
    let unit = program(vec![var_stmt(&arena, "v", pick)]);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(output, "var v = a < b ? (a + b) * c : 0;\n");
}

#[test]
fn iife_callee_keeps_its_parens() {
    use elmjet_test_helpers::build::{function_expr, ret as ret_stmt};
    let arena = Bump::new();
    let iife = call(
        &arena,
        function_expr(&arena, &[], vec![ret_stmt(number(1.0))]),
        vec![],
    );
    let unit = program(vec![var_stmt(&arena, "one", iife)]);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(
        output,
        indoc! {r#"
            var one = (function () {
                return 1;
            })();
        "#}
    );
}
