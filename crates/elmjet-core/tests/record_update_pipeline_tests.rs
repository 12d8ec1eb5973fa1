//! The full record-update transform: Pass 1, Pass 2, synthesis, prepend.

use bumpalo::Bump;
use elmjet_core::codegen::CodeGenerator;
use elmjet_core::config::TransformOptions;
use elmjet_core::{MutableProgram, TransformPipeline};
use elmjet_test_helpers::build::{ident, number, object, program, update_call, var_stmt, boolean};
use indoc::indoc;

/// `var initial = { count: 0, flag: true }; var next = _Utils_update(initial, { count: 1 });`
fn counter_unit<'a>(arena: &'a Bump) -> MutableProgram<'a> {
    let initial = object(arena, vec![("count", number(0.0)), ("flag", boolean(true))]);
    let update = update_call(arena, ident(arena, "initial"), vec![("count", number(1.0))]);
    program(vec![
        var_stmt(arena, "initial", initial),
        var_stmt(arena, "next", update),
    ])
}

#[test]
fn rewrites_a_whole_unit() {
    let arena = Bump::new();
    let mut unit = counter_unit(&arena);

    let changed = TransformPipeline::default().run(&mut unit, &arena).unwrap();
    assert!(changed);

    let output = CodeGenerator::new().generate(&unit);
    assert_eq!(
        output,
        indoc! {r#"
            function Record1(count, flag) {
                this.count = count;
                this.flag = flag;
            }
            Record1.prototype.$clone = function () {
                return new Record1(this.count, this.flag);
            };
            var initial = new Record1(0, true);
            var next = (function () {
                var _r = initial.$clone();
                _r.count = 1;
                return _r;
            })();
        "#}
    );
}

#[test]
fn synthesized_declarations_precede_all_existing_statements() {
    let arena = Bump::new();
    let mut unit = counter_unit(&arena);

    TransformPipeline::default().run(&mut unit, &arena).unwrap();

    use elmjet_core::ast::Statement;
    let Statement::Function(decl) = &unit.statements[0] else {
        panic!("expected the generated constructor first");
    };
    assert_eq!(decl.name, "Record1");
    assert_eq!(decl.params, &["count", "flag"][..]);
    assert!(matches!(unit.statements[1], Statement::Expression(_)));
    assert!(matches!(unit.statements[2], Statement::Variable(_)));
}

#[test]
fn constructor_parameters_follow_literal_declaration_order() {
    let arena = Bump::new();
    let literal = object(
        &arena,
        vec![("a", number(1.0)), ("b", number(2.0)), ("c", number(3.0))],
    );
    let update = update_call(&arena, ident(&arena, "rec"), vec![("b", number(9.0))]);
    let mut unit = program(vec![
        var_stmt(&arena, "rec", literal),
        var_stmt(&arena, "next", update),
    ]);

    TransformPipeline::default().run(&mut unit, &arena).unwrap();

    let output = CodeGenerator::new().generate(&unit);
    assert!(output.contains("function Record1(a, b, c) {"));
    assert!(output.contains("var rec = new Record1(1, 2, 3);"));
    assert!(output.contains("return new Record1(this.a, this.b, this.c);"));
}

#[test]
fn runs_are_deterministic() {
    let arena_one = Bump::new();
    let arena_two = Bump::new();
    let mut first = counter_unit(&arena_one);
    let mut second = counter_unit(&arena_two);

    TransformPipeline::default().run(&mut first, &arena_one).unwrap();
    TransformPipeline::default()
        .run(&mut second, &arena_two)
        .unwrap();

    assert_eq!(
        CodeGenerator::new().generate(&first),
        CodeGenerator::new().generate(&second)
    );
}

#[test]
fn transformed_unit_is_a_fixed_point() {
    let arena = Bump::new();
    let mut unit = counter_unit(&arena);

    TransformPipeline::default().run(&mut unit, &arena).unwrap();
    let after_first = CodeGenerator::new().generate(&unit);

    let changed = TransformPipeline::default().run(&mut unit, &arena).unwrap();
    assert!(!changed);
    assert_eq!(CodeGenerator::new().generate(&unit), after_first);
}

#[test]
fn already_specialized_unit_is_untouched() {
    use elmjet_test_helpers::build::{
        assign, construct, expr_stmt, func_decl, function_expr, member, ret, this_expr,
    };
    let arena = Bump::new();
    let constructor = func_decl(
        &arena,
        "Record1",
        &["x"],
        vec![expr_stmt(assign(
            &arena,
            member(&arena, this_expr(), "x"),
            ident(&arena, "x"),
        ))],
    );
    let clone_fn = function_expr(
        &arena,
        &[],
        vec![ret(construct(
            &arena,
            ident(&arena, "Record1"),
            vec![member(&arena, this_expr(), "x")],
        ))],
    );
    let prototype = expr_stmt(assign(
        &arena,
        member(
            &arena,
            member(&arena, ident(&arena, "Record1"), "prototype"),
            "$clone",
        ),
        clone_fn,
    ));
    let rec = var_stmt(
        &arena,
        "rec",
        construct(&arena, ident(&arena, "Record1"), vec![number(1.0)]),
    );
    let mut unit = program(vec![constructor, prototype, rec]);
    let before = CodeGenerator::new().generate(&unit);

    let changed = TransformPipeline::default().run(&mut unit, &arena).unwrap();

    assert!(!changed);
    assert_eq!(CodeGenerator::new().generate(&unit), before);
}

#[test]
fn registry_state_is_fresh_per_unit() {
    // Two units processed one after the other both start at Record1.
    let arena_one = Bump::new();
    let mut first = counter_unit(&arena_one);
    TransformPipeline::default().run(&mut first, &arena_one).unwrap();

    let arena_two = Bump::new();
    let literal = object(&arena_two, vec![("name", number(0.0))]);
    let update = update_call(
        &arena_two,
        ident(&arena_two, "rec"),
        vec![("name", number(1.0))],
    );
    let mut second = program(vec![
        var_stmt(&arena_two, "rec", literal),
        var_stmt(&arena_two, "next", update),
    ]);
    TransformPipeline::default()
        .run(&mut second, &arena_two)
        .unwrap();

    assert!(CodeGenerator::new().generate(&first).contains("Record1"));
    let second_output = CodeGenerator::new().generate(&second);
    assert!(second_output.contains("function Record1(name)"));
    assert!(!second_output.contains("Record2"));
}

#[test]
fn disabled_toggle_leaves_the_unit_alone() {
    let arena = Bump::new();
    let mut unit = counter_unit(&arena);
    let before = CodeGenerator::new().generate(&unit);

    let pipeline = TransformPipeline::new(TransformOptions::none());
    let changed = pipeline.run(&mut unit, &arena).unwrap();

    assert!(!changed);
    assert_eq!(CodeGenerator::new().generate(&unit), before);
}

#[test]
fn untouched_literals_survive_the_full_pipeline() {
    let arena = Bump::new();
    let touched_literal = object(&arena, vec![("count", number(0.0))]);
    let untouched_literal = object(&arena, vec![("x", number(1.0)), ("y", number(2.0))]);
    let update = update_call(&arena, ident(&arena, "rec"), vec![("count", number(1.0))]);
    let mut unit = program(vec![
        var_stmt(&arena, "rec", touched_literal),
        var_stmt(&arena, "point", untouched_literal),
        var_stmt(&arena, "next", update),
    ]);

    TransformPipeline::default().run(&mut unit, &arena).unwrap();

    let output = CodeGenerator::new().generate(&unit);
    assert!(output.contains("var rec = new Record1(0);"));
    assert!(output.contains("var point = { x: 1, y: 2 };"));
}
