//! Arena AST builders.
//!
//! Thin factory functions over the core AST so tests read like the code
//! they construct. Everything is allocated into the caller's arena;
//! identifier and field names are copied in with `alloc_str`.

use bumpalo::Bump;
use elmjet_core::ast::{
    BinaryOp, Block, Expression, ExpressionKind, FunctionDeclaration, FunctionExpression,
    IfStatement, Literal, MutableProgram, ObjectProperty, ReturnStatement, Statement,
    VariableDeclaration,
};
use elmjet_core::span::Span;
use elmjet_core::transforms::record_update::patterns::UPDATE_HELPER;

pub fn ident<'a>(arena: &'a Bump, name: &str) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Identifier(arena.alloc_str(name)))
}

pub fn this_expr<'a>() -> Expression<'a> {
    Expression::synthesized(ExpressionKind::This)
}

pub fn number<'a>(n: f64) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Literal(Literal::Number(n)))
}

pub fn string<'a>(arena: &'a Bump, s: &str) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Literal(Literal::String(arena.alloc_str(s))))
}

pub fn boolean<'a>(b: bool) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Literal(Literal::Boolean(b)))
}

pub fn member<'a>(arena: &'a Bump, object: Expression<'a>, name: &str) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Member(
        arena.alloc(object),
        arena.alloc_str(name),
    ))
}

pub fn call<'a>(
    arena: &'a Bump,
    callee: Expression<'a>,
    args: Vec<Expression<'a>>,
) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Call(
        arena.alloc(callee),
        arena.alloc_slice_clone(&args),
    ))
}

pub fn construct<'a>(
    arena: &'a Bump,
    callee: Expression<'a>,
    args: Vec<Expression<'a>>,
) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::New(
        arena.alloc(callee),
        arena.alloc_slice_clone(&args),
    ))
}

pub fn assign<'a>(arena: &'a Bump, target: Expression<'a>, value: Expression<'a>) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Assign(
        arena.alloc(target),
        arena.alloc(value),
    ))
}

pub fn binary<'a>(
    arena: &'a Bump,
    op: BinaryOp,
    left: Expression<'a>,
    right: Expression<'a>,
) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Binary(
        op,
        arena.alloc(left),
        arena.alloc(right),
    ))
}

pub fn conditional<'a>(
    arena: &'a Bump,
    condition: Expression<'a>,
    consequent: Expression<'a>,
    alternate: Expression<'a>,
) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Conditional(
        arena.alloc(condition),
        arena.alloc(consequent),
        arena.alloc(alternate),
    ))
}

/// `{ k1: v1, k2: v2, ... }` with statically named properties.
pub fn object<'a>(arena: &'a Bump, properties: Vec<(&str, Expression<'a>)>) -> Expression<'a> {
    let props: Vec<ObjectProperty<'a>> = properties
        .into_iter()
        .map(|(key, value)| ObjectProperty::Property {
            key: arena.alloc_str(key),
            value: arena.alloc(value),
            span: Span::dummy(),
        })
        .collect();
    Expression::synthesized(ExpressionKind::Object(arena.alloc_slice_clone(&props)))
}

/// An object literal from explicit properties, for computed-key cases.
pub fn object_props<'a>(arena: &'a Bump, props: Vec<ObjectProperty<'a>>) -> Expression<'a> {
    Expression::synthesized(ExpressionKind::Object(arena.alloc_slice_clone(&props)))
}

pub fn computed_prop<'a>(
    arena: &'a Bump,
    key: Expression<'a>,
    value: Expression<'a>,
) -> ObjectProperty<'a> {
    ObjectProperty::Computed {
        key: arena.alloc(key),
        value: arena.alloc(value),
        span: Span::dummy(),
    }
}

pub fn static_prop<'a>(arena: &'a Bump, key: &str, value: Expression<'a>) -> ObjectProperty<'a> {
    ObjectProperty::Property {
        key: arena.alloc_str(key),
        value: arena.alloc(value),
        span: Span::dummy(),
    }
}

/// `_Utils_update(base, { overrides... })` — the idiom the optimizer
/// rewrites.
pub fn update_call<'a>(
    arena: &'a Bump,
    base: Expression<'a>,
    overrides: Vec<(&str, Expression<'a>)>,
) -> Expression<'a> {
    let map = object(arena, overrides);
    call(arena, ident(arena, UPDATE_HELPER), vec![base, map])
}

pub fn var_stmt<'a>(arena: &'a Bump, name: &str, initializer: Expression<'a>) -> Statement<'a> {
    Statement::Variable(VariableDeclaration {
        name: arena.alloc_str(name),
        initializer,
        span: Span::dummy(),
    })
}

pub fn expr_stmt<'a>(expression: Expression<'a>) -> Statement<'a> {
    Statement::Expression(expression)
}

pub fn ret<'a>(value: Expression<'a>) -> Statement<'a> {
    Statement::Return(ReturnStatement {
        value: Some(value),
        span: Span::dummy(),
    })
}

pub fn func_decl<'a>(
    arena: &'a Bump,
    name: &str,
    params: &[&str],
    body: Vec<Statement<'a>>,
) -> Statement<'a> {
    let params: Vec<&'a str> = params.iter().map(|p| &*arena.alloc_str(p)).collect();
    Statement::Function(FunctionDeclaration {
        name: arena.alloc_str(name),
        params: arena.alloc_slice_clone(&params),
        body: block(arena, body),
        span: Span::dummy(),
    })
}

pub fn function_expr<'a>(
    arena: &'a Bump,
    params: &[&str],
    body: Vec<Statement<'a>>,
) -> Expression<'a> {
    let params: Vec<&'a str> = params.iter().map(|p| &*arena.alloc_str(p)).collect();
    Expression::synthesized(ExpressionKind::Function(arena.alloc(FunctionExpression {
        params: arena.alloc_slice_clone(&params),
        body: block(arena, body),
    })))
}

pub fn if_stmt<'a>(
    arena: &'a Bump,
    condition: Expression<'a>,
    then_block: Vec<Statement<'a>>,
    else_block: Option<Vec<Statement<'a>>>,
) -> Statement<'a> {
    Statement::If(IfStatement {
        condition,
        then_block: block(arena, then_block),
        else_block: else_block.map(|stmts| block(arena, stmts)),
        span: Span::dummy(),
    })
}

pub fn block<'a>(arena: &'a Bump, statements: Vec<Statement<'a>>) -> Block<'a> {
    Block {
        statements: arena.alloc_slice_clone(&statements),
        span: Span::dummy(),
    }
}

pub fn program<'a>(statements: Vec<Statement<'a>>) -> MutableProgram<'a> {
    MutableProgram::new(statements)
}
