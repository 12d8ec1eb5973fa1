//! Constructor and clone-capability synthesis.
//!
//! For every registered shape, in registration order:
//!
//! ```text
//! function Record1(a, b) {
//!     this.a = a;
//!     this.b = b;
//! }
//! Record1.prototype.$clone = function () {
//!     return new Record1(this.a, this.b);
//! };
//! ```
//!
//! The declarations are prepended ahead of all pre-existing statements, so
//! every specialized call-site that follows resolves. Pass 1's `$clone`
//! calls were emitted before these declarations existed textually; that is
//! legal because function declarations hoist within the unit.

use super::patterns::CLONE_METHOD;
use super::registry::{RecordRegistry, RecordShape};
use crate::ast::{
    Block, Expression, ExpressionKind, FunctionDeclaration, FunctionExpression, ReturnStatement,
    Statement,
};
use crate::span::Span;
use bumpalo::Bump;

const PROTOTYPE: &str = "prototype";

/// Build the declaration pair for every registered shape, in registration
/// order (ascending identifier number).
pub fn record_declarations<'a>(
    registry: &RecordRegistry<'a>,
    arena: &'a Bump,
) -> Vec<Statement<'a>> {
    let mut statements = Vec::with_capacity(registry.len() * 2);
    for shape in registry.shapes() {
        statements.push(constructor_declaration(shape, arena));
        statements.push(clone_assignment(shape, arena));
    }
    statements
}

/// `function RecordN(f1, ..., fk) { this.f1 = f1; ... }`
fn constructor_declaration<'a>(shape: &RecordShape<'a>, arena: &'a Bump) -> Statement<'a> {
    let mut body = Vec::with_capacity(shape.fields.len());
    for &field in &shape.fields {
        let target = Expression::synthesized(ExpressionKind::Member(
            arena.alloc(Expression::synthesized(ExpressionKind::This)),
            field,
        ));
        let value = Expression::synthesized(ExpressionKind::Identifier(field));
        body.push(Statement::Expression(Expression::synthesized(
            ExpressionKind::Assign(arena.alloc(target), arena.alloc(value)),
        )));
    }

    Statement::Function(FunctionDeclaration {
        name: shape.name,
        params: arena.alloc_slice_clone(&shape.fields),
        body: Block {
            statements: arena.alloc_slice_clone(&body),
            span: Span::dummy(),
        },
        span: Span::dummy(),
    })
}

/// `RecordN.prototype.$clone = function () { return new RecordN(this.f1, ...); };`
fn clone_assignment<'a>(shape: &RecordShape<'a>, arena: &'a Bump) -> Statement<'a> {
    let args: Vec<Expression<'a>> = shape
        .fields
        .iter()
        .map(|&field| {
            Expression::synthesized(ExpressionKind::Member(
                arena.alloc(Expression::synthesized(ExpressionKind::This)),
                field,
            ))
        })
        .collect();

    let construct = Expression::synthesized(ExpressionKind::New(
        arena.alloc(Expression::synthesized(ExpressionKind::Identifier(
            shape.name,
        ))),
        arena.alloc_slice_clone(&args),
    ));

    let body = Block {
        statements: arena.alloc_slice_clone(&[Statement::Return(ReturnStatement {
            value: Some(construct),
            span: Span::dummy(),
        })]),
        span: Span::dummy(),
    };

    let target = Expression::synthesized(ExpressionKind::Member(
        arena.alloc(Expression::synthesized(ExpressionKind::Member(
            arena.alloc(Expression::synthesized(ExpressionKind::Identifier(
                shape.name,
            ))),
            PROTOTYPE,
        ))),
        CLONE_METHOD,
    ));
    let function = Expression::synthesized(ExpressionKind::Function(
        arena.alloc(FunctionExpression {
            params: &[],
            body,
        }),
    ));

    Statement::Expression(Expression::synthesized(ExpressionKind::Assign(
        arena.alloc(target),
        arena.alloc(function),
    )))
}
