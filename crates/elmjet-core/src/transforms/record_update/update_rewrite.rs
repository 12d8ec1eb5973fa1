//! Pass 1: update call-site rewriting and touched-field collection.
//!
//! Every `_Utils_update(base, { f1: e1, ... })` call becomes
//!
//! ```text
//! (function () {
//!     var _r = <base>.$clone();
//!     _r.f1 = e1;
//!     ...
//!     return _r;
//! })()
//! ```
//!
//! valid wherever the original call appeared. The overridden field names are
//! accumulated into the unit's touched-field set, which Pass 2 consults.
//! Traversal is post-order, so a chained update sees its inner update
//! already rewritten and clones that block's result.
//!
//! The `$clone` method the rewrite calls does not exist textually until the
//! synthesizer prepends the generated constructors; function-declaration
//! hoisting makes the forward reference legal.

use super::patterns::{self, CLONE_METHOD, CLONE_TEMP};
use crate::ast::{
    Block, Expression, ExpressionKind, FunctionExpression, ObjectProperty, ReturnStatement,
    RewriteVisitor, Statement, VariableDeclaration,
};
use crate::error::TransformError;
use crate::span::Span;
use bumpalo::Bump;
use rustc_hash::FxHashSet;

pub struct UpdateRewriter<'s, 'a> {
    touched: &'s mut FxHashSet<&'a str>,
    /// Call-sites rewritten so far, for the pass summary.
    pub rewritten: usize,
}

impl<'s, 'a> UpdateRewriter<'s, 'a> {
    pub fn new(touched: &'s mut FxHashSet<&'a str>) -> Self {
        Self {
            touched,
            rewritten: 0,
        }
    }
}

impl<'s, 'a> RewriteVisitor<'a> for UpdateRewriter<'s, 'a> {
    fn rewrite_expr(
        &mut self,
        expr: &mut Expression<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError> {
        let args: &'a [Expression<'a>] = match &expr.kind {
            ExpressionKind::Call(callee, args) if patterns::is_update_call(callee, args) => *args,
            _ => return Ok(false),
        };
        // Arity was checked by the pattern; argument 0 is the (already
        // rewritten) base value, argument 1 the override map.
        let base = &args[0];
        let overrides = &args[1];

        let ExpressionKind::Object(properties) = &overrides.kind else {
            return Err(TransformError::UnsupportedOverrideArgument {
                span: overrides.span,
            });
        };
        let properties: &'a [ObjectProperty<'a>] = *properties;

        let mut statements = Vec::with_capacity(properties.len() + 2);

        // var _r = <base>.$clone();
        let clone_callee = Expression::synthesized(ExpressionKind::Member(base, CLONE_METHOD));
        statements.push(Statement::Variable(VariableDeclaration {
            name: CLONE_TEMP,
            initializer: Expression::synthesized(ExpressionKind::Call(
                arena.alloc(clone_callee),
                &[],
            )),
            span: Span::dummy(),
        }));

        // _r.f = e; in declared order — override expressions may have side
        // effects, so their relative order must match the source.
        for property in properties {
            match property {
                ObjectProperty::Property { key, value, .. } => {
                    self.touched.insert(*key);
                    let target = Expression::synthesized(ExpressionKind::Member(
                        arena.alloc(Expression::synthesized(ExpressionKind::Identifier(
                            CLONE_TEMP,
                        ))),
                        *key,
                    ));
                    statements.push(Statement::Expression(Expression::synthesized(
                        ExpressionKind::Assign(arena.alloc(target), *value),
                    )));
                }
                ObjectProperty::Computed { span, .. } => {
                    return Err(TransformError::ComputedOverrideKey { span: *span });
                }
            }
        }

        statements.push(Statement::Return(ReturnStatement {
            value: Some(Expression::synthesized(ExpressionKind::Identifier(
                CLONE_TEMP,
            ))),
            span: Span::dummy(),
        }));

        let body = Block {
            statements: arena.alloc_slice_clone(&statements),
            span: Span::dummy(),
        };
        let function = Expression::synthesized(ExpressionKind::Function(
            arena.alloc(FunctionExpression { params: &[], body }),
        ));
        expr.kind = ExpressionKind::Call(arena.alloc(function), &[]);

        self.rewritten += 1;
        Ok(true)
    }
}
