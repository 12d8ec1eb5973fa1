//! Generic post-order rewrite walker.
//!
//! Both passes of the record-update transform share this traversal: children
//! are rewritten before the visitor inspects the parent, so nested
//! call-sites and literals are handled inside-out. A node the visitor
//! replaces is not revisited.
//!
//! The walker owns the arena discipline — clone a child into an owned
//! temporary, recurse, re-allocate into the arena only when something
//! changed — so visitors just pattern-match on already-rewritten nodes.

use crate::ast::{
    Block, Expression, ExpressionKind, MutableProgram, ObjectProperty, Statement,
};
use crate::error::TransformError;
use bumpalo::Bump;

/// Post-order expression rewriter.
///
/// `rewrite_expr` is invoked on every expression after its children have
/// been rewritten. Returning `Ok(true)` marks the tree changed; replacing
/// `expr.kind` wholesale is the expected way to rewrite a node.
pub trait RewriteVisitor<'a> {
    fn rewrite_expr(
        &mut self,
        expr: &mut Expression<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError>;
}

/// Rewrite every expression in the unit, post-order, returning whether
/// anything changed.
pub fn rewrite_program<'a, V: RewriteVisitor<'a>>(
    program: &mut MutableProgram<'a>,
    visitor: &mut V,
    arena: &'a Bump,
) -> Result<bool, TransformError> {
    let mut changed = false;
    for stmt in &mut program.statements {
        changed |= rewrite_statement(stmt, visitor, arena)?;
    }
    Ok(changed)
}

fn rewrite_statement<'a, V: RewriteVisitor<'a>>(
    stmt: &mut Statement<'a>,
    visitor: &mut V,
    arena: &'a Bump,
) -> Result<bool, TransformError> {
    match stmt {
        Statement::Variable(decl) => rewrite_expression(&mut decl.initializer, visitor, arena),
        Statement::Function(func) => rewrite_block(&mut func.body, visitor, arena),
        Statement::Expression(expr) => rewrite_expression(expr, visitor, arena),
        Statement::Return(ret) => match &mut ret.value {
            Some(value) => rewrite_expression(value, visitor, arena),
            None => Ok(false),
        },
        Statement::If(if_stmt) => {
            let mut changed = rewrite_expression(&mut if_stmt.condition, visitor, arena)?;
            changed |= rewrite_block(&mut if_stmt.then_block, visitor, arena)?;
            if let Some(else_block) = &mut if_stmt.else_block {
                changed |= rewrite_block(else_block, visitor, arena)?;
            }
            Ok(changed)
        }
    }
}

fn rewrite_block<'a, V: RewriteVisitor<'a>>(
    block: &mut Block<'a>,
    visitor: &mut V,
    arena: &'a Bump,
) -> Result<bool, TransformError> {
    let mut stmts: Vec<_> = block.statements.to_vec();
    let mut changed = false;
    for stmt in &mut stmts {
        changed |= rewrite_statement(stmt, visitor, arena)?;
    }
    if changed {
        block.statements = arena.alloc_slice_clone(&stmts);
    }
    Ok(changed)
}

fn rewrite_expression<'a, V: RewriteVisitor<'a>>(
    expr: &mut Expression<'a>,
    visitor: &mut V,
    arena: &'a Bump,
) -> Result<bool, TransformError> {
    let mut changed = match &expr.kind {
        ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) | ExpressionKind::This => {
            false
        }
        ExpressionKind::Member(obj, name) => {
            let name = *name;
            let mut new_obj = (**obj).clone();
            let changed = rewrite_expression(&mut new_obj, visitor, arena)?;
            if changed {
                expr.kind = ExpressionKind::Member(arena.alloc(new_obj), name);
            }
            changed
        }
        ExpressionKind::Call(callee, args) => {
            let mut new_callee = (**callee).clone();
            let mut changed = rewrite_expression(&mut new_callee, visitor, arena)?;
            let mut new_args: Vec<_> = args.to_vec();
            for arg in &mut new_args {
                changed |= rewrite_expression(arg, visitor, arena)?;
            }
            if changed {
                expr.kind = ExpressionKind::Call(
                    arena.alloc(new_callee),
                    arena.alloc_slice_clone(&new_args),
                );
            }
            changed
        }
        ExpressionKind::New(callee, args) => {
            let mut new_callee = (**callee).clone();
            let mut changed = rewrite_expression(&mut new_callee, visitor, arena)?;
            let mut new_args: Vec<_> = args.to_vec();
            for arg in &mut new_args {
                changed |= rewrite_expression(arg, visitor, arena)?;
            }
            if changed {
                expr.kind = ExpressionKind::New(
                    arena.alloc(new_callee),
                    arena.alloc_slice_clone(&new_args),
                );
            }
            changed
        }
        ExpressionKind::Object(properties) => {
            let mut new_props: Vec<_> = properties.to_vec();
            let mut changed = false;
            for prop in &mut new_props {
                match prop {
                    ObjectProperty::Property { key, value, span } => {
                        let key = *key;
                        let span = *span;
                        let mut new_val = (**value).clone();
                        if rewrite_expression(&mut new_val, visitor, arena)? {
                            *prop = ObjectProperty::Property {
                                key,
                                value: arena.alloc(new_val),
                                span,
                            };
                            changed = true;
                        }
                    }
                    ObjectProperty::Computed { key, value, span } => {
                        let span = *span;
                        let mut new_key = (**key).clone();
                        let mut new_val = (**value).clone();
                        let kc = rewrite_expression(&mut new_key, visitor, arena)?;
                        let vc = rewrite_expression(&mut new_val, visitor, arena)?;
                        if kc || vc {
                            *prop = ObjectProperty::Computed {
                                key: arena.alloc(new_key),
                                value: arena.alloc(new_val),
                                span,
                            };
                            changed = true;
                        }
                    }
                }
            }
            if changed {
                expr.kind = ExpressionKind::Object(arena.alloc_slice_clone(&new_props));
            }
            changed
        }
        ExpressionKind::Function(func) => {
            let mut new_func = (**func).clone();
            let changed = rewrite_block(&mut new_func.body, visitor, arena)?;
            if changed {
                expr.kind = ExpressionKind::Function(arena.alloc(new_func));
            }
            changed
        }
        ExpressionKind::Assign(target, value) => {
            let mut new_target = (**target).clone();
            let mut new_value = (**value).clone();
            let tc = rewrite_expression(&mut new_target, visitor, arena)?;
            let vc = rewrite_expression(&mut new_value, visitor, arena)?;
            if tc || vc {
                expr.kind =
                    ExpressionKind::Assign(arena.alloc(new_target), arena.alloc(new_value));
            }
            tc || vc
        }
        ExpressionKind::Binary(op, left, right) => {
            let op = *op;
            let mut new_left = (**left).clone();
            let mut new_right = (**right).clone();
            let lc = rewrite_expression(&mut new_left, visitor, arena)?;
            let rc = rewrite_expression(&mut new_right, visitor, arena)?;
            if lc || rc {
                expr.kind =
                    ExpressionKind::Binary(op, arena.alloc(new_left), arena.alloc(new_right));
            }
            lc || rc
        }
        ExpressionKind::Unary(op, operand) => {
            let op = *op;
            let mut new_operand = (**operand).clone();
            let changed = rewrite_expression(&mut new_operand, visitor, arena)?;
            if changed {
                expr.kind = ExpressionKind::Unary(op, arena.alloc(new_operand));
            }
            changed
        }
        ExpressionKind::Conditional(cond, cons, alt) => {
            let mut new_cond = (**cond).clone();
            let mut new_cons = (**cons).clone();
            let mut new_alt = (**alt).clone();
            let cc = rewrite_expression(&mut new_cond, visitor, arena)?;
            let sc = rewrite_expression(&mut new_cons, visitor, arena)?;
            let ac = rewrite_expression(&mut new_alt, visitor, arena)?;
            if cc || sc || ac {
                expr.kind = ExpressionKind::Conditional(
                    arena.alloc(new_cond),
                    arena.alloc(new_cons),
                    arena.alloc(new_alt),
                );
            }
            cc || sc || ac
        }
    };

    changed |= visitor.rewrite_expr(expr, arena)?;
    Ok(changed)
}
