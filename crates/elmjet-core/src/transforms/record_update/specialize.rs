//! Pass 2: object-literal specialization.
//!
//! A literal whose fields intersect the touched-field set is replaced with
//! an invocation of its shape's generated constructor:
//!
//! ```text
//! { a: e1, b: e2 }   =>   new Record1(e1, e2)
//! ```
//!
//! Values are passed positionally in the literal's own declared order. That
//! is only correct because the registry's shape key is itself
//! order-sensitive: a reused constructor identifier is guaranteed to have
//! been registered with the same field order.
//!
//! Literals that are never updated stay plain literals; specializing them
//! would buy nothing and cost a constructor.

use super::patterns;
use super::registry::RecordRegistry;
use crate::ast::{Expression, ExpressionKind, RewriteVisitor};
use crate::error::TransformError;
use bumpalo::Bump;
use rustc_hash::FxHashSet;

pub struct LiteralSpecializer<'s, 'a> {
    touched: &'s FxHashSet<&'a str>,
    registry: &'s mut RecordRegistry<'a>,
    /// Literals specialized so far, for the pass summary.
    pub specialized: usize,
}

impl<'s, 'a> LiteralSpecializer<'s, 'a> {
    pub fn new(touched: &'s FxHashSet<&'a str>, registry: &'s mut RecordRegistry<'a>) -> Self {
        Self {
            touched,
            registry,
            specialized: 0,
        }
    }
}

impl<'s, 'a> RewriteVisitor<'a> for LiteralSpecializer<'s, 'a> {
    fn rewrite_expr(
        &mut self,
        expr: &mut Expression<'a>,
        arena: &'a Bump,
    ) -> Result<bool, TransformError> {
        if !patterns::is_record_literal(expr) {
            return Ok(false);
        }
        let ExpressionKind::Object(properties) = &expr.kind else {
            return Ok(false);
        };
        let properties = *properties;

        // Computed field names have no static shape; leave the literal
        // alone.
        let mut fields = Vec::with_capacity(properties.len());
        for property in properties {
            match property.static_key() {
                Some(key) => fields.push(key),
                None => return Ok(false),
            }
        }

        if !fields.iter().any(|field| self.touched.contains(field)) {
            return Ok(false);
        }

        let constructor = self.registry.register(&fields, arena);
        let values: Vec<Expression<'a>> = properties
            .iter()
            .map(|property| property.value().clone())
            .collect();

        expr.kind = ExpressionKind::New(
            arena.alloc(Expression::synthesized(ExpressionKind::Identifier(
                constructor,
            ))),
            arena.alloc_slice_clone(&values),
        );

        self.specialized += 1;
        Ok(true)
    }
}
