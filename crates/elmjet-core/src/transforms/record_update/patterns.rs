//! The closed set of compiler-emitted shapes this transform recognizes.
//!
//! Recognition is by exact identifier text; the generated code has no richer
//! type information to key on. Keeping the names and predicates in one place
//! keeps both passes honest about what they match and lets the recognition
//! logic be tested apart from tree walking.

use crate::ast::{Expression, ExpressionKind};

/// The runtime helper every record update is funneled through.
pub const UPDATE_HELPER: &str = "_Utils_update";

/// First field of compiler-generated variant/union values. Literals tagged
/// with it follow a different runtime contract and are never specialized.
pub const VARIANT_TAG_FIELD: &str = "$";

/// Per-shape clone method attached to generated constructors.
pub const CLONE_METHOD: &str = "$clone";

/// Scoped temporary bound to the fresh clone inside a rewritten update.
pub const CLONE_TEMP: &str = "_r";

/// Prefix of minted constructor identifiers (`Record1`, `Record2`, ...).
pub const CONSTRUCTOR_PREFIX: &str = "Record";

/// An update call-site: the update helper called with exactly two arguments.
pub fn is_update_call(callee: &Expression<'_>, args: &[Expression<'_>]) -> bool {
    matches!(callee.kind, ExpressionKind::Identifier(UPDATE_HELPER)) && args.len() == 2
}

/// A record literal: non-empty, and not a variant value. Eligibility beyond
/// this (static keys, touched-field intersection) is the specializer's call.
pub fn is_record_literal(expr: &Expression<'_>) -> bool {
    let ExpressionKind::Object(properties) = &expr.kind else {
        return false;
    };
    match properties.first() {
        None => false,
        Some(first) => first.static_key() != Some(VARIANT_TAG_FIELD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, ObjectProperty};
    use crate::span::Span;
    use bumpalo::Bump;

    fn ident<'a>(arena: &'a Bump, name: &str) -> Expression<'a> {
        Expression::synthesized(ExpressionKind::Identifier(arena.alloc_str(name)))
    }

    fn number_prop<'a>(arena: &'a Bump, key: &str, n: f64) -> ObjectProperty<'a> {
        ObjectProperty::Property {
            key: arena.alloc_str(key),
            value: arena.alloc(Expression::synthesized(ExpressionKind::Literal(
                Literal::Number(n),
            ))),
            span: Span::dummy(),
        }
    }

    #[test]
    fn update_call_requires_helper_name_and_arity() {
        let arena = Bump::new();
        let helper = ident(&arena, UPDATE_HELPER);
        let other = ident(&arena, "_Utils_eq");
        let two_args = [ident(&arena, "a"), ident(&arena, "b")];
        let one_arg = [ident(&arena, "a")];

        assert!(is_update_call(&helper, &two_args));
        assert!(!is_update_call(&helper, &one_arg));
        assert!(!is_update_call(&other, &two_args));
    }

    #[test]
    fn variant_values_are_not_record_literals() {
        let arena = Bump::new();
        let variant = Expression::synthesized(ExpressionKind::Object(arena.alloc_slice_clone(
            &[
                number_prop(&arena, VARIANT_TAG_FIELD, 0.0),
                number_prop(&arena, "a", 1.0),
            ],
        )));
        let record = Expression::synthesized(ExpressionKind::Object(
            arena.alloc_slice_clone(&[number_prop(&arena, "a", 1.0)]),
        ));
        let empty = Expression::synthesized(ExpressionKind::Object(&[]));

        assert!(!is_record_literal(&variant));
        assert!(is_record_literal(&record));
        assert!(!is_record_literal(&empty));
    }
}
