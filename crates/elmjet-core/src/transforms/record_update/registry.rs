//! Shape-keyed constructor registry.
//!
//! A shape key is the comma-joined concatenation of a literal's field names
//! in declared order. The key is order-sensitive: `{a, b}` and `{b, a}` are
//! distinct shapes and mint distinct constructors. The first literal
//! registered under a key fixes the field order for the generated
//! constructor and every later call-site sharing the key.

use super::patterns::CONSTRUCTOR_PREFIX;
use bumpalo::Bump;
use indexmap::IndexMap;

/// One registered field shape.
#[derive(Debug)]
pub struct RecordShape<'a> {
    /// Minted constructor identifier (`Record1`, `Record2`, ...).
    pub name: &'a str,
    /// Field names in the order fixed at registration.
    pub fields: Vec<&'a str>,
}

/// Unit-scoped mapping from shape key to minted constructor.
///
/// Iteration order is registration order, which is also ascending identifier
/// order; the synthesizer relies on that for deterministic output. A
/// registry must never be shared across compilation units.
#[derive(Debug, Default)]
pub struct RecordRegistry<'a> {
    counter: u32,
    map: IndexMap<String, RecordShape<'a>>,
}

impl<'a> RecordRegistry<'a> {
    pub fn new() -> Self {
        Self {
            counter: 0,
            map: IndexMap::new(),
        }
    }

    /// Returns the constructor identifier for the given field shape,
    /// minting a fresh one on first sight. Re-registration of a known key
    /// is idempotent and has no side effect.
    pub fn register(&mut self, fields: &[&'a str], arena: &'a Bump) -> &'a str {
        let key = fields.join(",");
        if let Some(shape) = self.map.get(&key) {
            return shape.name;
        }

        self.counter += 1;
        let name: &'a str = arena.alloc_str(&format!("{}{}", CONSTRUCTOR_PREFIX, self.counter));
        self.map.insert(
            key,
            RecordShape {
                name,
                fields: fields.to_vec(),
            },
        );
        name
    }

    /// Registered shapes in registration order.
    pub fn shapes(&self) -> impl Iterator<Item = &RecordShape<'a>> {
        self.map.values()
    }

    /// Constructor identifier for an exact shape key, if registered.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).map(|shape| shape.name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mints_dense_identifiers_starting_at_one() {
        let arena = Bump::new();
        let mut registry = RecordRegistry::new();

        assert_eq!(registry.register(&["a", "b"], &arena), "Record1");
        assert_eq!(registry.register(&["x"], &arena), "Record2");
        assert_eq!(registry.register(&["a", "b", "c"], &arena), "Record3");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn reregistration_is_idempotent() {
        let arena = Bump::new();
        let mut registry = RecordRegistry::new();

        let first = registry.register(&["a", "b"], &arena);
        let second = registry.register(&["a", "b"], &arena);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn field_order_is_part_of_the_key() {
        let arena = Bump::new();
        let mut registry = RecordRegistry::new();

        let ab = registry.register(&["a", "b"], &arena);
        let ba = registry.register(&["b", "a"], &arena);

        assert_ne!(ab, ba);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn first_registration_fixes_field_order() {
        let arena = Bump::new();
        let mut registry = RecordRegistry::new();

        registry.register(&["b", "a"], &arena);
        let shape = registry.shapes().next().unwrap();
        assert_eq!(shape.fields, vec!["b", "a"]);
    }

    #[test]
    fn shapes_iterate_in_registration_order() {
        let arena = Bump::new();
        let mut registry = RecordRegistry::new();

        registry.register(&["x"], &arena);
        registry.register(&["y"], &arena);
        registry.register(&["x"], &arena);

        let names: Vec<_> = registry.shapes().map(|s| s.name).collect();
        assert_eq!(names, vec!["Record1", "Record2"]);
    }

    proptest! {
        /// However shapes arrive, identifiers stay dense, registration stays
        /// idempotent, and every lookup agrees with what register returned.
        #[test]
        fn identifiers_stay_dense_and_stable(
            shapes in proptest::collection::vec(
                proptest::collection::vec("[a-z]{1,6}", 1..5),
                1..20,
            )
        ) {
            let arena = Bump::new();
            let mut registry = RecordRegistry::new();
            let mut minted: Vec<(String, &str)> = Vec::new();

            for shape in &shapes {
                let fields: Vec<&str> =
                    shape.iter().map(|f| &*arena.alloc_str(f)).collect();
                let name = registry.register(&fields, &arena);
                let key = fields.join(",");
                let seen = minted.iter().find(|entry| entry.0 == key).map(|entry| entry.1);
                match seen {
                    Some(seen) => prop_assert_eq!(name, seen),
                    None => minted.push((key, name)),
                }
            }

            prop_assert_eq!(minted.len(), registry.len());
            for (index, (key, name)) in minted.iter().enumerate() {
                prop_assert_eq!(registry.get(key), Some(*name));
                let expected = format!("Record{}", index + 1);
                prop_assert_eq!(*name, expected.as_str());
            }
        }
    }
}
