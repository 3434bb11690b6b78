//! Property tests for the order resolver.

use autoform::{FieldCollection, FormDeclaration, Relation};
use autoform_test_helpers::{assemble, field_order, schema, with_directive};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

fn directive() -> impl Strategy<Value = (usize, bool, usize)> {
    (0..NAMES.len() + 2, any::<bool>(), 0..NAMES.len() + 2)
}

fn name(index: usize) -> &'static str {
    NAMES.get(index).copied().unwrap_or("ghost")
}

fn relation(before: bool) -> Relation {
    if before {
        Relation::Before
    } else {
        Relation::After
    }
}

proptest! {
    #[test]
    fn moves_permute_without_loss(directives in prop::collection::vec(directive(), 0..12)) {
        let mut base = schema("example.Base", &NAMES);
        for (field, before, anchor) in &directives {
            base = with_directive(base, name(*field), relation(*before), name(*anchor));
        }
        let form = assemble(FormDeclaration::new().with_schema(base));

        let mut order = field_order(&form);
        order.sort();
        prop_assert_eq!(order, NAMES.to_vec());
    }

    #[test]
    fn directive_places_field_next_to_anchor(field in 0..NAMES.len(), anchor in 0..NAMES.len(), before in any::<bool>()) {
        prop_assume!(field != anchor);
        let base = with_directive(schema("example.Base", &NAMES), name(field), relation(before), name(anchor));
        let form = assemble(FormDeclaration::new().with_schema(base));

        let f = form.fields.index_of(name(field));
        let a = form.fields.index_of(name(anchor));
        let expected = if before { a.map(|a| a - 1) } else { a.map(|a| a + 1) };
        prop_assert_eq!(f, expected);
    }

    #[test]
    fn unknown_names_never_reorder(anchor in 0..NAMES.len(), before in any::<bool>()) {
        let mut collection: FieldCollection = schema("example.Base", &NAMES)
            .fields
            .into_iter()
            .map(autoform::FormField::new)
            .collect();
        prop_assert!(!collection.move_relative("ghost", relation(before), name(anchor)));
        prop_assert!(!collection.move_relative(name(anchor), relation(before), "ghost"));
        prop_assert_eq!(collection.names().collect::<Vec<_>>(), NAMES.to_vec());
    }
}
