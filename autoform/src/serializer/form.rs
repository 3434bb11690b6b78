//! Presentation metadata handler: `widget`, `mode`, `omitted`, `before`,
//! `after`.

use crate::metadata::{Directive, MetadataStore, Relation};
use crate::model::{FieldDescriptor, FORM_NAMESPACE};

use super::{attribute, ns, AttributeNode, FieldMetadataHandler};

/// Reads and writes the presentation attributes of a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSchema;

impl FieldMetadataHandler for FormSchema {
    fn namespace(&self) -> &'static str {
        FORM_NAMESPACE
    }

    fn prefix(&self) -> &'static str {
        "form"
    }

    fn read(&self, node: &dyn AttributeNode, store: &mut MetadataStore, field: &FieldDescriptor) {
        let name = field.name.as_str();

        if let Some(widget) = attribute(node, "widget", FORM_NAMESPACE) {
            store.widgets_mut().insert(name.to_owned(), widget.to_owned());
        }
        if let Some(mode) = attribute(node, "mode", FORM_NAMESPACE) {
            store.modes_mut().insert(name.to_owned(), mode.to_owned());
        }
        if let Some(omitted) = attribute(node, "omitted", FORM_NAMESPACE) {
            store.omitted_mut().insert(name.to_owned(), omitted.to_owned());
        }

        // One directive per read; `before` wins over `after`.
        let before = attribute(node, "before", FORM_NAMESPACE);
        let after = attribute(node, "after", FORM_NAMESPACE);
        let directive = match (before, after) {
            (Some(anchor), _) => Some(Directive::new(name, Relation::Before, anchor)),
            (None, Some(anchor)) => Some(Directive::new(name, Relation::After, anchor)),
            (None, None) => None,
        };
        if let Some(directive) = directive {
            store.order_mut().push(directive);
        }
    }

    fn write(&self, node: &mut dyn AttributeNode, store: &MetadataStore, field: &FieldDescriptor) {
        let name = field.name.as_str();

        if let Some(widget) = store.widget_for(name) {
            node.set(&ns("widget", FORM_NAMESPACE), widget);
        }
        if let Some(mode) = store.mode_for(name) {
            node.set(&ns("mode", FORM_NAMESPACE), mode);
        }
        if let Some(omitted) = store.omitted_for(name) {
            node.set(&ns("omitted", FORM_NAMESPACE), omitted);
        }
        for directive in store.directives_for(name) {
            node.set(&ns(directive.relation.as_str(), FORM_NAMESPACE), &directive.anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::Element;

    fn field(name: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, name)
    }

    fn attr(local: &str) -> String {
        ns(local, FORM_NAMESPACE)
    }

    #[test]
    fn read_records_every_attribute() {
        let mut node = Element::new("field");
        node.set(&attr("widget"), "SomeWidget");
        node.set(&attr("mode"), "hidden");
        node.set(&attr("omitted"), "true");
        node.set(&attr("before"), "somefield");

        let mut store = MetadataStore::default();
        FormSchema.read(&node, &mut store, &field("dummy"));

        assert_eq!(store.widget_for("dummy"), Some("SomeWidget"));
        assert_eq!(store.mode_for("dummy"), Some("hidden"));
        assert_eq!(store.omitted_for("dummy"), Some("true"));
        assert_eq!(
            store.order(),
            Some(&[Directive::new("dummy", Relation::Before, "somefield")][..])
        );
    }

    #[test]
    fn before_wins_over_after() {
        let mut node = Element::new("field");
        node.set(&attr("before"), "x");
        node.set(&attr("after"), "y");

        let mut store = MetadataStore::default();
        FormSchema.read(&node, &mut store, &field("dummy"));

        assert_eq!(
            store.order(),
            Some(&[Directive::new("dummy", Relation::Before, "x")][..])
        );
    }

    #[test]
    fn after_only() {
        let mut node = Element::new("field");
        node.set(&attr("after"), "y");

        let mut store = MetadataStore::default();
        FormSchema.read(&node, &mut store, &field("dummy"));

        let mut out = Element::new("field");
        FormSchema.write(&mut out, &store, &field("dummy"));
        assert_eq!(out.get(&attr("after")), Some("y"));
        assert_eq!(out.get(&attr("before")), None);
    }

    #[test]
    fn empty_attribute_is_absent() {
        let mut node = Element::new("field");
        node.set(&attr("widget"), "");

        let mut store = MetadataStore::default();
        FormSchema.read(&node, &mut store, &field("dummy"));
        assert!(store.widgets().is_none());
    }

    #[test]
    fn write_skips_other_fields_directives() {
        let mut store = MetadataStore::default();
        store.order_mut().push(Directive::new("other", Relation::Before, "x"));

        let mut out = Element::new("field");
        FormSchema.write(&mut out, &store, &field("dummy"));
        assert!(out.attributes.is_empty());
    }
}
