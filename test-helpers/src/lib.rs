//! Test-only fixture builders for `autoform`.
//!
//! Not published. Integration tests use these to build schemas, attribute
//! records and declarations without repeating the boilerplate.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use autoform::serializer::{ns, AttributeNode, Element};
use autoform::{
    AutoFields, Directive, FieldDescriptor, FormDeclaration, Relation, Schema, FORM_NAMESPACE,
    SECURITY_NAMESPACE,
};

/// A descriptor whose title equals its name.
#[must_use]
pub fn field(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, name)
}

/// A schema with the given identifier and field names.
#[must_use]
pub fn schema(identifier: &str, fields: &[&str]) -> Schema {
    fields
        .iter()
        .fold(Schema::new(identifier), |s, name| s.with_field(field(name)))
}

/// Adds an ordering directive to `schema`.
#[must_use]
pub fn with_directive(mut schema: Schema, field: &str, relation: Relation, anchor: &str) -> Schema {
    schema
        .metadata
        .order_mut()
        .push(Directive::new(field, relation, anchor));
    schema
}

/// An attribute record with the given form-namespace attributes.
#[must_use]
pub fn form_element(attributes: &[(&str, &str)]) -> Element {
    element(FORM_NAMESPACE, attributes)
}

/// An attribute record with the given security-namespace attributes.
#[must_use]
pub fn security_element(attributes: &[(&str, &str)]) -> Element {
    element(SECURITY_NAMESPACE, attributes)
}

fn element(namespace: &str, attributes: &[(&str, &str)]) -> Element {
    let mut node = Element::new("field");
    for (local, value) in attributes {
        node.set(&ns(local, namespace), value);
    }
    node
}

/// Value of a form-namespace attribute.
#[must_use]
pub fn form_attr<'a>(node: &'a Element, local: &str) -> Option<&'a str> {
    node.get(&ns(local, FORM_NAMESPACE))
}

/// Value of a security-namespace attribute.
#[must_use]
pub fn security_attr<'a>(node: &'a Element, local: &str) -> Option<&'a str> {
    node.get(&ns(local, SECURITY_NAMESPACE))
}

/// Assembles `declaration` and returns the built state.
#[must_use]
pub fn assemble(declaration: FormDeclaration) -> AutoFields {
    let mut form = AutoFields::new(Arc::new(declaration));
    form.update_fields_from_schemata();
    form
}

/// External names of the main field collection, in order.
#[must_use]
pub fn field_order(form: &AutoFields) -> Vec<String> {
    form.fields.names().map(str::to_owned).collect()
}

/// External names of the fields in the group identified by `name`, in
/// order, or `None` if there is no such group.
#[must_use]
pub fn group_order(form: &AutoFields, name: &str) -> Option<Vec<String>> {
    let index = form.find_group(name)?;
    Some(form.groups[index].fields.names().map(str::to_owned).collect())
}
