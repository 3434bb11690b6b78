//! Serialization handlers for form metadata.
//!
//! Metadata is exchanged with an external attribute record (typically a
//! `<field>` element of a schema model document) through namespaced string
//! attributes. Two independent handlers are provided:
//! - **Form** ([`FormSchema`]): `widget`, `mode`, `omitted`, `before`,
//!   `after` in [`FORM_NAMESPACE`](crate::FORM_NAMESPACE)
//! - **Security** ([`SecuritySchema`]): `read-permission`,
//!   `write-permission` in [`SECURITY_NAMESPACE`](crate::SECURITY_NAMESPACE)
//!
//! Attribute names use Clark notation, `{namespace}local`; see [`ns`].

pub mod form;
pub mod security;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metadata::MetadataStore;
use crate::model::FieldDescriptor;

pub use form::FormSchema;
pub use security::SecuritySchema;

/// An external record holding namespaced string attributes.
pub trait AttributeNode {
    /// Returns the value of the attribute `name`, if set.
    fn get(&self, name: &str) -> Option<&str>;

    /// Sets the attribute `name` to `value`.
    fn set(&mut self, name: &str, value: &str);
}

/// Reads and writes one namespace of field metadata.
pub trait FieldMetadataHandler {
    /// Namespace URI of the attributes this handler owns.
    fn namespace(&self) -> &'static str;

    /// Conventional prefix bound to [`namespace`](Self::namespace) in model
    /// documents.
    fn prefix(&self) -> &'static str;

    /// Records the metadata found on `node` for `field` into `store`.
    /// Absent attributes leave `store` untouched.
    fn read(&self, node: &dyn AttributeNode, store: &mut MetadataStore, field: &FieldDescriptor);

    /// Writes the metadata recorded for `field` in `store` onto `node`.
    /// Nothing is written for fields that were never configured.
    fn write(&self, node: &mut dyn AttributeNode, store: &MetadataStore, field: &FieldDescriptor);
}

/// Returns every built-in handler: form first, then security.
#[must_use]
pub fn handlers() -> [&'static dyn FieldMetadataHandler; 2] {
    [&FormSchema, &SecuritySchema]
}

/// Formats a namespaced attribute name in Clark notation.
#[must_use]
pub fn ns(local: &str, namespace: &str) -> String {
    format!("{{{namespace}}}{local}")
}

/// Expands a `prefix:local` attribute name to Clark notation using the
/// built-in handler prefixes. Names already in Clark notation, unprefixed
/// names and unknown prefixes are returned unchanged.
#[must_use]
pub fn expand_attribute_name(name: &str) -> String {
    if name.starts_with('{') {
        return name.to_owned();
    }
    if let Some((prefix, local)) = name.split_once(':') {
        if let Some(handler) = handlers().into_iter().find(|h| h.prefix() == prefix) {
            return ns(local, handler.namespace());
        }
    }
    name.to_owned()
}

/// Runs every built-in handler's `read` over `node`.
pub fn read_field(node: &dyn AttributeNode, store: &mut MetadataStore, field: &FieldDescriptor) {
    for handler in handlers() {
        handler.read(node, store, field);
    }
}

/// Runs every built-in handler's `write` and returns the resulting record.
#[must_use]
pub fn write_field(store: &MetadataStore, field: &FieldDescriptor) -> Element {
    let mut node = Element::new("field");
    node.set("name", &field.name);
    for handler in handlers() {
        handler.write(&mut node, store, field);
    }
    node
}

/// Reads a non-empty attribute value.
pub(crate) fn attribute<'a>(
    node: &'a dyn AttributeNode,
    local: &str,
    namespace: &str,
) -> Option<&'a str> {
    node.get(&ns(local, namespace)).filter(|v| !v.is_empty())
}

/// An in-memory attribute record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element tag.
    pub tag: String,
    /// Attributes in insertion order.
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl Element {
    /// Creates an element with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
        }
    }
}

impl AttributeNode for Element {
    fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn set(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FORM_NAMESPACE, SECURITY_NAMESPACE};

    #[test]
    fn clark_notation() {
        assert_eq!(
            ns("widget", FORM_NAMESPACE),
            "{http://namespaces.plone.org/supermodel/form}widget"
        );
    }

    #[test]
    fn expands_handler_prefixes() {
        assert_eq!(expand_attribute_name("form:mode"), ns("mode", FORM_NAMESPACE));
        assert_eq!(
            expand_attribute_name("security:read-permission"),
            ns("read-permission", SECURITY_NAMESPACE)
        );
        assert_eq!(expand_attribute_name("other:mode"), "other:mode");
        assert_eq!(expand_attribute_name("name"), "name");
    }

    #[test]
    fn handlers_have_distinct_namespaces() {
        let [form, security] = handlers();
        assert_eq!(form.prefix(), "form");
        assert_eq!(security.prefix(), "security");
        assert_ne!(form.namespace(), security.namespace());
    }
}
