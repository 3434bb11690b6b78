//! Schema and field descriptor types.
//!
//! A [`Schema`] is an ordered set of [`FieldDescriptor`]s identified by a
//! qualified name. The field-type system itself is external: a descriptor
//! only carries what the form machinery needs to address and label a field.

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataStore;

/// Namespace of the presentation attributes (`widget`, `mode`, `omitted`,
/// `before`, `after`).
pub const FORM_NAMESPACE: &str = "http://namespaces.plone.org/supermodel/form";

/// Namespace of the security attributes (`read-permission`,
/// `write-permission`).
pub const SECURITY_NAMESPACE: &str = "http://namespaces.plone.org/supermodel/security";

/// An opaque field descriptor supplied by the field-type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name, unique within the owning schema.
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Optional help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field type identifier. Never interpreted by this crate.
    #[serde(default = "default_field_type", rename = "type")]
    pub field_type: String,
}

fn default_field_type() -> String {
    "TextLine".to_owned()
}

impl FieldDescriptor {
    /// Creates a descriptor with the default field type.
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: None,
            field_type: default_field_type(),
        }
    }

    /// Sets the field type identifier.
    #[must_use]
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named, ordered set of fields with its attached form metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Short name (e.g., `"IExtra"`). Used as the default field prefix and
    /// as the auto-group name.
    pub name: String,
    /// Fully qualified name (e.g., `"my.package.IExtra"`). Used as the
    /// fallback prefix on collisions.
    pub identifier: String,
    /// Documentation string.
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Form metadata attached to this schema.
    pub metadata: MetadataStore,
}

impl Schema {
    /// Creates an empty schema. The short name is the last dotted segment of
    /// `identifier`.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let name = short_name(&identifier).to_owned();
        Self {
            name,
            identifier,
            ..Self::default()
        }
    }

    /// Sets the documentation string.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name. Returns `None` if not found.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn short_name(identifier: &str) -> &str {
    identifier.rsplit('.').next().unwrap_or(identifier)
}
