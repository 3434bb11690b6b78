//! JSON form definitions.
//!
//! A [`FormDefinition`] describes a form's schemata as plain data: every
//! field carries the namespaced attributes of its model element, which are
//! run through the metadata handlers when the definition is turned into a
//! [`FormDeclaration`].
//!
//! ```
//! let json = r#"{
//!     "schema": {
//!         "identifier": "example.IBase",
//!         "fields": [
//!             { "name": "a", "title": "A" },
//!             { "name": "b", "title": "B", "attributes": { "form:before": "a" } }
//!         ]
//!     }
//! }"#;
//! let declaration = autoform::FormDefinition::from_json(json)?.into_declaration()?;
//! let mut form = autoform::AutoFields::new(std::sync::Arc::new(declaration));
//! form.update_fields_from_schemata();
//! assert_eq!(form.fields.names().collect::<Vec<_>>(), ["b", "a"]);
//! # Ok::<(), autoform::Error>(())
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::form::{
    DeclaredGroup, FieldCollection, FormDeclaration, FormField, FormMode, GroupFactory,
};
use crate::metadata::Fieldset;
use crate::model::{FieldDescriptor, Schema};
use crate::serializer::{expand_attribute_name, read_field, write_field, Element};

/// A field and the attributes of its model element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// The field descriptor.
    #[serde(flatten)]
    pub field: FieldDescriptor,
    /// Attributes keyed by Clark-notation or `prefix:local` name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl FieldDefinition {
    /// The attribute record of this field, with prefixed names expanded.
    #[must_use]
    pub fn element(&self) -> Element {
        let mut element = Element::new("field");
        for (name, value) in &self.attributes {
            element
                .attributes
                .insert(expand_attribute_name(name), value.clone());
        }
        element
    }
}

/// A schema as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Fully qualified name.
    pub identifier: String,
    /// Short name. Defaults to the last dotted segment of the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Documentation string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Fields in order.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Fieldsets declared by the schema.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fieldsets: Vec<Fieldset>,
}

impl SchemaDefinition {
    /// Builds the schema, reading every field's attributes into its
    /// metadata store in field order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Definition`] if the identifier is empty or a field
    /// name repeats.
    pub fn build(&self) -> Result<Schema> {
        if self.identifier.is_empty() {
            return Err(Error::Definition("schema identifier is empty".to_owned()));
        }
        let mut schema = Schema::new(self.identifier.as_str());
        if let Some(name) = &self.name {
            schema.name = name.clone();
        }
        schema.doc = self.doc.clone();

        let mut seen = HashSet::new();
        for definition in &self.fields {
            if !seen.insert(definition.field.name.as_str()) {
                return Err(Error::Definition(format!(
                    "duplicate field '{}' in schema '{}'",
                    definition.field.name, self.identifier
                )));
            }
            read_field(&definition.element(), &mut schema.metadata, &definition.field);
            schema.fields.push(definition.field.clone());
        }
        for fieldset in &self.fieldsets {
            schema.metadata.fieldsets_mut().push(fieldset.clone());
        }
        Ok(schema)
    }
}

/// A declared default group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Group name. When absent the label identifies the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display label.
    pub label: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in the group.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// A complete form as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefinition {
    /// Primary schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDefinition>,
    /// Additional schemata, in order.
    pub additional_schemata: Vec<SchemaDefinition>,
    /// Default fields.
    pub fields: Vec<FieldDescriptor>,
    /// Default groups.
    pub groups: Vec<GroupDefinition>,
    /// Add additional schemata fields without a prefix.
    pub ignore_prefix: bool,
    /// Create one group per additional schema.
    pub auto_groups: bool,
    /// Edit or display form.
    pub mode: FormMode,
}

impl FormDefinition {
    /// Parses a definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is not a valid definition.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every schema definition, primary first.
    pub fn schemata(&self) -> impl Iterator<Item = &SchemaDefinition> {
        self.schema.iter().chain(self.additional_schemata.iter())
    }

    /// Builds the form declaration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Definition`] if any schema is invalid or two schemata
    /// share an identifier.
    pub fn into_declaration(self) -> Result<FormDeclaration> {
        let mut identifiers = HashSet::new();
        for schema in self.schemata() {
            if !identifiers.insert(schema.identifier.as_str()) {
                return Err(Error::Definition(format!(
                    "schema '{}' is declared more than once",
                    schema.identifier
                )));
            }
        }

        let mut declaration = FormDeclaration::new()
            .ignore_prefix(self.ignore_prefix)
            .auto_groups(self.auto_groups)
            .mode(self.mode);
        if let Some(schema) = &self.schema {
            declaration.schema = Some(Arc::new(schema.build()?));
        }
        for schema in &self.additional_schemata {
            declaration.additional_schemata.push(Arc::new(schema.build()?));
        }
        declaration.fields = self.fields.into_iter().map(FormField::new).collect();
        declaration.groups = self
            .groups
            .into_iter()
            .map(|g| {
                let fields: FieldCollection = g.fields.into_iter().map(FormField::new).collect();
                DeclaredGroup::Factory(
                    GroupFactory::new(g.name.unwrap_or_default(), g.label)
                        .with_description(g.description)
                        .with_fields(fields),
                )
            })
            .collect();
        Ok(declaration)
    }
}

/// Writes back the attribute record of every field of `schema`, in field
/// order.
#[must_use]
pub fn export_attributes(schema: &Schema) -> Vec<Element> {
    schema
        .fields
        .iter()
        .map(|field| write_field(&schema.metadata, field))
        .collect()
}
