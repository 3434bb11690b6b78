//! Schema-driven form metadata and multi-schema form assembly.
//!
//! The `autoform` crate lets a schema (a named, ordered set of field
//! descriptors) carry form-presentation metadata (widget, mode, omission,
//! relative ordering, fieldsets, read/write permission names) and
//! combines one primary schema with any number of additional schemata into a
//! single form: one ordered field collection plus a list of groups.
//!
//! # Entry Point
//!
//! ```
//! use std::sync::Arc;
//! use autoform::{AutoFields, FieldDescriptor, FormDeclaration, Schema};
//!
//! let base = Schema::new("example.IBase")
//!     .with_field(FieldDescriptor::new("a", "A"))
//!     .with_field(FieldDescriptor::new("b", "B"));
//!
//! let declaration = FormDeclaration::new().with_schema(base);
//! let mut form = AutoFields::new(Arc::new(declaration));
//! form.update_fields_from_schemata();
//!
//! let names: Vec<&str> = form.fields.names().collect();
//! assert_eq!(names, ["a", "b"]);
//! ```
//!
//! # Serialization
//!
//! Metadata travels in namespaced attributes of an external attribute record
//! (see [`serializer`]):
//!
//! ```
//! use autoform::serializer::{ns, AttributeNode, Element, FieldMetadataHandler, FormSchema};
//! use autoform::{FieldDescriptor, MetadataStore, FORM_NAMESPACE};
//!
//! let field = FieldDescriptor::new("title", "Title");
//! let mut node = Element::new("field");
//! node.set(&ns("widget", FORM_NAMESPACE), "TextAreaWidget");
//!
//! let mut store = MetadataStore::default();
//! FormSchema.read(&node, &mut store, &field);
//! assert_eq!(store.widget_for("title"), Some("TextAreaWidget"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod definition;
pub mod error;
pub mod form;
pub mod metadata;
pub mod model;
pub mod serializer;
pub mod view;

pub use definition::{FieldDefinition, FormDefinition, GroupDefinition, SchemaDefinition};
pub use error::{Error, Result};
pub use form::{
    process_field_moves, process_fields, AutoFields, DeclaredGroup, FieldCollection,
    FormDeclaration, FormField, FormMode, Group, GroupFactory, PermissionChecker,
};
pub use metadata::{Directive, Fieldset, MetadataStore, Relation};
pub use model::{FieldDescriptor, Schema, FORM_NAMESPACE, SECURITY_NAMESPACE};
pub use view::{Template, Widget, WidgetsView};
