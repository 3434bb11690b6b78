//! Form declarations and the per-pass assembly state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Schema;

use super::fields::{FieldCollection, FormField};
use super::group::{find_group, DeclaredGroup, GroupFactory};
use super::moves::process_field_moves;
use super::process::process_fields;

/// Whether a form edits or displays its fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Edit form. Write permissions govern field access.
    #[default]
    Input,
    /// Display form. Read permissions govern field access.
    Display,
}

impl FormMode {
    /// Returns the mode name used for widgets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::Input => "input",
            FormMode::Display => "display",
        }
    }
}

/// Decides whether the current user holds a permission.
///
/// Implemented by the caller; this crate only passes permission names
/// through.
pub trait PermissionChecker: fmt::Debug + Send + Sync {
    /// Returns `true` if `permission` is granted.
    fn check_permission(&self, permission: &str) -> bool;
}

/// The read-only template of a form: its schemata, default fields and
/// groups, and options.
///
/// A declaration is shared between passes and never mutated by assembly.
#[derive(Debug, Clone, Default)]
pub struct FormDeclaration {
    /// Primary schema. Its fields are unprefixed and its ordering directives
    /// are applied last.
    pub schema: Option<Arc<Schema>>,
    /// Additional schemata, in declaration order.
    pub additional_schemata: Vec<Arc<Schema>>,
    /// Default fields.
    pub fields: FieldCollection,
    /// Default groups.
    pub groups: Vec<DeclaredGroup>,
    /// Add additional schemata fields without a prefix.
    pub ignore_prefix: bool,
    /// Create one group per additional schema.
    pub auto_groups: bool,
    /// Edit or display form.
    pub mode: FormMode,
    /// Optional permission check applied while fields are added.
    pub permission_checker: Option<Arc<dyn PermissionChecker>>,
}

impl FormDeclaration {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Appends an additional schema.
    #[must_use]
    pub fn with_additional_schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.additional_schemata.push(schema.into());
        self
    }

    /// Appends a default field.
    #[must_use]
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.insert(field);
        self
    }

    /// Appends a default group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<DeclaredGroup>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Sets whether additional schemata are prefixed.
    #[must_use]
    pub fn ignore_prefix(mut self, ignore: bool) -> Self {
        self.ignore_prefix = ignore;
        self
    }

    /// Sets whether additional schemata get their own group.
    #[must_use]
    pub fn auto_groups(mut self, auto: bool) -> Self {
        self.auto_groups = auto;
        self
    }

    /// Sets the form mode.
    #[must_use]
    pub fn mode(mut self, mode: FormMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the permission checker.
    #[must_use]
    pub fn permission_checker(mut self, checker: Arc<dyn PermissionChecker>) -> Self {
        self.permission_checker = Some(checker);
        self
    }

    /// Preferred prefix for `schema`: empty when prefixes are ignored,
    /// otherwise the schema's short name.
    #[must_use]
    pub fn get_prefix(&self, schema: &Schema) -> String {
        if self.ignore_prefix {
            String::new()
        } else {
            schema.name.clone()
        }
    }
}

/// Working form state for one pass: the live field collection, the group
/// list, and the prefix chosen for each additional schema.
///
/// Until [`update_fields_from_schemata`](Self::update_fields_from_schemata)
/// runs, the state holds copies of the declaration's defaults only.
#[derive(Debug, Clone)]
pub struct AutoFields {
    declaration: Arc<FormDeclaration>,
    /// Main field collection.
    pub fields: FieldCollection,
    /// Groups, as mutable factories.
    pub groups: Vec<GroupFactory>,
    /// Prefix chosen for each additional schema, by position.
    prefixes: Vec<String>,
    built: bool,
}

impl AutoFields {
    /// Creates an unbuilt state over `declaration`.
    #[must_use]
    pub fn new(declaration: Arc<FormDeclaration>) -> Self {
        let fields = declaration.fields.clone();
        let groups = declaration.groups.iter().map(DeclaredGroup::to_factory).collect();
        Self {
            declaration,
            fields,
            groups,
            prefixes: Vec::new(),
            built: false,
        }
    }

    /// The declaration this state was created from.
    #[must_use]
    pub fn declaration(&self) -> &FormDeclaration {
        &self.declaration
    }

    /// Form mode of the declaration.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.declaration.mode
    }

    /// Returns `true` once assembly has completed.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Preferred prefix for `schema`. See [`FormDeclaration::get_prefix`].
    #[must_use]
    pub fn get_prefix(&self, schema: &Schema) -> String {
        self.declaration.get_prefix(schema)
    }

    /// Prefix chosen for the first additional schema with the given
    /// identifier during the last assembly.
    #[must_use]
    pub fn prefix_for(&self, identifier: &str) -> Option<&str> {
        self.prefixes().find(|(id, _)| *id == identifier).map(|(_, prefix)| prefix)
    }

    /// Identifier and chosen prefix of every additional schema, in
    /// declaration order. Empty until assembly has run.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declaration
            .additional_schemata
            .iter()
            .zip(&self.prefixes)
            .map(|(schema, prefix)| (schema.identifier.as_str(), prefix.as_str()))
    }

    /// Position of the group identified by `name`.
    #[must_use]
    pub fn find_group(&self, name: &str) -> Option<usize> {
        find_group(&self.groups, name)
    }

    /// Assembles fields, groups and order from the declared schemata.
    ///
    /// Every call starts again from the declaration's defaults, so the state
    /// after a second call equals the state after the first.
    ///
    /// Additional schemata are assembled even when no primary schema is set.
    pub fn update_fields_from_schemata(&mut self) {
        let declaration = Arc::clone(&self.declaration);
        if self.built {
            debug!("rebuilding form state from declaration defaults");
        }

        self.fields = declaration.fields.clone();
        self.groups = declaration.groups.iter().map(DeclaredGroup::to_factory).collect();
        self.prefixes.clear();

        if let Some(schema) = &declaration.schema {
            process_fields(self, schema, "", None);
        }

        for schema in &declaration.additional_schemata {
            let mut prefix = self.get_prefix(schema);
            if !prefix.is_empty() && self.prefixes.contains(&prefix) {
                debug!(
                    schema = %schema.identifier,
                    collided = %prefix,
                    "prefix already in use; falling back to the schema identifier"
                );
                prefix = schema.identifier.clone();
            }
            self.prefixes.push(prefix.clone());

            let mut default_group = None;
            if declaration.auto_groups {
                let group_name = schema.name.as_str();
                // Earlier schemata may already have added this group.
                if self.find_group(group_name).is_none() {
                    debug!(group = group_name, "creating group for schema");
                    self.groups.push(
                        GroupFactory::new(group_name, group_name)
                            .with_description(schema.doc.clone()),
                    );
                }
                default_group = Some(group_name);
            }

            process_fields(self, schema, &prefix, default_group);
        }

        // The primary schema goes last so its directives win.
        let prefixes = self.prefixes.clone();
        for (schema, prefix) in declaration.additional_schemata.iter().zip(&prefixes) {
            process_field_moves(self, schema, prefix);
        }
        if let Some(schema) = &declaration.schema {
            process_field_moves(self, schema, "");
        }

        self.built = true;
    }
}
