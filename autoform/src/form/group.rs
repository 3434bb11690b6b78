//! Fieldset groups.
//!
//! Forms declare default groups either as [`GroupFactory`] values (deferred
//! construction) or as already-built [`Group`]s. Both are normalized into
//! factories once, at the start of assembly, through
//! [`DeclaredGroup::to_factory`]; from then on only factories are handled.

use serde::Serialize;

use super::fields::FieldCollection;

/// Deferred construction of a [`Group`]: name, fields, label, description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupFactory {
    /// Group name. May be empty, in which case the label identifies it.
    pub name: String,
    /// Fields in the group.
    pub fields: FieldCollection,
    /// Display label.
    pub label: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GroupFactory {
    /// Creates an empty group factory.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldCollection::new(),
            label: label.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the fields.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldCollection) -> Self {
        self.fields = fields;
        self
    }

    /// The identifying name: the name, or the label when unnamed.
    #[must_use]
    pub fn group_name(&self) -> &str {
        if self.name.is_empty() {
            &self.label
        } else {
            &self.name
        }
    }

    /// Builds the group for one form pass.
    #[must_use]
    pub fn instantiate(&self) -> Group {
        Group {
            name: (!self.name.is_empty()).then(|| self.name.clone()),
            label: self.label.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// A fieldset built for one form pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Group name, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display label.
    pub label: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in the group.
    pub fields: FieldCollection,
}

impl Group {
    /// The identifying name: the name, or the label when unnamed.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }
}

/// A default group as declared on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredGroup {
    /// Declared as a factory.
    Factory(GroupFactory),
    /// Declared as a built group.
    Instance(Group),
}

impl DeclaredGroup {
    /// The identifying name of the declared group.
    #[must_use]
    pub fn group_name(&self) -> &str {
        match self {
            DeclaredGroup::Factory(f) => f.group_name(),
            DeclaredGroup::Instance(g) => g.group_name(),
        }
    }

    /// Copies the declaration into a mutable factory.
    #[must_use]
    pub fn to_factory(&self) -> GroupFactory {
        match self {
            DeclaredGroup::Factory(f) => f.clone(),
            DeclaredGroup::Instance(g) => GroupFactory {
                name: g.group_name().to_owned(),
                fields: g.fields.clone(),
                label: g.label.clone(),
                description: g.description.clone(),
            },
        }
    }
}

impl From<GroupFactory> for DeclaredGroup {
    fn from(factory: GroupFactory) -> Self {
        DeclaredGroup::Factory(factory)
    }
}

impl From<Group> for DeclaredGroup {
    fn from(group: Group) -> Self {
        DeclaredGroup::Instance(group)
    }
}

/// Position of the group identified by `name` (see
/// [`GroupFactory::group_name`]).
#[must_use]
pub fn find_group(groups: &[GroupFactory], name: &str) -> Option<usize> {
    groups.iter().position(|g| g.group_name() == name)
}
