//! Per-schema form metadata.
//!
//! A [`MetadataStore`] holds five tagged-value maps keyed by field name
//! (widgets, modes, omission flags, read and write permissions), the ordered
//! list of ordering [`Directive`]s, and the schema's declared [`Fieldset`]s.
//!
//! Every entry is optional. An entry that was never written reads as `None`,
//! which is distinct from an entry that exists but holds no value for a given
//! field. Entries are created on first write.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Field name → string value, in insertion order.
pub type TaggedMap = IndexMap<String, String>;

/// Field name → permission name. `None` records an explicitly cleared value.
pub type PermissionMap = IndexMap<String, Option<String>>;

/// Relative position of an ordering directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Place the field immediately before the anchor.
    Before,
    /// Place the field immediately after the anchor.
    After,
}

impl Relation {
    /// Returns the attribute name and wire value of this relation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Before => "before",
            Relation::After => "after",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Relation::Before),
            "after" => Ok(Relation::After),
            other => Err(Error::UnknownRelation(other.to_owned())),
        }
    }
}

/// One relative-ordering instruction: move `field` before or after `anchor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Unprefixed name of the field to move.
    pub field: String,
    /// Where to put it relative to the anchor.
    pub relation: Relation,
    /// Anchor field name. A leading `.` makes it relative to the schema's
    /// prefix; `*` means the start (`before`) or end (`after`).
    pub anchor: String,
}

impl Directive {
    /// Creates a directive.
    #[must_use]
    pub fn new(field: impl Into<String>, relation: Relation, anchor: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            relation,
            anchor: anchor.into(),
        }
    }
}

/// A fieldset declared by a schema: the named group its listed fields go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fieldset {
    /// Group name.
    pub name: String,
    /// Group label. Defaults to the name when empty.
    #[serde(default)]
    pub label: String,
    /// Group description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unprefixed names of the schema fields placed in this group.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Fieldset {
    /// Creates a fieldset whose label equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            description: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the label, falling back to the name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Form metadata attached to one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataStore {
    widgets: Option<TaggedMap>,
    modes: Option<TaggedMap>,
    omitted: Option<TaggedMap>,
    read_permissions: Option<PermissionMap>,
    write_permissions: Option<PermissionMap>,
    order: Option<Vec<Directive>>,
    fieldsets: Option<Vec<Fieldset>>,
}

impl MetadataStore {
    /// Returns `true` if no entry has ever been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_none()
            && self.modes.is_none()
            && self.omitted.is_none()
            && self.read_permissions.is_none()
            && self.write_permissions.is_none()
            && self.order.is_none()
            && self.fieldsets.is_none()
    }

    /// Widget assignments, or `None` if never written.
    #[must_use]
    pub fn widgets(&self) -> Option<&TaggedMap> {
        self.widgets.as_ref()
    }

    /// Mode assignments, or `None` if never written.
    #[must_use]
    pub fn modes(&self) -> Option<&TaggedMap> {
        self.modes.as_ref()
    }

    /// Omission flags, or `None` if never written.
    #[must_use]
    pub fn omitted(&self) -> Option<&TaggedMap> {
        self.omitted.as_ref()
    }

    /// Read permissions, or `None` if never written.
    #[must_use]
    pub fn read_permissions(&self) -> Option<&PermissionMap> {
        self.read_permissions.as_ref()
    }

    /// Write permissions, or `None` if never written.
    #[must_use]
    pub fn write_permissions(&self) -> Option<&PermissionMap> {
        self.write_permissions.as_ref()
    }

    /// Ordering directives in recording order, or `None` if never written.
    #[must_use]
    pub fn order(&self) -> Option<&[Directive]> {
        self.order.as_deref()
    }

    /// Declared fieldsets, or `None` if never written.
    #[must_use]
    pub fn fieldsets(&self) -> Option<&[Fieldset]> {
        self.fieldsets.as_deref()
    }

    /// Widget map, created empty on first access.
    pub fn widgets_mut(&mut self) -> &mut TaggedMap {
        self.widgets.get_or_insert_with(TaggedMap::new)
    }

    /// Mode map, created empty on first access.
    pub fn modes_mut(&mut self) -> &mut TaggedMap {
        self.modes.get_or_insert_with(TaggedMap::new)
    }

    /// Omission map, created empty on first access.
    pub fn omitted_mut(&mut self) -> &mut TaggedMap {
        self.omitted.get_or_insert_with(TaggedMap::new)
    }

    /// Read-permission map, created empty on first access.
    pub fn read_permissions_mut(&mut self) -> &mut PermissionMap {
        self.read_permissions.get_or_insert_with(PermissionMap::new)
    }

    /// Write-permission map, created empty on first access.
    pub fn write_permissions_mut(&mut self) -> &mut PermissionMap {
        self.write_permissions.get_or_insert_with(PermissionMap::new)
    }

    /// Directive list, created empty on first access.
    pub fn order_mut(&mut self) -> &mut Vec<Directive> {
        self.order.get_or_insert_with(Vec::new)
    }

    /// Fieldset list, created empty on first access.
    pub fn fieldsets_mut(&mut self) -> &mut Vec<Fieldset> {
        self.fieldsets.get_or_insert_with(Vec::new)
    }

    /// Widget assigned to `field`.
    #[must_use]
    pub fn widget_for(&self, field: &str) -> Option<&str> {
        lookup(self.widgets.as_ref(), field)
    }

    /// Mode assigned to `field`.
    #[must_use]
    pub fn mode_for(&self, field: &str) -> Option<&str> {
        lookup(self.modes.as_ref(), field)
    }

    /// Raw omission flag recorded for `field`.
    #[must_use]
    pub fn omitted_for(&self, field: &str) -> Option<&str> {
        lookup(self.omitted.as_ref(), field)
    }

    /// Read permission for `field`. Cleared entries read as `None`.
    #[must_use]
    pub fn read_permission_for(&self, field: &str) -> Option<&str> {
        permission(self.read_permissions.as_ref(), field)
    }

    /// Write permission for `field`. Cleared entries read as `None`.
    #[must_use]
    pub fn write_permission_for(&self, field: &str) -> Option<&str> {
        permission(self.write_permissions.as_ref(), field)
    }

    /// Directives recorded for `field`, in recording order.
    pub fn directives_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Directive> {
        self.order
            .iter()
            .flatten()
            .filter(move |d| d.field == field)
    }

    /// Sets or clears the read permission of `field`. An empty or `None`
    /// value records the field as explicitly cleared.
    pub fn set_read_permission(&mut self, field: impl Into<String>, permission: Option<&str>) {
        let value = permission.filter(|p| !p.is_empty()).map(str::to_owned);
        self.read_permissions_mut().insert(field.into(), value);
    }

    /// Sets or clears the write permission of `field`. An empty or `None`
    /// value records the field as explicitly cleared.
    pub fn set_write_permission(&mut self, field: impl Into<String>, permission: Option<&str>) {
        let value = permission.filter(|p| !p.is_empty()).map(str::to_owned);
        self.write_permissions_mut().insert(field.into(), value);
    }
}

fn lookup<'a>(map: Option<&'a TaggedMap>, field: &str) -> Option<&'a str> {
    map?.get(field).map(String::as_str)
}

fn permission<'a>(map: Option<&'a PermissionMap>, field: &str) -> Option<&'a str> {
    map?.get(field)?.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_no_entries() {
        let store = MetadataStore::default();
        assert!(store.is_empty());
        assert!(store.widgets().is_none());
        assert!(store.order().is_none());
        assert_eq!(store.widget_for("a"), None);
    }

    #[test]
    fn empty_entry_differs_from_absent_entry() {
        let mut store = MetadataStore::default();
        store.order_mut();
        assert_eq!(store.order(), Some(&[][..]));
        assert!(store.widgets().is_none());
        assert!(!store.is_empty());
    }

    #[test]
    fn cleared_permission_reads_as_none() {
        let mut store = MetadataStore::default();
        store.set_read_permission("body", Some("cmf.ModifyPortalContent"));
        assert_eq!(store.read_permission_for("body"), Some("cmf.ModifyPortalContent"));

        store.set_read_permission("body", None);
        assert_eq!(store.read_permission_for("body"), None);
        assert_eq!(store.read_permissions().map(|m| m.get("body")), Some(Some(&None)));

        store.set_write_permission("body", Some(""));
        assert_eq!(store.write_permission_for("body"), None);
    }

    #[test]
    fn relation_parses_wire_values() {
        assert_eq!("before".parse::<Relation>().ok(), Some(Relation::Before));
        assert_eq!("after".parse::<Relation>().ok(), Some(Relation::After));
        assert!(matches!(
            "beside".parse::<Relation>(),
            Err(Error::UnknownRelation(r)) if r == "beside"
        ));
    }

    #[test]
    fn directives_for_filters_by_field() {
        let mut store = MetadataStore::default();
        store.order_mut().push(Directive::new("a", Relation::Before, "b"));
        store.order_mut().push(Directive::new("c", Relation::After, "a"));
        store.order_mut().push(Directive::new("a", Relation::After, "*"));
        let anchors: Vec<&str> = store.directives_for("a").map(|d| d.anchor.as_str()).collect();
        assert_eq!(anchors, ["b", "*"]);
    }

    #[test]
    fn fieldset_label_falls_back_to_name() {
        let mut fieldset = Fieldset::new("settings", ["a"]);
        fieldset.label.clear();
        assert_eq!(fieldset.label(), "settings");
    }
}
