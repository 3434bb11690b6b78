//! Form fields and the ordered field collection.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::metadata::Relation;
use crate::model::FieldDescriptor;

/// Returns `name` qualified by `prefix` (`prefix.name`), or `name` unchanged
/// when the prefix is empty.
#[must_use]
pub fn prefixed_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

/// A field placed on a form, with the presentation metadata applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// External name: the descriptor name qualified by the prefix.
    pub name: String,
    /// Prefix the field was added with (empty for unprefixed fields).
    pub prefix: String,
    /// Identifier of the schema the field came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// The underlying descriptor.
    pub field: FieldDescriptor,
    /// Widget override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Mode override (`input`, `display`, `hidden`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Excluded from rendering. The field stays in its collection so ordering
    /// directives can still refer to it.
    pub omitted: bool,
    /// Permission required to view the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_permission: Option<String>,
    /// Permission required to edit the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_permission: Option<String>,
}

impl FormField {
    /// Creates an unprefixed form field.
    #[must_use]
    pub fn new(field: FieldDescriptor) -> Self {
        Self::with_prefix(field, "", None)
    }

    /// Creates a form field whose external name is qualified by `prefix`.
    #[must_use]
    pub fn with_prefix(field: FieldDescriptor, prefix: &str, interface: Option<&str>) -> Self {
        Self {
            name: prefixed_name(prefix, &field.name),
            prefix: prefix.to_owned(),
            interface: interface.map(str::to_owned),
            field,
            widget: None,
            mode: None,
            omitted: false,
            read_permission: None,
            write_permission: None,
        }
    }

    /// Field title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.field.title
    }
}

/// An ordered collection of form fields, unique by external name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCollection {
    fields: IndexMap<String, FormField>,
}

impl FieldCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the collection holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if a field named `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Looks up a field by external name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    /// Looks up a field by external name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.get_mut(name)
    }

    /// Position of the field named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// External names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in order.
    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values()
    }

    /// Fields in order, excluding omitted ones.
    pub fn visible(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values().filter(|f| !f.omitted)
    }

    /// Appends `field`. A field with the same name is replaced in place and
    /// returned.
    pub fn insert(&mut self, field: FormField) -> Option<FormField> {
        self.fields.insert(field.name.clone(), field)
    }

    /// Inserts `field` at `index`, shifting later fields. An existing field
    /// with the same name is replaced and moved.
    pub fn insert_at(&mut self, index: usize, field: FormField) -> Option<FormField> {
        let last = if self.contains(&field.name) {
            self.fields.len().saturating_sub(1)
        } else {
            self.fields.len()
        };
        let index = index.min(last);
        self.fields.shift_insert(index, field.name.clone(), field)
    }

    /// Removes a field, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<FormField> {
        self.fields.shift_remove(name)
    }

    /// Returns a new collection holding the named fields, in the order given.
    /// Unknown names are skipped.
    #[must_use]
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> FieldCollection {
        names
            .iter()
            .filter_map(|n| self.fields.get(n.as_ref()).cloned())
            .collect()
    }

    /// Returns a new collection without the named fields.
    #[must_use]
    pub fn omit<S: AsRef<str>>(&self, names: &[S]) -> FieldCollection {
        self.fields
            .values()
            .filter(|f| !names.iter().any(|n| n.as_ref() == f.name))
            .cloned()
            .collect()
    }

    /// Moves `name` immediately before or after `anchor`. Returns `false`,
    /// leaving the order untouched, if either is missing or they are the
    /// same field.
    pub fn move_relative(&mut self, name: &str, relation: Relation, anchor: &str) -> bool {
        let (Some(from), Some(to)) = (self.index_of(name), self.index_of(anchor)) else {
            return false;
        };
        if from == to {
            return false;
        }
        let target = match relation {
            Relation::Before if from < to => to - 1,
            Relation::Before => to,
            Relation::After if from < to => to,
            Relation::After => to + 1,
        };
        self.fields.move_index(from, target);
        true
    }

    /// Moves `name` to the first position.
    pub fn move_to_front(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(from) => {
                self.fields.move_index(from, 0);
                true
            }
            None => false,
        }
    }

    /// Moves `name` to the last position.
    pub fn move_to_back(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(from) => {
                let last = self.fields.len() - 1;
                self.fields.move_index(from, last);
                true
            }
            None => false,
        }
    }
}

impl Extend<FormField> for FieldCollection {
    fn extend<T: IntoIterator<Item = FormField>>(&mut self, iter: T) {
        for field in iter {
            self.insert(field);
        }
    }
}

impl FromIterator<FormField> for FieldCollection {
    fn from_iter<T: IntoIterator<Item = FormField>>(iter: T) -> Self {
        let mut collection = FieldCollection::new();
        collection.extend(iter);
        collection
    }
}

impl IntoIterator for FieldCollection {
    type Item = FormField;
    type IntoIter = indexmap::map::IntoValues<String, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_values()
    }
}

impl Serialize for FieldCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.fields.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(names: &[&str]) -> FieldCollection {
        names
            .iter()
            .map(|n| FormField::new(FieldDescriptor::new(*n, *n)))
            .collect()
    }

    fn order(c: &FieldCollection) -> Vec<&str> {
        c.names().collect()
    }

    #[test]
    fn prefixing() {
        assert_eq!(prefixed_name("", "a"), "a");
        assert_eq!(prefixed_name("IExtra", "a"), "IExtra.a");
        let field = FormField::with_prefix(FieldDescriptor::new("c", "C"), "IExtra", Some("x.IExtra"));
        assert_eq!(field.name, "IExtra.c");
        assert_eq!(field.interface.as_deref(), Some("x.IExtra"));
    }

    #[test]
    fn move_before_and_after() {
        let mut c = collection(&["a", "b", "c", "d"]);
        assert!(c.move_relative("d", Relation::Before, "b"));
        assert_eq!(order(&c), ["a", "d", "b", "c"]);
        assert!(c.move_relative("a", Relation::After, "c"));
        assert_eq!(order(&c), ["d", "b", "c", "a"]);
        assert!(c.move_relative("d", Relation::After, "b"));
        assert_eq!(order(&c), ["b", "d", "c", "a"]);
        assert!(c.move_relative("a", Relation::Before, "b"));
        assert_eq!(order(&c), ["a", "b", "d", "c"]);
    }

    #[test]
    fn move_with_missing_names_is_noop() {
        let mut c = collection(&["a", "b"]);
        assert!(!c.move_relative("x", Relation::Before, "a"));
        assert!(!c.move_relative("a", Relation::After, "x"));
        assert!(!c.move_relative("a", Relation::After, "a"));
        assert_eq!(order(&c), ["a", "b"]);
    }

    #[test]
    fn move_to_edges() {
        let mut c = collection(&["a", "b", "c"]);
        assert!(c.move_to_front("c"));
        assert_eq!(order(&c), ["c", "a", "b"]);
        assert!(c.move_to_back("c"));
        assert_eq!(order(&c), ["a", "b", "c"]);
        assert!(!c.move_to_back("x"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut c = collection(&["a", "b"]);
        let mut replacement = FormField::new(FieldDescriptor::new("a", "Other"));
        replacement.omitted = true;
        assert!(c.insert(replacement).is_some());
        assert_eq!(order(&c), ["a", "b"]);
        assert_eq!(c.get("a").map(FormField::title), Some("Other"));
        assert_eq!(c.visible().count(), 1);
    }

    #[test]
    fn select_and_omit() {
        let c = collection(&["a", "b", "c"]);
        assert_eq!(order(&c.select(&["c", "x", "a"])), ["c", "a"]);
        assert_eq!(order(&c.omit(&["b"])), ["a", "c"]);
    }

    #[test]
    fn insert_at_clamps_index() {
        let mut c = collection(&["a"]);
        c.insert_at(9, FormField::new(FieldDescriptor::new("z", "z")));
        c.insert_at(0, FormField::new(FieldDescriptor::new("y", "y")));
        assert_eq!(order(&c), ["y", "a", "z"]);
    }
}
