//! Replays a schema's ordering directives against the working form state.
//!
//! Directives are applied strictly in recording order, so a later directive
//! sees the positions produced by earlier ones. A directive whose field or
//! anchor cannot be found is skipped.

use tracing::{debug, trace};

use crate::metadata::Relation;
use crate::model::Schema;

use super::assembly::AutoFields;
use super::fields::{prefixed_name, FieldCollection};

/// Anchor meaning "first" for `before` and "last" for `after`.
const EDGE_ANCHOR: &str = "*";

/// Where a field lives in the working state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Main,
    Group(usize),
}

fn locate(form: &AutoFields, name: &str) -> Option<Location> {
    if form.fields.contains(name) {
        return Some(Location::Main);
    }
    form.groups
        .iter()
        .position(|g| g.fields.contains(name))
        .map(Location::Group)
}

fn collection_mut(form: &mut AutoFields, location: Location) -> &mut FieldCollection {
    match location {
        Location::Main => &mut form.fields,
        Location::Group(index) => &mut form.groups[index].fields,
    }
}

/// Resolves a directive anchor against the schema prefix. Anchors starting
/// with `.` name a field of the same schema.
fn resolve_anchor(prefix: &str, anchor: &str) -> String {
    match anchor.strip_prefix('.') {
        Some(local) => prefixed_name(prefix, local),
        None => anchor.to_owned(),
    }
}

/// Moves the field `name` before or after `anchor`, both external names.
///
/// When the anchor sits in a different collection (the main fields or a
/// group) the field is moved into that collection. The anchor `*` moves the
/// field to the start or end of its own collection. Returns `false`, leaving
/// the state untouched, if the field or anchor is missing.
pub fn move_field(form: &mut AutoFields, name: &str, relation: Relation, anchor: &str) -> bool {
    let Some(source) = locate(form, name) else {
        return false;
    };

    if anchor == EDGE_ANCHOR {
        let collection = collection_mut(form, source);
        return match relation {
            Relation::Before => collection.move_to_front(name),
            Relation::After => collection.move_to_back(name),
        };
    }

    let Some(target) = locate(form, anchor) else {
        return false;
    };
    if source == target {
        return collection_mut(form, target).move_relative(name, relation, anchor);
    }

    let Some(anchor_index) = collection_mut(form, target).index_of(anchor) else {
        return false;
    };
    let Some(field) = collection_mut(form, source).remove(name) else {
        return false;
    };
    let index = match relation {
        Relation::Before => anchor_index,
        Relation::After => anchor_index + 1,
    };
    collection_mut(form, target).insert_at(index, field);
    true
}

/// Applies the ordering directives recorded on `schema`, in order.
///
/// Directive field names are qualified with `prefix`, the prefix the
/// schema's fields were added with. Anchors are external names unless they
/// start with `.`.
pub fn process_field_moves(form: &mut AutoFields, schema: &Schema, prefix: &str) {
    let Some(order) = schema.metadata.order() else {
        return;
    };
    for directive in order {
        let name = prefixed_name(prefix, &directive.field);
        let anchor = resolve_anchor(prefix, &directive.anchor);
        if move_field(form, &name, directive.relation, &anchor) {
            trace!(field = %name, relation = %directive.relation, anchor = %anchor, "moved field");
        } else {
            debug!(
                schema = %schema.identifier,
                field = %name,
                relation = %directive.relation,
                anchor = %anchor,
                "ordering directive skipped; field or anchor not found"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_anchor_uses_schema_prefix() {
        assert_eq!(resolve_anchor("IExtra", ".b"), "IExtra.b");
        assert_eq!(resolve_anchor("", ".b"), "b");
        assert_eq!(resolve_anchor("IExtra", "b"), "b");
        assert_eq!(resolve_anchor("IExtra", "*"), "*");
    }
}
