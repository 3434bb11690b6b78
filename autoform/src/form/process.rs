//! Adds one schema's fields to the working form state.

use tracing::debug;

use crate::model::Schema;

use super::assembly::{AutoFields, FormMode};
use super::fields::{prefixed_name, FieldCollection, FormField};
use super::group::GroupFactory;

/// Returns `true` for omission flags that mark a field omitted.
///
/// Flags are stored verbatim; everything except an empty string and
/// `false`/`no`/`off`/`0` (any case) counts.
#[must_use]
pub fn is_truthy(flag: &str) -> bool {
    let flag = flag.trim();
    !(flag.is_empty()
        || flag.eq_ignore_ascii_case("false")
        || flag.eq_ignore_ascii_case("no")
        || flag.eq_ignore_ascii_case("off")
        || flag == "0")
}

/// Adds every field of `schema` to `form`, prefixed by `prefix`.
///
/// Widget, mode, omission and permission metadata are applied per field.
/// Fields listed in one of the schema's fieldsets go to the group of that
/// name; the rest go to `default_group` if given, otherwise to the main
/// field collection. A missing default group is created, labelled with the
/// schema name.
///
/// Calling this twice for the same schema and prefix replaces the fields
/// added by the first call.
pub fn process_fields(
    form: &mut AutoFields,
    schema: &Schema,
    prefix: &str,
    default_group: Option<&str>,
) {
    let metadata = &schema.metadata;
    let mode = form.mode();
    let checker = form.declaration().permission_checker.clone();

    let mut all_fields = FieldCollection::new();
    for descriptor in &schema.fields {
        let name = descriptor.name.as_str();
        let mut field = FormField::with_prefix(descriptor.clone(), prefix, Some(&schema.identifier));
        field.widget = metadata.widget_for(name).map(str::to_owned);
        field.mode = metadata.mode_for(name).map(str::to_owned);
        field.omitted = metadata.omitted_for(name).is_some_and(is_truthy);
        field.read_permission = metadata.read_permission_for(name).map(str::to_owned);
        field.write_permission = metadata.write_permission_for(name).map(str::to_owned);

        if let Some(checker) = &checker {
            let governing = match mode {
                FormMode::Input => field.write_permission.as_deref(),
                FormMode::Display => field.read_permission.as_deref(),
            };
            if let Some(permission) = governing {
                if !checker.check_permission(permission) {
                    debug!(field = %field.name, permission, "field dropped by permission check");
                    continue;
                }
            }
        }

        all_fields.insert(field);
    }

    let mut placed: Vec<String> = Vec::new();
    for fieldset in metadata.fieldsets().unwrap_or_default() {
        let names: Vec<String> = fieldset
            .fields
            .iter()
            .map(|n| prefixed_name(prefix, n))
            .filter(|n| all_fields.contains(n) && !placed.contains(n))
            .collect();
        let selected = all_fields.select(&names);
        match form.find_group(&fieldset.name) {
            Some(index) => form.groups[index].fields.extend(selected),
            None => {
                debug!(group = %fieldset.name, schema = %schema.identifier, "creating fieldset group");
                form.groups.push(
                    GroupFactory::new(fieldset.name.as_str(), fieldset.label())
                        .with_description(fieldset.description.clone())
                        .with_fields(selected),
                );
            }
        }
        placed.extend(names);
    }

    let remaining = all_fields.omit(&placed);
    debug!(
        schema = %schema.identifier,
        prefix,
        fields = remaining.len(),
        group = default_group.unwrap_or(""),
        "processed schema fields"
    );
    match default_group {
        None => form.fields.extend(remaining),
        Some(group_name) => {
            let index = match form.find_group(group_name) {
                Some(index) => index,
                None => {
                    form.groups.push(
                        GroupFactory::new(group_name, schema.name.as_str())
                            .with_description(schema.doc.clone()),
                    );
                    form.groups.len() - 1
                }
            };
            form.groups[index].fields.extend(remaining);
        }
    }
}
