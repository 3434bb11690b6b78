//! Shared plumbing for the autoform client binaries: logging setup,
//! definition loading, and the JSON reports they print.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autoform::definition::export_attributes;
use autoform::{AutoFields, FormDefinition, Schema};
use serde_json::{json, Value};
use tracing::Level;

/// Initialises `tracing` output on stderr. `verbosity` counts `-v` flags:
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads and parses a JSON form definition.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid definition.
pub fn load_definition(path: &Path) -> Result<FormDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    FormDefinition::from_json(&content)
        .with_context(|| format!("Failed to parse {} as a form definition", path.display()))
}

/// JSON report of an assembled form: main field order, groups, and the
/// prefix chosen for each additional schema, in declaration order.
#[must_use]
pub fn assembly_report(form: &AutoFields) -> Value {
    let groups: Vec<Value> = form
        .groups
        .iter()
        .map(|g| {
            json!({
                "name": g.group_name(),
                "label": g.label,
                "description": g.description,
                "fields": g.fields,
            })
        })
        .collect();
    let prefixes: Vec<Value> = form
        .prefixes()
        .map(|(schema, prefix)| json!({ "schema": schema, "prefix": prefix }))
        .collect();
    json!({
        "fields": form.fields,
        "groups": groups,
        "prefixes": prefixes,
    })
}

/// JSON report of the attributes written back for every field of `schema`.
#[must_use]
pub fn attributes_report(schema: &Schema) -> Value {
    let fields: Vec<Value> = schema
        .fields
        .iter()
        .zip(export_attributes(schema))
        .map(|(field, element)| {
            json!({
                "name": field.name,
                "attributes": element.attributes,
            })
        })
        .collect();
    json!({
        "identifier": schema.identifier,
        "fields": fields,
    })
}

/// Serializes `value` as compact or pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(value: &Value, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.context("Failed to serialize report")
}
