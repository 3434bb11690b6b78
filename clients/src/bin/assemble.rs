//! `autoform-assemble`: loads a JSON form definition, reads every field's
//! namespaced attributes into its schema's metadata, assembles the form and
//! prints the resulting field order and groups.
//!
//! **Usage:**
//! ```text
//! autoform-assemble --definition <path> [--pretty] [-v...]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use autoform::AutoFields;
use autoform_clients::{assembly_report, init_tracing, load_definition, to_json};
use clap::Parser;
use tracing::info;

/// Assemble a form from a JSON definition.
#[derive(Parser)]
#[command(
    name = "autoform-assemble",
    about = "Assemble a form from its schemata and print the field order and groups"
)]
struct Args {
    /// Path to the JSON form definition.
    #[arg(long)]
    definition: PathBuf,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let definition = load_definition(&args.definition)?;
    let declaration = definition
        .into_declaration()
        .with_context(|| format!("Invalid form definition in {}", args.definition.display()))?;

    info!(
        primary = declaration.schema.is_some(),
        additional = declaration.additional_schemata.len(),
        "assembling form"
    );

    let mut form = AutoFields::new(Arc::new(declaration));
    form.update_fields_from_schemata();

    println!("{}", to_json(&assembly_report(&form), args.pretty)?);
    Ok(())
}
