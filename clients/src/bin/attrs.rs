//! `autoform-attrs`: loads a JSON form definition and prints, for every
//! schema and field, the namespaced attributes the metadata handlers write
//! back. Attributes that were never set, or were cleared, are absent.
//!
//! **Usage:**
//! ```text
//! autoform-attrs --definition <path> [--pretty] [-v...]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use autoform_clients::{attributes_report, init_tracing, load_definition, to_json};
use clap::Parser;
use serde_json::Value;
use tracing::debug;

/// Print the attributes written back for every field.
#[derive(Parser)]
#[command(
    name = "autoform-attrs",
    about = "Write back the form and security attributes of every schema field"
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
    let mut schemata = Vec::new();
    for schema in definition.schemata() {
        let built = schema
            .build()
            .with_context(|| format!("Invalid schema '{}'", schema.identifier))?;
        debug!(schema = %built.identifier, fields = built.fields.len(), "exporting attributes");
        schemata.push(attributes_report(&built));
    }

    println!("{}", to_json(&Value::Array(schemata), args.pretty)?);
    Ok(())
}
