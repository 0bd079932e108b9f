//! # Schema Subcommand
//!
//! Prints the strict `ComplianceCheckResult` output schema as pretty JSON.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use copilot_compliance::{output_schema, SCHEMA_NAME};

/// Arguments for `copilot schema`.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Wrap the schema in the `text.format` object sent to the provider.
    #[arg(long)]
    pub request_format: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs, out: &mut impl Write) -> Result<u8> {
    let value = if args.request_format {
        serde_json::json!({
            "type": "json_schema",
            "name": SCHEMA_NAME,
            "schema": output_schema(),
            "strict": true,
        })
    } else {
        output_schema()
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(0)
}
