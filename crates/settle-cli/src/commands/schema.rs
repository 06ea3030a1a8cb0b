use schemars::schema_for;
use serde_json::Value;
use settle_core::stats::StatusSummary;
use settle_core::{AggregateRecord, Outcome, Warning};

use crate::cli::root_commands::{SchemaArgs, SchemaType};

/// Handle `settle schema`. Always pretty JSON: the schema is the output.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    println!("{}", render(args.type_name)?);
    Ok(())
}

fn render(type_name: SchemaType) -> anyhow::Result<String> {
    let schema = match type_name {
        SchemaType::Aggregate => schema_for!(Vec<AggregateRecord>),
        SchemaType::Outcome => schema_for!(Outcome<Value>),
        SchemaType::Warning => schema_for!(Warning),
        SchemaType::Summary => schema_for!(StatusSummary),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
