use podcut_models::{CutList, EditDecision, Transcript};
use schemars::schema_for;

use crate::cli::{SchemaArgs, SchemaKind};
use crate::error::CliResult;

pub fn run(args: SchemaArgs) -> CliResult<()> {
    println!("{}", render(args.kind)?);
    Ok(())
}

/// Pretty JSON schema for a document kind.
pub fn render(kind: SchemaKind) -> CliResult<String> {
    let schema = match kind {
        SchemaKind::Transcript => schema_for!(Transcript),
        SchemaKind::Decisions => schema_for!(Vec<EditDecision>),
        SchemaKind::Cuts => schema_for!(CutList),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
