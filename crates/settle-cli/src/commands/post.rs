use anyhow::{Context, bail};
use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PostArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `settle post`.
pub async fn handle(args: &PostArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let body = parse_body(&args.body)?;
    let created = ctx
        .fetcher
        .post(&args.endpoint, &body)
        .await
        .into_strict(&args.endpoint)?;

    match created.as_slice() {
        [object] => output(object, flags.format),
        other => bail!("expected one object from {}, got {}", args.endpoint, other.len()),
    }
}

fn parse_body(raw: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("--body is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("--body must be a JSON object"),
    }
}
