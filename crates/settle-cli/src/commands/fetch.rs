use serde::Serialize;
use serde_json::Value;
use settle_core::{Outcome, TracingReporter};
use settle_fetch::collect;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FetchArgs;
use crate::context::AppContext;
use crate::output::{TableView, render_with_view};

/// How one endpoint settled.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct EndpointReport {
    endpoint: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl EndpointReport {
    fn new(endpoint: &str, outcome: &Outcome<Value>) -> Self {
        match outcome {
            Outcome::Success { payload } => Self {
                endpoint: endpoint.to_string(),
                status: "success",
                records: Some(payload.len()),
                reason: None,
            },
            Outcome::Failure { reason } => Self {
                endpoint: endpoint.to_string(),
                status: "failure",
                records: None,
                reason: Some(reason.to_string()),
            },
        }
    }
}

/// Handle `settle fetch`.
pub async fn handle(args: &FetchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Failures become rows; the tracing reporter also logs them.
    let outcomes = collect(&ctx.fetcher, &args.endpoints, &mut TracingReporter).await;
    let reports = args
        .endpoints
        .iter()
        .zip(&outcomes)
        .map(|(endpoint, outcome)| EndpointReport::new(endpoint, outcome))
        .collect::<Vec<_>>();

    let rendered = render_with_view(&reports, flags.format, || endpoint_view(&reports))?;
    println!("{rendered}");
    Ok(())
}

fn endpoint_view(reports: &[EndpointReport]) -> TableView {
    let dash = || String::from("-");
    TableView {
        headers: ["endpoint", "status", "records", "reason"]
            .map(String::from)
            .to_vec(),
        rows: reports
            .iter()
            .map(|report| {
                vec![
                    report.endpoint.clone(),
                    report.status.to_string(),
                    report.records.map_or_else(dash, |n| n.to_string()),
                    report.reason.clone().unwrap_or_else(dash),
                ]
            })
            .collect(),
    }
}
