use anyhow::Context;
use settle_config::PipelineConfig;
use settle_fetch::{PipelineSpec, run_pipeline};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context::AppContext;
use crate::reporter::ConsoleReporter;

/// Handle `settle report`.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pipeline = apply_overrides(&ctx.config.pipeline, args);
    pipeline
        .validate()
        .context("invalid [pipeline] configuration")?;

    let categories = pipeline
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    let spec = PipelineSpec {
        primary_url: pipeline.primary_url,
        secondary_url: pipeline.secondary_url,
        foreign_key: pipeline.foreign_key,
        categories: pipeline.categories,
        fail_fast: pipeline.fail_fast,
    };

    let mut reporter = ConsoleReporter::new(flags, categories);
    let records = run_pipeline(&ctx.fetcher, &spec, &mut reporter).await?;
    tracing::debug!(
        records = records.len(),
        warnings = reporter.warnings(),
        "report finished"
    );

    if let Some(rendered) = reporter.finish()? {
        println!("{rendered}");
    }
    Ok(())
}

/// Command-line values win over `[pipeline]`.
fn apply_overrides(config: &PipelineConfig, args: &ReportArgs) -> PipelineConfig {
    let mut pipeline = config.clone();
    if let Some(primary) = &args.primary {
        pipeline.primary_url.clone_from(primary);
    }
    if let Some(secondary) = &args.secondary {
        pipeline.secondary_url.clone_from(secondary);
    }
    if let Some(foreign_key) = &args.foreign_key {
        pipeline.foreign_key.clone_from(foreign_key);
    }
    pipeline.fail_fast |= args.fail_fast;
    pipeline
}
