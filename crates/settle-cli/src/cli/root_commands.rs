use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch the primary and secondary collections and print per-owner counts.
    Report(ReportArgs),
    /// Fetch endpoints concurrently and print how each one settled.
    Fetch(FetchArgs),
    /// POST a JSON object to an endpoint.
    Post(PostArgs),
    /// Summarize a JSON array of test results.
    Summarize(SummarizeArgs),
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
}

/// Arguments for `settle report`.
#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Primary collection URL (overrides `pipeline.primary_url`)
    #[arg(long)]
    pub primary: Option<String>,
    /// Secondary collection URL (overrides `pipeline.secondary_url`)
    #[arg(long)]
    pub secondary: Option<String>,
    /// Foreign key field in secondary records (overrides `pipeline.foreign_key`)
    #[arg(long)]
    pub foreign_key: Option<String>,
    /// Abort on the first failed endpoint instead of degrading
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for `settle fetch`.
#[derive(Clone, Debug, Args)]
pub struct FetchArgs {
    #[arg(required = true)]
    pub endpoints: Vec<String>,
}

/// Arguments for `settle post`.
#[derive(Clone, Debug, Args)]
pub struct PostArgs {
    pub endpoint: String,
    /// JSON object to send
    #[arg(long)]
    pub body: String,
}

/// Arguments for `settle summarize`.
#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    /// File holding a JSON array of test results, or `-` for stdin
    pub input: PathBuf,
}

/// Output types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Aggregate,
    Outcome,
    Warning,
    Summary,
}

/// Arguments for `settle schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
