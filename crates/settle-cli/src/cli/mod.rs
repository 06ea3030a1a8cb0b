use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `settle` binary.
#[derive(Debug, Parser)]
#[command(
    name = "settle",
    version,
    about = "settle - fetch collections concurrently and aggregate what settles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (suppress warnings on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Per-request timeout in seconds; 0 disables it (overrides `http.timeout_secs`)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Extract global flags, falling back to `default_format` when `--format`
    /// was not given.
    #[must_use]
    pub fn global_flags(&self, default_format: &str) -> GlobalFlags {
        GlobalFlags {
            format: self
                .format
                .or_else(|| OutputFormat::from_config(default_format))
                .unwrap_or(OutputFormat::Json),
            quiet: self.quiet,
            verbose: self.verbose,
            timeout_secs: self.timeout_secs,
        }
    }
}
