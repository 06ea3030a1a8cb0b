use std::io::Write;

use settle_core::{AggregateRecord, Reporter, Warning};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::{aggregate_view, render_with_view};

/// Writes warnings to stderr as they arrive and renders the final records.
pub struct ConsoleReporter<W: Write> {
    format: OutputFormat,
    quiet: bool,
    categories: Vec<String>,
    stderr: W,
    warnings: usize,
    rendered: Option<anyhow::Result<String>>,
}

impl ConsoleReporter<std::io::Stderr> {
    pub fn new(flags: &GlobalFlags, categories: Vec<String>) -> Self {
        Self::with_writer(flags, categories, std::io::stderr())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub const fn with_writer(flags: &GlobalFlags, categories: Vec<String>, stderr: W) -> Self {
        Self {
            format: flags.format,
            quiet: flags.quiet,
            categories,
            stderr,
            warnings: 0,
            rendered: None,
        }
    }

    pub const fn warnings(&self) -> usize {
        self.warnings
    }

    /// The rendered records, if [`Reporter::report`] was called.
    pub fn finish(self) -> anyhow::Result<Option<String>> {
        self.rendered.transpose()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn warn(&mut self, warning: &Warning) {
        self.warnings += 1;
        tracing::debug!(%warning, "pipeline warning");
        if !self.quiet {
            let _ = writeln!(self.stderr, "warning: {warning}");
        }
    }

    fn report(&mut self, records: &[AggregateRecord]) {
        let rendered = render_with_view(&records, self.format, || {
            aggregate_view(records, &self.categories)
        });
        self.rendered = Some(rendered);
    }
}
