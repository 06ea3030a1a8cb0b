//! Reporter interface.
//!
//! The aggregation core calls a [`Reporter`] for warnings and final records but
//! never formats or prints anything itself.

use crate::outcome::Warning;
use crate::records::AggregateRecord;

/// Consumer of pipeline warnings and aggregate results.
pub trait Reporter {
    /// Called once per non-fatal problem, in the order problems are found.
    fn warn(&mut self, warning: &Warning);

    /// Called once with the final ordered records.
    fn report(&mut self, records: &[AggregateRecord]);
}

/// Logs warnings through `tracing` and drops records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warn(&mut self, warning: &Warning) {
        match warning {
            Warning::FetchFailed { endpoint, reason } => {
                tracing::warn!(%endpoint, %reason, "fetch failed");
            }
            Warning::Quarantined {
                endpoint,
                rejected,
                first_error,
            } => {
                tracing::warn!(%endpoint, rejected, %first_error, "records quarantined");
            }
        }
    }

    fn report(&mut self, records: &[AggregateRecord]) {
        tracing::debug!(records = records.len(), "aggregation complete");
    }
}

/// Keeps everything it is given. Useful for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    pub warnings: Vec<Warning>,
    pub records: Vec<AggregateRecord>,
}

impl Reporter for MemoryReporter {
    fn warn(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
    }

    fn report(&mut self, records: &[AggregateRecord]) {
        self.records = records.to_vec();
    }
}
