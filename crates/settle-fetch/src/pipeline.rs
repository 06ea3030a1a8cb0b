//! Fetch → decode → join → report.

use settle_core::decode::{decode_primary, decode_secondary};
use settle_core::join::aggregate;
use settle_core::{AggregateRecord, Category, CategorySet, Reporter, StrictError};

use crate::collector::collect_array;
use crate::{Fetch, PipelineError};

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    pub primary_url: String,
    pub secondary_url: String,
    /// Field in each secondary record holding the owner id.
    pub foreign_key: String,
    pub categories: Vec<Category>,
    /// Treat any endpoint failure as fatal instead of degrading.
    pub fail_fast: bool,
}

/// Fetch the primary and secondary collections concurrently, join them, and
/// hand the records to `reporter`.
///
/// Fetch failures and quarantined records are reported as warnings and the
/// run degrades (see [`settle_core::join`]). The category set is validated
/// before any request is sent.
///
/// # Errors
///
/// - [`PipelineError::Category`] when the category set is invalid.
/// - [`PipelineError::Strict`] when `fail_fast` is set and an endpoint failed.
pub async fn run_pipeline<F, R>(
    fetcher: &F,
    spec: &PipelineSpec,
    reporter: &mut R,
) -> Result<Vec<AggregateRecord>, PipelineError>
where
    F: Fetch,
    R: Reporter + ?Sized,
{
    let categories = CategorySet::new(spec.categories.clone())?;

    let endpoints = [spec.primary_url.clone(), spec.secondary_url.clone()];
    let [primary_raw, secondary_raw] = collect_array(fetcher, &endpoints, reporter).await;

    if spec.fail_fast {
        for (endpoint, outcome) in endpoints.iter().zip([&primary_raw, &secondary_raw]) {
            if let Some(reason) = outcome.reason() {
                return Err(StrictError {
                    endpoint: endpoint.clone(),
                    reason: reason.clone(),
                }
                .into());
            }
        }
    }

    let (primary, primary_quarantine) = decode_primary(primary_raw);
    let (secondary, secondary_quarantine) = decode_secondary(secondary_raw, &spec.foreign_key);
    for warning in [
        primary_quarantine.into_warning(&spec.primary_url),
        secondary_quarantine.into_warning(&spec.secondary_url),
    ]
    .into_iter()
    .flatten()
    {
        reporter.warn(&warning);
    }

    let records = aggregate(&primary, &secondary, &categories);
    tracing::debug!(
        owners = primary.len(),
        owned = secondary.len(),
        records = records.len(),
        "pipeline joined"
    );
    reporter.report(&records);
    Ok(records)
}
