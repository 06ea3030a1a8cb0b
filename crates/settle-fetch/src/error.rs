//! Fetch and pipeline error types.
//!
//! Fetch failures are not here: they are [`settle_core::FailureReason`]
//! values inside an `Outcome`. These errors cover setup and caller mistakes.

use settle_core::{CategoryError, StrictError};
use thiserror::Error;

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// TLS backend or client builder failure.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The category set is unusable.
    #[error("invalid category set: {0}")]
    Category(#[from] CategoryError),

    /// Fail-fast mode is on and an endpoint failed.
    #[error(transparent)]
    Strict(#[from] StrictError),
}
