//! Error types for settle-core.
//!
//! Network-originated problems are never errors in this crate: they are
//! [`FailureReason`] values inside an [`crate::Outcome`]. The types here cover
//! what is left over: caller mistakes that must abort an aggregation instead of
//! degrading it, and the opt-in fail-fast conversion.

use thiserror::Error;

use crate::outcome::FailureReason;

/// A category set that cannot be evaluated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// The category set has no entries.
    #[error("category set is empty")]
    Empty,

    /// A category has a blank name.
    #[error("category at position {position} has an empty name")]
    EmptyName { position: usize },

    /// Two categories share a name, so counts would collide.
    #[error("duplicate category name: {name}")]
    DuplicateName { name: String },

    /// A category predicate names no field.
    #[error("category '{name}' has an empty predicate field")]
    EmptyField { name: String },
}

/// Raised by [`crate::Outcome::into_strict`] when a failed outcome is treated
/// as pipeline-fatal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{endpoint} failed: {reason}")]
pub struct StrictError {
    pub endpoint: String,
    pub reason: FailureReason,
}
