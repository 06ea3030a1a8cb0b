//! Settled fetch results.
//!
//! An [`Outcome`] is produced exactly once per fetch. Expected failure classes
//! (transport errors, non-2xx statuses, unparseable bodies) are values here,
//! never errors, so a collection of outcomes can always be joined.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::StrictError;

// ---------------------------------------------------------------------------
// HttpStatus
// ---------------------------------------------------------------------------

/// Status classification carried by [`FailureReason::Http`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HttpStatus {
    /// The server answered with a non-2xx status code.
    Code(u16),
    /// The server answered 2xx but the body was not the expected JSON shape.
    Invalid,
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

// ---------------------------------------------------------------------------
// FailureReason
// ---------------------------------------------------------------------------

/// Why a fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// DNS, connection, or timeout failure before a response arrived.
    Network(String),
    /// A response arrived but could not be used.
    Http(HttpStatus),
}

impl FailureReason {
    /// Short label used in tabular output (`network` / `http`).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http(_) => "http",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Http(status) => write!(f, "http error ({status})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The settled result of one fetch: an ordered payload or a classified failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { payload: Vec<T> },
    Failure { reason: FailureReason },
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn success(payload: Vec<T>) -> Self {
        Self::Success { payload }
    }

    #[must_use]
    pub const fn failure(reason: FailureReason) -> Self {
        Self::Failure { reason }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if this outcome failed.
    #[must_use]
    pub const fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }

    /// Borrow the payload, treating a failure as an empty collection.
    ///
    /// This is the partial-failure degrade used by the joiner for secondary
    /// collections.
    #[must_use]
    pub fn payload_or_empty(&self) -> &[T] {
        match self {
            Self::Success { payload } => payload.as_slice(),
            Self::Failure { .. } => &[],
        }
    }

    /// Number of records carried (zero on failure).
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload_or_empty().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map the payload element-wise, preserving failures unchanged.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { payload } => Outcome::Success {
                payload: payload.into_iter().map(f).collect(),
            },
            Self::Failure { reason } => Outcome::Failure { reason },
        }
    }

    /// Convert into a plain `Result`, for callers that want fail-fast semantics.
    ///
    /// # Errors
    ///
    /// Returns [`StrictError`] naming `endpoint` when the outcome is a failure.
    pub fn into_strict(self, endpoint: &str) -> Result<Vec<T>, StrictError> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure { reason } => Err(StrictError {
                endpoint: endpoint.to_string(),
                reason,
            }),
        }
    }
}

impl<T> From<Result<Vec<T>, FailureReason>> for Outcome<T> {
    fn from(result: Result<Vec<T>, FailureReason>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(reason) => Self::failure(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Warning
// ---------------------------------------------------------------------------

/// A non-fatal problem surfaced to the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An endpoint settled with a failure.
    FetchFailed {
        endpoint: String,
        reason: FailureReason,
    },
    /// Some records from an endpoint failed shape validation and were dropped.
    Quarantined {
        endpoint: String,
        rejected: usize,
        first_error: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { endpoint, reason } => write!(f, "{endpoint}: {reason}"),
            Self::Quarantined {
                endpoint,
                rejected,
                first_error,
            } => write!(
                f,
                "{endpoint}: {rejected} record(s) quarantined (first: {first_error})"
            ),
        }
    }
}
