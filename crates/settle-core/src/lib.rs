//! # settle-core
//!
//! Core types and pure computations for settle.
//!
//! This crate provides everything in the pipeline that does no I/O:
//! - [`Outcome`] and its failure taxonomy
//! - Typed primary/secondary/aggregate records
//! - Decoding raw JSON into records, with quarantine of bad shapes
//! - Named category predicates
//! - The foreign-key joiner
//! - Finite-number and status-summary reductions
//! - The [`Reporter`] interface

pub mod category;
pub mod decode;
pub mod errors;
pub mod join;
pub mod outcome;
pub mod records;
pub mod report;
pub mod stats;

pub use category::{Category, CategorySet, Predicate};
pub use errors::{CategoryError, StrictError};
pub use outcome::{FailureReason, HttpStatus, Outcome, Warning};
pub use records::{AggregateRecord, PrimaryRecord, SecondaryRecord};
pub use report::{MemoryReporter, Reporter, TracingReporter};
