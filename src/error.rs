//! Error types.
//!
//! Rule evaluation itself is infallible: short series and unusable limits are
//! absorbed as "no violation". The only condition surfaced from the analytical
//! core is an undefined baseline ([`StatsError`]); [`Error`] covers the outer
//! surfaces (configuration parsing, table export).

use serde::Serialize;
use thiserror::Error;

/// Why baseline statistics could not be estimated.
///
/// Carried inside an evaluation rather than returned as a failure, so callers
/// can still render the series while suppressing control lines.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsError {
    /// Fewer than two samples; the sample standard deviation is undefined.
    #[error("insufficient data: need at least 2 samples, got {n}")]
    InsufficientData { n: usize },

    /// A NaN or infinite sample makes the mean and deviation meaningless.
    #[error("non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    /// Finite samples whose mean, σ or control band overflowed.
    #[error("baseline statistics overflowed to a non-finite value")]
    NonFiniteStatistics,
}

/// Errors from configuration loading and report export.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the export failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A row does not match the table's column count.
    #[error("row has {actual} cells, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}
