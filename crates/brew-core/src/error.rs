//! Error types for the log and its queries.

use thiserror::Error;

/// Errors from mutating the entry store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The index does not address an entry in the requested view.
    #[error("no entry at index {index} (log has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors from building a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The interval name is not one of day, week, month, year or all.
    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    /// The week start is not sunday or monday.
    #[error("unknown week start: {0}")]
    UnknownWeekStart(String),
}
