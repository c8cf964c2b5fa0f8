//! Structured error types for hangdash
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("No profile fragments to normalize")]
    NoFragments,

    #[error("Fragment {0} contains no threads")]
    EmptyFragment(usize),

    #[error("Profile lists thread names but is not marked as split")]
    UnexpectedThreadNames,

    #[error("Malformed stack table at index {index}: prefix {prefix} {reason}")]
    MalformedStackTable { index: usize, prefix: i64, reason: &'static str },

    #[error("{table}.{column} has {actual} entries, expected {expected}")]
    ColumnLengthMismatch { table: &'static str, column: &'static str, expected: usize, actual: usize },

    #[error("Malformed sample table: {0}")]
    MalformedSampleTable(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StringTableError {
    #[error("String handle {handle} out of range (table holds {len} strings)")]
    OutOfRange { handle: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Selected stack {stack} is outside the stack table (length {stack_count})")]
    InvalidSelection { stack: usize, stack_count: usize },
}

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("Failed to parse {url}: {source}")]
    ParseFailure {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Date graph worker disconnected")]
    Disconnected,
}
