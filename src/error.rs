//! Error types for the bid table and the CSV loader.
//!
//! Absent keys are never errors: lookups return `Option`. These enums cover
//! the cases a caller has to react to.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::table::BidHashTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table needs at least one slot for `key % size` to be defined
    #[error("table size must be at least 1")]
    ZeroTableSize,

    /// The bid id is not an unsigned integer that fits a `u64` key
    #[error("bid id {0:?} is not an integer key in 0..=18446744073709551615")]
    InvalidId(String),

    /// A bid with this id is already stored
    #[error("bid id {0} is already present")]
    DuplicateId(String),
}

/// A single malformed CSV row. The loader reports and skips these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumn {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid amount {value:?}")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: TableError,
    },
}

impl RowError {
    /// The 1-based file line the error refers to
    pub fn line(&self) -> usize {
        match self {
            RowError::MissingColumn { line, .. }
            | RowError::InvalidAmount { line, .. }
            | RowError::InvalidEncoding { line }
            | RowError::Rejected { line, .. } => *line,
        }
    }
}

/// Errors that abort a whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no header row", .0.display())]
    EmptyFile(PathBuf),
}
