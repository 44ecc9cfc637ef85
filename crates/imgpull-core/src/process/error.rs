//! Structural errors: failures that stop a whole CSV pass.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Column indices are 1-based; 0 can never address a cell.
    #[error("URL column index must be at least 1, got {0}")]
    InvalidColumn(usize),

    #[error("failed to open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("expected at least {expected} columns in header, got {found}")]
    HeaderTooShort { expected: usize, found: usize },

    /// The underlying reader failed; iteration cannot make progress.
    #[error("failed to read CSV after row {after_row}: {source}")]
    Read {
        after_row: usize,
        #[source]
        source: csv::Error,
    },

    /// A record could not be decoded (e.g. invalid UTF-8).
    #[error("row {row}: malformed record: {source}")]
    MalformedRow {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: expected at least {expected} columns, got {found}")]
    RowTooShort {
        row: usize,
        expected: usize,
        found: usize,
    },
}
