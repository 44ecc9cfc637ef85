//! Per-row fetch errors. None of these abort a run; the row processor counts them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The scheme passed validation but there is no transport for it.
    #[error("unsupported URL scheme `{0}` (only http and https are fetched)")]
    UnsupportedScheme(String),

    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("HTTP request failed: {0}")]
    Transfer(#[from] curl::Error),

    /// Final response status was not 200.
    #[error("HTTP status {0}")]
    Status(u32),

    /// The output file could not be created.
    #[error("failed to create file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the body failed after the file was created. The partial file is left on disk.
    #[error("failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// True if the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transfer(e) if e.is_operation_timedout())
    }

    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
