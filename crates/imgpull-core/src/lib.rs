//! Core engine for imgpull: read a CSV, pull the image URL out of each row,
//! fetch it and save it as `image_<row><ext>`.

pub mod config;
pub mod logging;

pub mod fetch;
pub mod process;
pub mod storage;
pub mod url_model;

pub use fetch::{FetchError, FetchOptions, Fetcher};
pub use process::{MalformedRowPolicy, ProcessError, ProcessResult, RowProcessor};
