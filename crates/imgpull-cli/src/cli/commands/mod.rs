//! CLI command handlers.

mod check;
mod download;

pub use check::run_check;
pub use download::{run_download, DownloadArgs};
