//! CLI for imgpull.

mod commands;

use anyhow::Result;
use clap::Parser;
use imgpull_core::config::{self, ImgpullConfig};
use imgpull_core::MalformedRowPolicy;
use std::path::PathBuf;

use commands::{run_check, run_download, DownloadArgs};

/// Top-level CLI: one CSV file, one URL column.
#[derive(Debug, Parser)]
#[command(name = "imgpull", version)]
#[command(about = "imgpull: download the image referenced by each row of a CSV file", long_about = None)]
#[command(after_help = "Example: imgpull data.csv 3")]
pub struct Cli {
    /// CSV file to read. The first record is treated as the header.
    pub csv_file: PathBuf,

    /// 1-based index of the column holding the image URL.
    #[arg(value_parser = parse_column_index)]
    pub url_column: usize,

    /// Directory for downloaded images (defaults to `download_dir` from config, "downloads").
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds (defaults to `timeout_secs` from config, 30).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Stop at the first undecodable CSV record instead of counting it as a failed row.
    #[arg(long)]
    pub strict: bool,

    /// Only check the CSV structure against the URL column; download nothing.
    #[arg(long)]
    pub check: bool,

    /// Print the final summary as JSON (per-row lines are suppressed).
    #[arg(long)]
    pub json: bool,
}

/// Parses a 1-based column index.
pub fn parse_column_index(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid URL column index `{}`: {}", s, e))?;
    if n == 0 {
        return Err("invalid URL column index `0`: columns are numbered from 1".to_string());
    }
    Ok(n)
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        if !self.csv_file.exists() {
            anyhow::bail!("CSV file '{}' does not exist", self.csv_file.display());
        }

        if self.check {
            return run_check(&self.csv_file, self.url_column, self.json);
        }

        let cfg = load_config();
        let args = self.download_args(&cfg);
        run_download(&args)?;
        Ok(())
    }

    /// Merge command-line flags over config values.
    fn download_args(&self, cfg: &ImgpullConfig) -> DownloadArgs {
        let mut fetch = cfg.fetch_options();
        if let Some(secs) = self.timeout {
            fetch.timeout = std::time::Duration::from_secs(secs);
        }
        let malformed = if self.strict {
            MalformedRowPolicy::Abort
        } else {
            cfg.on_malformed_row
        };
        DownloadArgs {
            csv_file: self.csv_file.clone(),
            url_column: self.url_column,
            download_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| cfg.download_dir.clone()),
            fetch,
            malformed,
            json: self.json,
        }
    }
}

/// Config problems never block a run; defaults are good enough.
fn load_config() -> ImgpullConfig {
    match config::load_or_init() {
        Ok(cfg) => {
            tracing::debug!("loaded config: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::warn!("could not load config, using defaults: {:#}", e);
            ImgpullConfig::default()
        }
    }
}

#[cfg(test)]
mod tests;
