//! Default command – download one image per CSV row.

use anyhow::{Context, Result};
use imgpull_core::url_model::is_valid_url;
use imgpull_core::{FetchOptions, Fetcher, MalformedRowPolicy, ProcessResult, RowProcessor};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fully resolved settings for one run (flags merged over config).
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub csv_file: PathBuf,
    pub url_column: usize,
    pub download_dir: PathBuf,
    pub fetch: FetchOptions,
    pub malformed: MalformedRowPolicy,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    #[serde(flatten)]
    result: ProcessResult,
    download_dir: &'a Path,
}

pub fn run_download(args: &DownloadArgs) -> Result<ProcessResult> {
    fs::create_dir_all(&args.download_dir).with_context(|| {
        format!("creating download directory {}", args.download_dir.display())
    })?;

    let processor = RowProcessor::with_malformed_policy(args.malformed);
    let fetcher = Fetcher::with_options(args.fetch);
    let verbose = !args.json;
    tracing::debug!(
        options = ?fetcher.options(),
        malformed = ?processor.malformed_policy(),
        dir = %args.download_dir.display(),
        "effective settings"
    );

    let result = processor
        .process_csv(&args.csv_file, args.url_column, |url, row| {
            let outcome = download_row(&fetcher, url, &args.download_dir, row, verbose);
            if let Err(e) = &outcome {
                if verbose {
                    println!("Row {} failed: {:#}", row, e);
                }
            }
            outcome
        })
        .with_context(|| format!("processing CSV file {}", args.csv_file.display()))?;

    print_summary(&result, &args.download_dir, args.json)?;
    Ok(result)
}

fn download_row(
    fetcher: &Fetcher,
    url: &str,
    download_dir: &Path,
    row: usize,
    verbose: bool,
) -> Result<()> {
    if !is_valid_url(url) {
        anyhow::bail!("invalid URL format: {}", url);
    }
    if verbose {
        println!("Downloading row {}: {}", row, url);
    }
    let path = fetcher.download_image(url, download_dir, row)?;
    tracing::info!(row, path = %path.display(), "downloaded");
    Ok(())
}

fn print_summary(result: &ProcessResult, download_dir: &Path, json: bool) -> Result<()> {
    if json {
        let summary = Summary {
            result: *result,
            download_dir,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!();
    println!("Download Summary:");
    println!("  Successful downloads: {}", result.success_count);
    println!("  Failed downloads:     {}", result.error_count);
    println!("  Images saved to:      {}/", download_dir.display());
    Ok(())
}
