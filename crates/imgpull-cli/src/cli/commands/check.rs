//! `imgpull --check` – validate CSV structure without downloading.

use anyhow::{Context, Result};
use imgpull_core::RowProcessor;
use std::path::Path;

pub fn run_check(csv_file: &Path, url_column: usize, json: bool) -> Result<()> {
    let report = RowProcessor::new()
        .validate_structure(csv_file, url_column)
        .with_context(|| format!("checking CSV file {}", csv_file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "CSV structure OK: {} header columns, {} data rows (URL column {})",
            report.header_columns, report.data_rows, url_column
        );
    }
    Ok(())
}
