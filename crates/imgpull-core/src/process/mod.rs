//! CSV row processing.
//!
//! Reads the header, then walks data rows in file order. For each row the URL
//! cell is extracted, trimmed and handed to a caller-supplied callback along
//! with the row number. Per-row failures are counted, never propagated; only
//! structural problems (bad column index, unopenable file, short header,
//! reader failure) end a pass early.

mod error;
mod validate;

pub use error::ProcessError;
pub use validate::StructureReport;

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// Aggregate outcome of one pass. `success_count + error_count == total_rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub success_count: usize,
    pub error_count: usize,
    pub total_rows: usize,
}

/// What to do with a record the CSV reader cannot decode (e.g. invalid UTF-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Count it as a failed row, consume its row number, keep going.
    #[default]
    Count,
    /// Stop the pass with [`ProcessError::MalformedRow`].
    Abort,
}

/// Drives a single sequential pass over a CSV file.
#[derive(Debug, Clone, Default)]
pub struct RowProcessor {
    malformed: MalformedRowPolicy,
}

impl RowProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_malformed_policy(malformed: MalformedRowPolicy) -> Self {
        Self { malformed }
    }

    pub fn malformed_policy(&self) -> MalformedRowPolicy {
        self.malformed
    }

    /// Processes `path`, calling `on_row(url, row_num)` for every data row
    /// whose URL cell (1-based `url_column`) is present and non-blank.
    ///
    /// Row numbers start at 1 for the first data row and advance for every
    /// record read, so a skipped or failed row still consumes its number.
    /// Rows with too few cells or a blank URL are counted as errors without
    /// invoking `on_row`; an `Err` from `on_row` is counted as an error.
    pub fn process_csv<F, E>(
        &self,
        path: &Path,
        url_column: usize,
        on_row: F,
    ) -> Result<ProcessResult, ProcessError>
    where
        F: FnMut(&str, usize) -> Result<(), E>,
        E: Display,
    {
        let (reader, _) = open_with_header(path, url_column)?;
        let result = self.process_records(reader, url_column, on_row)?;
        tracing::info!(
            total = result.total_rows,
            success = result.success_count,
            errors = result.error_count,
            "finished {}",
            path.display()
        );
        Ok(result)
    }

    /// Walks the data rows of a reader already positioned past the header.
    fn process_records<R, F, E>(
        &self,
        mut reader: Reader<R>,
        url_column: usize,
        mut on_row: F,
    ) -> Result<ProcessResult, ProcessError>
    where
        R: io::Read,
        F: FnMut(&str, usize) -> Result<(), E>,
        E: Display,
    {
        let mut result = ProcessResult::default();
        let mut record = StringRecord::new();
        let mut row_num = 1usize;

        loop {
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    result.total_rows += 1;
                    match url_cell(&record, url_column) {
                        None => {
                            result.error_count += 1;
                            tracing::warn!(
                                row = row_num,
                                cells = record.len(),
                                "row has no URL in column {}",
                                url_column
                            );
                        }
                        Some(url) => match on_row(url, row_num) {
                            Ok(()) => {
                                result.success_count += 1;
                                tracing::debug!(row = row_num, url, "row ok");
                            }
                            Err(e) => {
                                result.error_count += 1;
                                tracing::warn!(row = row_num, url, "row failed: {}", e);
                            }
                        },
                    }
                }
                Err(e) if e.is_io_error() => {
                    return Err(ProcessError::Read {
                        after_row: row_num - 1,
                        source: e,
                    });
                }
                Err(e) => match self.malformed {
                    MalformedRowPolicy::Abort => {
                        return Err(ProcessError::MalformedRow {
                            row: row_num,
                            source: e,
                        });
                    }
                    MalformedRowPolicy::Count => {
                        result.total_rows += 1;
                        result.error_count += 1;
                        tracing::warn!(row = row_num, "malformed row: {}", e);
                    }
                },
            }
            row_num += 1;
        }
        Ok(result)
    }
}

/// Opens `path`, reads the header and checks it has at least `min_columns`
/// cells. Returns the reader positioned at the first data row and the header width.
fn open_with_header(
    path: &Path,
    min_columns: usize,
) -> Result<(Reader<File>, usize), ProcessError> {
    if min_columns == 0 {
        return Err(ProcessError::InvalidColumn(min_columns));
    }
    let file = File::open(path).map_err(|source| ProcessError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_header(file, min_columns)
}

/// Wraps `rdr` in a headerless, flexible CSV reader and consumes the header.
fn read_header<R: io::Read>(
    rdr: R,
    min_columns: usize,
) -> Result<(Reader<R>, usize), ProcessError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut header = StringRecord::new();
    reader
        .read_record(&mut header)
        .map_err(ProcessError::Header)?;
    if header.len() < min_columns {
        return Err(ProcessError::HeaderTooShort {
            expected: min_columns,
            found: header.len(),
        });
    }
    Ok((reader, header.len()))
}

/// Trimmed, non-empty cell at 1-based `column`.
fn url_cell(record: &StringRecord, column: usize) -> Option<&str> {
    let url = record.get(column - 1)?.trim();
    (!url.is_empty()).then_some(url)
}
