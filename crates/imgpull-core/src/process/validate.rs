//! Structure check without downloading anything.

use std::path::Path;

use csv::StringRecord;
use serde::Serialize;

use super::{open_with_header, ProcessError, RowProcessor};

/// Shape of a CSV file that passed [`RowProcessor::validate_structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub header_columns: usize,
    pub data_rows: usize,
}

impl RowProcessor {
    /// Checks that the header and every data row have at least
    /// `expected_columns` cells. Stops at the first short or undecodable row,
    /// whatever the malformed-row policy.
    pub fn validate_structure(
        &self,
        path: &Path,
        expected_columns: usize,
    ) -> Result<StructureReport, ProcessError> {
        let (mut reader, header_columns) = open_with_header(path, expected_columns)?;
        let mut record = StringRecord::new();
        let mut data_rows = 0usize;

        loop {
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    data_rows += 1;
                    if record.len() < expected_columns {
                        return Err(ProcessError::RowTooShort {
                            row: data_rows,
                            expected: expected_columns,
                            found: record.len(),
                        });
                    }
                }
                Err(e) if e.is_io_error() => {
                    return Err(ProcessError::Read {
                        after_row: data_rows,
                        source: e,
                    });
                }
                Err(e) => {
                    return Err(ProcessError::MalformedRow {
                        row: data_rows + 1,
                        source: e,
                    });
                }
            }
        }

        tracing::debug!(header_columns, data_rows, "structure ok: {}", path.display());
        Ok(StructureReport {
            header_columns,
            data_rows,
        })
    }
}
