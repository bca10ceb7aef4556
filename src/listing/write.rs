use std::fs::File;
use std::path::Path;

use crate::error::WriteError;
use crate::listing::record::{PaperRecord, COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { rows: usize },
    /// Nothing to write; the destination was left untouched.
    NoData,
}

/// Truncates `path` and writes a header plus one row per record.
pub fn write_csv(records: &[PaperRecord], path: &Path) -> Result<WriteOutcome, WriteError> {
    if records.is_empty() {
        return Ok(WriteOutcome::NoData);
    }

    let csv_err = |source| WriteError::Csv { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(|source| WriteError::Io { path: path.to_path_buf(), source })?;
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    wtr.write_record(COLUMNS).map_err(csv_err)?;
    for record in records {
        wtr.serialize(record).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| WriteError::Io { path: path.to_path_buf(), source })?;
    Ok(WriteOutcome::Written { rows: records.len() })
}

/// Dumps raw page content next to the CSV for later re-extraction.
pub fn save_raw(content: &str, path: &Path) -> Result<(), WriteError> {
    std::fs::write(path, content).map_err(|source| WriteError::Io { path: path.to_path_buf(), source })
}
