//! CSV export of page records

use crate::crawler::PageRecord;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row of every export
pub const CSV_HEADER: [&str; 3] = ["URL", "Title", "Meta Description"];

/// Writes records as CSV, header first
///
/// The header is written even when there are no records.
pub fn write_csv<W: Write>(records: &[PageRecord], writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders records as a CSV string
pub fn records_to_csv(records: &[PageRecord]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
}

/// Writes records to a CSV file at `path`
pub fn export_csv(records: &[PageRecord], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_csv(records, file)
}
