//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::{OutputConfig, Record};
use crate::error::{ClasspackError, Result};

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: those of [`Record::columns`], e.g. `Date;Time;Sender;Body`
///   for messages, with a leading `Timestamp` when enabled
/// - Encoding: UTF-8
pub fn write_csv<R: Record>(records: &[R], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, records, config)?;
    Ok(())
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv<R: Record>(records: &[R], config: &OutputConfig) -> Result<String> {
    let bytes = write_records(Vec::new(), records, config)?;
    String::from_utf8(bytes).map_err(|e| ClasspackError::invalid_format("csv", e.to_string()))
}

fn write_records<W: Write, R: Record>(sink: W, records: &[R], config: &OutputConfig) -> Result<W> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(R::columns(config).iter().map(|c| c.header))?;
    for record in records {
        writer.write_record(
            record
                .values(config)?
                .into_iter()
                .map(Option::unwrap_or_default),
        )?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}
