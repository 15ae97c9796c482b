//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::json_object;
use crate::core::models::{OutputConfig, Record};
use crate::error::Result;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"date": "2/8/2026", "time": "5:55 PM", "sender": "Vaishnavi", "body": "Class today at 5"}
/// ]
/// ```
pub fn write_json<R: Record>(records: &[R], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a JSON array string.
///
/// Same format as [`write_json`].
pub fn to_json<R: Record>(records: &[R], config: &OutputConfig) -> Result<String> {
    let array = records
        .iter()
        .map(|r| json_object(r, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&array)?)
}
