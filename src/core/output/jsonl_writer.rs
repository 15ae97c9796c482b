//! JSON Lines (JSONL) output writer.
//!
//! One JSON object per line, no enclosing array. Suits line-oriented tools
//! such as `jq -c` or appending several runs to one file.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_object;
use crate::core::models::{OutputConfig, Record};
use crate::error::Result;

/// Writes records to JSONL (JSON Lines) format.
pub fn write_jsonl<R: Record>(records: &[R], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, records, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl<R: Record>(records: &[R], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(&json_object(record, config)?)?);
        out.push('\n');
    }
    Ok(out)
}

fn write_lines<W: Write, R: Record>(writer: &mut W, records: &[R], config: &OutputConfig) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(&json_object(record, config)?)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let messages = vec![
            Message::new("5:55 PM", "2/8/2026", "Vaishnavi", "Class today at 5"),
            Message::new("5:56 PM", "2/8/2026", "Priya", "first\nsecond"),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&messages, path, &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["sender"], "Priya");
        assert_eq!(second["body"], "first\nsecond");
    }

    #[test]
    fn test_jsonl_with_timestamps() {
        let msg = Message::new("5:55 PM", "2/8/2026", "Priya", "hi");
        let out = to_jsonl(&[msg], &OutputConfig::new().with_timestamps()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed["timestamp"], "2026-02-08 17:55:00");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let out = to_jsonl(
            &[Message::new("5:55 PM", "2/8/2026", "Priya", "hi")],
            &OutputConfig::new(),
        )
        .unwrap();
        assert!(!out.starts_with('['));
        assert!(out.ends_with('\n'));
    }
}
