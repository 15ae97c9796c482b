//! Output format selection.
//!
//! [`OutputFormat`] names a writer without pulling in any CLI dependency;
//! [`write_to_format`] and [`to_format_string`] dispatch to the writers in
//! [`core::output`](crate::core::output) for any [`Record`].
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> classpack::Result<()> {
//! use classpack::format::{OutputFormat, write_to_format};
//! use classpack::core::models::OutputConfig;
//! use classpack::Message;
//!
//! let messages = vec![Message::new("5:55 PM", "2/8/2026", "Vaishnavi", "Class today at 5")];
//!
//! // Format detection from extension
//! let format = OutputFormat::from_path("classes.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! write_to_format(&messages, "messages.csv", OutputFormat::Csv, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::{OutputConfig, Record};
use crate::error::{ClasspackError, Result};

/// Output file format.
///
/// Parsed from a `--format` value or a file extension; `ndjson` is accepted
/// for JSON Lines.
///
/// ```rust
/// use classpack::format::OutputFormat;
///
/// let format: OutputFormat = "NDJSON".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV, opens directly in spreadsheets
    #[default]
    Csv,

    /// Pretty-printed JSON array
    Json,

    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    const NAMES: &'static [(&'static str, OutputFormat)] = &[
        ("csv", OutputFormat::Csv),
        ("json", OutputFormat::Json),
        ("jsonl", OutputFormat::Jsonl),
        ("ndjson", OutputFormat::Jsonl),
    ];

    /// Extension written for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Every accepted name, aliases included.
    pub fn all_names() -> Vec<&'static str> {
        Self::NAMES.iter().map(|(name, _)| *name).collect()
    }

    /// Every format, in `--help` order.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, format)| *format)
    }

    /// Picks the format from the extension of `path`, ignoring case.
    ///
    /// ```rust
    /// use classpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/classes.JSON").unwrap(), OutputFormat::Json);
    /// assert!(OutputFormat::from_path("notes.txt").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::lookup(ext).ok_or_else(|| {
            ClasspackError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }

    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            format!(
                "Unknown format '{s}'. Expected one of: {}",
                Self::all_names().join(", ")
            )
        })
    }
}

/// Writes records to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format<R: Record>(
    records: &[R],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts records to a string in the specified format.
///
/// ```rust
/// # #[cfg(feature = "json-output")]
/// # fn example() -> classpack::Result<()> {
/// use classpack::format::{OutputFormat, to_format_string};
/// use classpack::core::models::OutputConfig;
/// use classpack::Message;
///
/// let messages = vec![Message::new("5:55 PM", "2/8/2026", "Priya", "ok")];
/// let jsonl = to_format_string(&messages, OutputFormat::Jsonl, &OutputConfig::new())?;
/// assert_eq!(jsonl.lines().count(), 1);
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string<R: Record>(
    records: &[R],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

fn missing_feature(format: OutputFormat) -> ClasspackError {
    ClasspackError::invalid_format(
        "output",
        format!(
            "Output format {format:?} requires the '{}' feature to be enabled",
            format.required_feature()
        ),
    )
}
