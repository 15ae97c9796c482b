//! Output configuration and the tabular view of records.
//!
//! Both [`Message`] and [`ClassDate`] are written through the same writers.
//! Each implements [`Record`], which lists its columns and produces one row
//! of values for a given [`OutputConfig`].

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::Result;
use crate::extract::ClassDate;

/// Timestamp layout used in every output format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for output writers.
///
/// # Example
///
/// ```
/// use classpack::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps();
/// assert!(config.include_timestamps);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Add a resolved `YYYY-MM-DD HH:MM:SS` timestamp column.
    pub include_timestamps: bool,
}

impl OutputConfig {
    /// Creates the default configuration (no timestamp column).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the timestamp column.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }
}

/// One output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// CSV header.
    pub header: &'static str,
    /// JSON object key.
    pub key: &'static str,
}

impl Column {
    const fn new(header: &'static str, key: &'static str) -> Self {
        Self { header, key }
    }
}

/// A value that can be written as one output row.
pub trait Record {
    /// Columns written for `config`, in order.
    fn columns(config: &OutputConfig) -> Vec<Column>;

    /// Values matching [`columns`](Record::columns); `None` is an empty CSV
    /// cell and an omitted JSON key.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`](crate::ClasspackError::InvalidDateTime)
    /// when a requested timestamp cannot be resolved.
    fn values(&self, config: &OutputConfig) -> Result<Vec<Option<String>>>;
}

const TIMESTAMP: Column = Column::new("Timestamp", "timestamp");
const DATE: Column = Column::new("Date", "date");
const TIME: Column = Column::new("Time", "time");

impl Record for Message {
    fn columns(config: &OutputConfig) -> Vec<Column> {
        let mut columns = Vec::with_capacity(5);
        if config.include_timestamps {
            columns.push(TIMESTAMP);
        }
        columns.extend([
            DATE,
            TIME,
            Column::new("Sender", "sender"),
            Column::new("Body", "body"),
        ]);
        columns
    }

    fn values(&self, config: &OutputConfig) -> Result<Vec<Option<String>>> {
        let mut values = Vec::with_capacity(5);
        if config.include_timestamps {
            values.push(Some(self.datetime()?.format(TIMESTAMP_FORMAT).to_string()));
        }
        values.extend([
            Some(self.date.clone()),
            Some(self.time.clone()),
            Some(self.sender.clone()),
            Some(self.body.clone()),
        ]);
        Ok(values)
    }
}

impl Record for ClassDate {
    fn columns(config: &OutputConfig) -> Vec<Column> {
        let mut columns = vec![
            DATE,
            TIME,
            Column::new("Type", "class_type"),
            Column::new("Evidence", "evidence"),
        ];
        if config.include_timestamps {
            columns.push(Column::new("SourceTimestamp", "source_timestamp"));
        }
        columns
    }

    fn values(&self, config: &OutputConfig) -> Result<Vec<Option<String>>> {
        let mut values = vec![
            Some(self.date.clone()),
            self.time.clone(),
            Some(self.class_type.to_string()),
            Some(self.evidence.clone()),
        ];
        if config.include_timestamps {
            values.push(Some(
                self.source_timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ));
        }
        Ok(values)
    }
}
