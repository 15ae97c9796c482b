//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one object per line) - requires `json-output` feature
//!
//! Every writer accepts any [`Record`](crate::core::models::Record): parsed
//! messages and extracted class dates alike.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> classpack::Result<()> {
//! use classpack::core::output::{write_csv, write_jsonl, to_json};
//! use classpack::core::models::OutputConfig;
//! use classpack::Message;
//!
//! let messages = vec![
//!     Message::new("5:55 PM", "2/8/2026", "Vaishnavi", "Class today at 5"),
//!     Message::new("5:56 PM", "2/8/2026", "Priya", "ok"),
//! ];
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_csv(&messages, "messages.csv", &config)?;
//! write_jsonl(&messages, "messages.jsonl", &config)?;
//! let json = to_json(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use crate::core::models::{OutputConfig, Record};
#[cfg(feature = "json-output")]
use crate::error::Result;

/// Builds the JSON object for one record, omitting `None` values.
#[cfg(feature = "json-output")]
fn json_object<R: Record>(record: &R, config: &OutputConfig) -> Result<serde_json::Value> {
    let map = R::columns(config)
        .into_iter()
        .zip(record.values(config)?)
        .filter_map(|(column, value)| {
            value.map(|v| (column.key.to_string(), serde_json::Value::String(v)))
        })
        .collect::<serde_json::Map<_, _>>();
    Ok(serde_json::Value::Object(map))
}
