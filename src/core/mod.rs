//! Post-processing of parsed messages.
//!
//! This module contains:
//! - [`models`] - Output configuration and the [`Record`](models::Record) row view
//! - [`filter`] - Message filtering by date, sender and source date
//! - [`summary`] - Counts for terminal reports
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use classpack::core::{
//!     Message, OutputConfig, FilterConfig, ChatSummary,
//!     apply_filters, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod summary;

pub use filter::{FilterConfig, apply_filters};
pub use models::{OutputConfig, Record};
pub use summary::{ChatSummary, ClassSummary, ascii_only};

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
