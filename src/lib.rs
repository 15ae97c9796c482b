//! # Classpack
//!
//! A Rust library for turning WhatsApp exports of a music-class group into
//! an ordered message list and a schedule of class, performance and
//! cancellation dates.
//!
//! ## Overview
//!
//! The pipeline has four stages:
//! - **Source** - resolve an export (zip archive or bare `.txt`) to transcript text
//! - **Parse** - split the transcript into [`Message`]s, recognizing both
//!   bracketed timestamp layouts WhatsApp has used
//! - **Combine** - merge several overlapping exports, dropping duplicates and
//!   sorting chronologically
//! - **Extract** - infer [`ClassDate`](extract::ClassDate)s from the
//!   teacher's announcements
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use classpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let combined = Combiner::new()?.combine(&["kiddo.zip", "hindustani.zip"])?;
//!
//!     let extractor = ClassExtractor::new(ExtractorConfig::new().with_teacher("Vaishnavi"))?;
//!     let classes = extractor.extract(&combined.messages)?;
//!
//!     write_json(&classes, "classes.json", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing text directly
//!
//! ```rust
//! use classpack::parser::WhatsAppParser;
//!
//! let parser = WhatsAppParser::new()?;
//! let messages = parser.parse_str("[7/17/23, 5:54:21 PM] Priya: ok");
//!
//! assert_eq!(messages[0].sender, "Priya");
//! assert_eq!(messages[0].datetime()?.to_string(), "2023-07-17 17:54:00");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`source`] - zip / plain-text export resolution
//! - [`parsing`] - line normalization, message grammars, datetime resolution
//! - [`parser`] - [`WhatsAppParser`](parser::WhatsAppParser), message assembly
//! - [`combine`] - [`Combiner`](combine::Combiner), dedup and chronological sort
//! - [`extract`] - [`ClassExtractor`](extract::ClassExtractor) and its pattern tables
//! - [`search`] - keyword search for festivals and events, Drive links
//! - [`media`] - extracting and renaming attached audio, video and photos
//! - [`config`] - parser, combiner and extractor configuration
//! - [`core`] - filters, summaries and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - [`ClasspackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod combine;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod format;
pub mod media;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod search;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{ClasspackError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use classpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ClasspackError, Result};

    // Pipeline
    pub use crate::combine::{Combined, Combiner, merge_messages, sort_chronologically};
    pub use crate::extract::{ClassDate, ClassExtractor, ClassType, extract_classes};
    pub use crate::parser::WhatsAppParser;
    pub use crate::media::{MediaKind, MediaOrganizer, MediaReport};
    pub use crate::search::{DriveLink, DriveLinkFinder, EventMention, EventSearch};

    // Configuration
    pub use crate::config::{CombineConfig, ExtractorConfig, MediaConfig, ParserConfig};
    pub use crate::core::models::OutputConfig;

    // Filtering and summaries
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::summary::{ChatSummary, ClassSummary};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};
}
