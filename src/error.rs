//! Unified error types for classpack.
//!
//! Every fallible operation in the library returns [`ClasspackError`].
//! The variants follow the three failure classes of the pipeline:
//!
//! - **Unreadable source**: [`Io`](ClasspackError::Io),
//!   [`Archive`](ClasspackError::Archive), [`NoTranscript`](ClasspackError::NoTranscript).
//!   The combiner reports these per source and keeps going;
//!   [`NoReadableSources`](ClasspackError::NoReadableSources) is raised when
//!   every given source was unreadable.
//! - **Unparseable datetime**: [`InvalidDateTime`](ClasspackError::InvalidDateTime).
//!   Fatal for any chronological operation.
//! - **Bad caller input**: [`InvalidDate`](ClasspackError::InvalidDate),
//!   [`InvalidFormat`](ClasspackError::InvalidFormat),
//!   [`InvalidPattern`](ClasspackError::InvalidPattern).
//!
//! A line that matches neither message grammar is not an error at all; it is
//! treated as a continuation line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for classpack operations.
///
/// # Example
///
/// ```rust
/// use classpack::error::Result;
/// use classpack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ClasspackError>;

/// The error type for all classpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClasspackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export looked like a zip archive but could not be read as one.
    #[error("Cannot read archive {}: {source}", path.display())]
    Archive {
        /// Path of the archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// A zip archive contained no `.txt` transcript entry.
    #[error("Archive {} has no chat .txt file inside", path.display())]
    NoTranscript {
        /// Path of the archive
        path: PathBuf,
    },

    /// Export sources were given but every one of them was unreadable.
    #[error("None of the {count} given exports could be read")]
    NoReadableSources {
        /// Number of sources given
        count: usize,
    },

    /// A message's date/time pair matched a line grammar but is not a valid
    /// calendar datetime under any supported date format.
    #[error("Cannot parse date/time: {date} {time}")]
    InvalidDateTime {
        /// Source-formatted date, e.g. `2/30/2026`
        date: String,
        /// Source-formatted time, e.g. `5:55 PM`
        time: String,
    },

    /// Invalid date in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown or unavailable output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A keyword or classifier pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ClasspackError {
    /// Creates an archive error for the given path.
    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ClasspackError::Archive {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing-transcript error for the given archive path.
    pub fn no_transcript(path: impl Into<PathBuf>) -> Self {
        ClasspackError::NoTranscript { path: path.into() }
    }

    /// Creates the error for a combine in which no source could be read.
    pub fn no_readable_sources(count: usize) -> Self {
        ClasspackError::NoReadableSources { count }
    }

    /// Creates an unparseable datetime error.
    pub fn invalid_datetime(date: impl Into<String>, time: impl Into<String>) -> Self {
        ClasspackError::InvalidDateTime {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ClasspackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ClasspackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ClasspackError::Io(_))
    }

    /// Returns `true` if the export source itself could not be read.
    ///
    /// These are the errors the combiner tolerates per source.
    pub fn is_unreadable_source(&self) -> bool {
        matches!(
            self,
            ClasspackError::Io(_)
                | ClasspackError::Archive { .. }
                | ClasspackError::NoTranscript { .. }
        )
    }

    /// Returns `true` if this is an unparseable message datetime.
    pub fn is_invalid_datetime(&self) -> bool {
        matches!(self, ClasspackError::InvalidDateTime { .. })
    }

    /// Returns `true` if this is a date-related filter error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ClasspackError::InvalidDate { .. })
    }
}
