//! Configuration types for parsing, combining and extraction.
//!
//! Plain builder-style structs with no CLI framework dependency, so they can
//! also be loaded from JSON or TOML by a host application.
//!
//! - [`ParserConfig`] - message assembly settings
//! - [`CombineConfig`] - multi-export deduplication settings
//! - [`ExtractorConfig`] - teacher identity and evidence length
//! - [`MediaConfig`] - teacher identity and context window for media naming
//!
//! # Example
//!
//! ```rust
//! use classpack::config::{CombineConfig, ExtractorConfig, ParserConfig};
//!
//! let extractor = ExtractorConfig::new().with_teacher("Vaishnavi");
//! let combine = CombineConfig::new()
//!     .with_parser(ParserConfig::new().with_skip_system_messages(true));
//! ```

use serde::{Deserialize, Serialize};

/// Display-name substring used when no teacher identity is configured.
pub const DEFAULT_TEACHER: &str = "Vaishnavi";

/// Number of body characters kept as evidence and used in dedup keys.
pub const DEFAULT_PREFIX_LEN: usize = 100;

/// Minutes either side of a media timestamp searched for a teacher message.
pub const DEFAULT_CONTEXT_WINDOW_MINUTES: i64 = 30;

/// Configuration for assembling messages from transcript lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Drop WhatsApp system notices such as "joined using this group's
    /// invite link" (default: false)
    pub skip_system_messages: bool,
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether system notices are dropped.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }
}

/// Configuration for merging several exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Body characters that take part in the dedup key (default: 100)
    pub dedup_prefix_len: usize,

    /// Settings used for every source
    pub parser: ParserConfig,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            dedup_prefix_len: DEFAULT_PREFIX_LEN,
            parser: ParserConfig::default(),
        }
    }
}

impl CombineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many body characters take part in deduplication.
    #[must_use]
    pub fn with_dedup_prefix_len(mut self, len: usize) -> Self {
        self.dedup_prefix_len = len;
        self
    }

    /// Sets the per-source parser configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// Configuration for class/event extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Case-insensitive substring of the teacher's display name
    pub teacher: String,

    /// Body characters kept as evidence before the `...` marker (default: 100)
    pub evidence_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            teacher: DEFAULT_TEACHER.to_string(),
            evidence_len: DEFAULT_PREFIX_LEN,
        }
    }
}

impl ExtractorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teacher identity.
    #[must_use]
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the evidence length.
    #[must_use]
    pub fn with_evidence_len(mut self, len: usize) -> Self {
        self.evidence_len = len;
        self
    }
}

/// Configuration for naming media attached to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Case-insensitive substring of the teacher's display name
    pub teacher: String,

    /// Minutes either side of the media timestamp searched for context (default: 30)
    pub window_minutes: i64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            teacher: DEFAULT_TEACHER.to_string(),
            window_minutes: DEFAULT_CONTEXT_WINDOW_MINUTES,
        }
    }
}

impl MediaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teacher identity.
    #[must_use]
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the context window in minutes.
    #[must_use]
    pub fn with_window_minutes(mut self, minutes: i64) -> Self {
        self.window_minutes = minutes;
        self
    }
}
