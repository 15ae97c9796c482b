//! Keyword search for festivals and community events, and Google Drive
//! links to practice recordings.
//!
//! Unlike the class extractor, [`EventSearch`] looks at every sender: parents
//! often post about the Diwali program or the havan before the teacher does.
//!
//! # Example
//!
//! ```rust
//! use classpack::Message;
//! use classpack::search::EventSearch;
//!
//! let messages = vec![
//!     Message::new("8:00 PM", "10/20/2025", "Priya", "Happy Deepavali everyone!"),
//!     Message::new("8:05 PM", "10/20/2025", "Ravi", "Same to you"),
//! ];
//!
//! let mentions = EventSearch::new()?.search(&messages);
//! assert_eq!(mentions.len(), 1);
//! assert_eq!(mentions[0].label, "Diwali");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::Result;
use crate::extract::PatternSet;
use crate::message::truncate_chars;

/// Built-in keyword table, `(pattern, label)`.
pub const EVENT_KEYWORDS: &[(&str, &str)] = &[
    (r"diwali|deepavali", "Diwali"),
    (r"holi", "Holi"),
    (r"independence|august 15|aug 15", "Independence Day"),
    (r"khmc", "KHMC"),
    (r"cmb|havan", "CMB Havan"),
    (r"annual day", "Annual Day"),
    (r"concert|performance", "Concert/Performance"),
];

/// Google Drive URL, up to whitespace, quotes or angle brackets.
pub const DRIVE_LINK_PATTERN: &str = r#"https?://drive\.google\.com/[^\s<>'"]+"#;

/// Default snippet length in characters.
pub const DEFAULT_SNIPPET_LEN: usize = 100;

/// A message mentioning one keyword row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMention {
    /// Label of the matching row.
    pub label: String,
    /// Date of the message, as exported.
    pub date: String,
    /// Who posted it.
    pub sender: String,
    /// Start of the body, with `...` if it was cut.
    pub snippet: String,
}

/// Case-insensitive keyword search over message bodies.
#[derive(Debug, Clone)]
pub struct EventSearch {
    keywords: PatternSet,
    snippet_len: usize,
}

impl EventSearch {
    /// Creates a search over [`EVENT_KEYWORDS`].
    pub fn new() -> Result<Self> {
        Self::with_table(EVENT_KEYWORDS)
    }

    /// Creates a search over a custom `(pattern, label)` table.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidPattern`](crate::ClasspackError::InvalidPattern)
    /// if a pattern does not compile.
    pub fn with_table<P, L>(table: &[(P, L)]) -> Result<Self>
    where
        P: AsRef<str>,
        L: AsRef<str>,
    {
        Ok(Self {
            keywords: PatternSet::new("keywords", table)?,
            snippet_len: DEFAULT_SNIPPET_LEN,
        })
    }

    /// Sets the snippet length.
    #[must_use]
    pub fn with_snippet_len(mut self, len: usize) -> Self {
        self.snippet_len = len;
        self
    }

    /// Labels searched for, in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.keywords.labels()
    }

    /// Returns one mention per (message, matching row), in message order and
    /// then table order.
    pub fn search(&self, messages: &[Message]) -> Vec<EventMention> {
        let mut mentions = Vec::new();
        for msg in messages {
            for label in self.keywords.matching_labels(&msg.body) {
                mentions.push(EventMention {
                    label: label.to_string(),
                    date: msg.date.clone(),
                    sender: msg.sender.clone(),
                    snippet: truncate_chars(&msg.body, self.snippet_len, "..."),
                });
            }
        }
        mentions
    }
}

/// A Google Drive URL found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveLink {
    /// Date of the message, as exported.
    pub date: String,
    /// Who posted it.
    pub sender: String,
    /// The URL as written.
    pub url: String,
}

/// Finds Google Drive URLs in message bodies, ignoring case.
///
/// ```rust
/// use classpack::search::DriveLinkFinder;
///
/// let finder = DriveLinkFinder::new()?;
/// let urls = finder.urls("Practice: https://drive.google.com/file/d/1AbC/view please");
/// assert_eq!(urls, ["https://drive.google.com/file/d/1AbC/view"]);
/// # Ok::<(), classpack::ClasspackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DriveLinkFinder {
    regex: Regex,
}

impl DriveLinkFinder {
    /// Compiles [`DRIVE_LINK_PATTERN`].
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: RegexBuilder::new(DRIVE_LINK_PATTERN)
                .case_insensitive(true)
                .build()?,
        })
    }

    /// Returns `true` if `text` contains a Drive URL.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns every Drive URL in `text`, in order.
    pub fn urls<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Returns the Drive links posted by `sender` (matched like
    /// [`Message::is_from`]), in message order.
    pub fn links_from(&self, messages: &[Message], sender: &str) -> Vec<DriveLink> {
        messages
            .iter()
            .filter(|msg| msg.is_from(sender))
            .flat_map(|msg| {
                self.urls(&msg.body).into_iter().map(|url| DriveLink {
                    date: msg.date.clone(),
                    sender: msg.sender.clone(),
                    url: url.to_string(),
                })
            })
            .collect()
    }
}
