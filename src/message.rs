//! The chat message record.
//!
//! A [`Message`] keeps the date and time exactly as the export wrote them.
//! The calendar datetime is derived on demand with [`Message::datetime`],
//! which fails loudly instead of guessing.
//!
//! # Example
//!
//! ```
//! use classpack::Message;
//!
//! let msg = Message::new("5:55 PM", "2/8/2026", "Vaishnavi Kondapalli", "Class today at 5");
//! assert!(msg.is_from("vaishnavi"));
//! assert_eq!(msg.datetime()?.to_string(), "2026-02-08 17:55:00");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parsing::parse_message_datetime;

/// One message from a chat export.
///
/// | Field | Example |
/// |-------|---------|
/// | `time` | `5:55 PM`, `5:54:21 PM` |
/// | `date` | `2/8/2026`, `7/17/23` (month first) |
/// | `sender` | `Vaishnavi Kondapalli` |
/// | `body` | full text, newlines between continuation lines |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Time as written in the export.
    pub time: String,

    /// Date as written in the export.
    pub date: String,

    /// Display name of the author.
    pub sender: String,

    /// Message text. Multi-line messages keep their line breaks.
    pub body: String,
}

impl Message {
    /// Creates a message from its four source fields.
    pub fn new(
        time: impl Into<String>,
        date: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Parses `date` + `time` into a calendar datetime.
    ///
    /// Tries a 4-digit year first, then a 2-digit year; seconds are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`](crate::ClasspackError::InvalidDateTime)
    /// if neither format gives a valid datetime.
    pub fn datetime(&self) -> Result<NaiveDateTime> {
        parse_message_datetime(&self.date, &self.time)
    }

    /// Returns `true` if `identity` appears in the sender name, ignoring case.
    ///
    /// ```
    /// use classpack::Message;
    ///
    /// let msg = Message::new("5:55 PM", "2/8/2026", "Vaishnavi  Kondapalli", "hi");
    /// assert!(msg.is_from("VAISHNAVI"));
    /// assert!(!msg.is_from("Priya"));
    /// ```
    pub fn is_from(&self, identity: &str) -> bool {
        self.sender.to_lowercase().contains(&identity.to_lowercase())
    }

    /// Returns the body truncated to `max_chars` characters, with `…` appended
    /// when something was cut.
    pub fn preview(&self, max_chars: usize) -> String {
        truncate_chars(&self.body, max_chars, "…")
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Truncates `text` to `max_chars` characters, appending `marker` if cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], marker),
        None => text.to_string(),
    }
}

/// Returns the first `max_chars` characters of `text`.
pub(crate) fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_message_new() {
        let msg = Message::new("5:55 PM", "2/8/2026", "Alice", "Hello");
        assert_eq!(msg.time, "5:55 PM");
        assert_eq!(msg.date, "2/8/2026");
        assert_eq!(msg.sender, "Alice");
        assert_eq!(msg.body, "Hello");
    }

    #[test]
    fn test_datetime_two_digit_year() {
        let msg = Message::new("5:54:21 PM", "7/17/23", "Priya", "ok");
        let dt = msg.datetime().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 7, 17).unwrap());
        assert_eq!((dt.hour(), dt.minute()), (17, 54));
    }

    #[test]
    fn test_datetime_invalid() {
        let msg = Message::new("5:55 PM", "2/30/2026", "Alice", "hi");
        assert!(msg.datetime().unwrap_err().is_invalid_datetime());
    }

    #[test]
    fn test_preview() {
        let msg = Message::new("9:00 AM", "3/1/2025", "A", "नमस्ते everyone");
        assert_eq!(msg.preview(6), "नमस्ते…");
        assert_eq!(msg.preview(100), "नमस्ते everyone");
    }

    #[test]
    fn test_prefix_chars() {
        assert_eq!(prefix_chars("abcdef", 3), "abc");
        assert_eq!(prefix_chars("ab", 3), "ab");
        assert_eq!(prefix_chars("🎵🎵🎵🎵", 2), "🎵🎵");
    }

    #[test]
    fn test_is_empty() {
        assert!(Message::new("9:00 AM", "3/1/2025", "A", "  ").is_empty());
        assert!(!Message::new("9:00 AM", "3/1/2025", "A", "x").is_empty());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new("5:55 PM", "2/8/2026", "Alice", "Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"Alice\""));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
