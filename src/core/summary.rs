//! Summary statistics over parsed messages and extracted class dates.

use std::collections::BTreeMap;

use crate::Message;
use crate::extract::ClassDate;
use crate::search::DriveLinkFinder;

/// Counts over a message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSummary {
    /// Number of messages.
    pub total: usize,
    /// Messages sent by the teacher.
    pub from_teacher: usize,
    /// Messages containing at least one Google Drive link.
    pub with_drive_links: usize,
    /// Date string of the first message.
    pub first_date: Option<String>,
    /// Date string of the last message.
    pub last_date: Option<String>,
}

impl ChatSummary {
    /// Summarizes `messages`, attributing to `teacher` by
    /// [`Message::is_from`].
    pub fn new(messages: &[Message], teacher: &str, links: &DriveLinkFinder) -> Self {
        Self {
            total: messages.len(),
            from_teacher: messages.iter().filter(|m| m.is_from(teacher)).count(),
            with_drive_links: messages.iter().filter(|m| links.is_match(&m.body)).count(),
            first_date: messages.first().map(|m| m.date.clone()),
            last_date: messages.last().map(|m| m.date.clone()),
        }
    }

    /// Returns `(first, last)` dates if there are messages.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        Some((self.first_date.as_deref()?, self.last_date.as_deref()?))
    }
}

/// Class date counts per type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSummary {
    /// Count per type name, ordered by name.
    pub by_type: BTreeMap<&'static str, usize>,
    /// Total class dates.
    pub total: usize,
}

impl ClassSummary {
    /// Counts `classes` by type.
    pub fn new(classes: &[ClassDate]) -> Self {
        let mut by_type = BTreeMap::new();
        for class in classes {
            *by_type.entry(class.class_type.as_str()).or_insert(0) += 1;
        }
        Self {
            by_type,
            total: classes.len(),
        }
    }
}

/// Drops every non-ASCII character, for plain terminal output.
///
/// ```
/// use classpack::core::summary::ascii_only;
///
/// assert_eq!(ascii_only("Class today 🎶 at 5"), "Class today  at 5");
/// ```
pub fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}
