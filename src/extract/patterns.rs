//! Named pattern tables for class/event classification.
//!
//! Each table is an ordered list of `(pattern, label)` pairs. Patterns are
//! matched case-insensitively; the label names which signal fired, so
//! adding a signal means adding a row, not touching control flow.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Phrases that announce a class is happening.
pub const CLASS_INDICATORS: &[(&str, &str)] = &[
    (r"see the kiddos", "see the kiddos"),
    (r"see you (all|today|tomorrow|sunday|saturday)", "see you"),
    (r"class (at|is|will be|today|tomorrow)", "class at"),
    (r"class.*cancel", "class cancelled"),
    (r"come by \d", "come by"),
    (r"meet\.google\.com", "google meet link"),
    (r"facetime\.apple\.com", "facetime link"),
    (r"zoom\.(us|com)", "zoom link"),
    (r"practice (at|today|tomorrow)", "practice at"),
];

/// Phrases that move or cancel a class.
pub const RESCHEDULE_PATTERNS: &[(&str, &str)] = &[
    (
        r"moved.*(to|for).*(\d{1,2}(st|nd|rd|th)?(\s+of)?\s+\w+|\d{1,2}/\d{1,2})",
        "moved to date",
    ),
    (r"rescheduled.*(to|for)", "rescheduled"),
    (r"cancelled", "cancelled"),
    (r"no class", "no class"),
    (r"class.*cancelled", "class cancelled"),
];

/// Performances and community events.
pub const EVENT_PATTERNS: &[(&str, &str)] = &[
    (r"performance", "performance"),
    (r"concert", "concert"),
    (r"event", "event"),
    (r"havan", "havan"),
    (r"annual day", "annual day"),
];

/// Cues that the class happens over a video call.
pub const ONLINE_CUES: &[(&str, &str)] = &[
    (r"online", "online"),
    (r"facetime", "facetime"),
    (r"meet\.google", "google meet"),
];

/// A time-of-day mention such as `5`, `12:15` or `3 pm`.
pub const TIME_MENTION: &str = r"(?i)\b(\d{1,2}(?::\d{2})?\s*(?:am|pm)?)\b";

/// A compiled, labelled pattern table.
///
/// # Example
///
/// ```rust
/// use classpack::extract::PatternSet;
///
/// let set = PatternSet::new("festivals", &[(r"diwali|deepavali", "Diwali"), (r"holi\b", "Holi")])?;
/// assert_eq!(set.first_match("Happy DIWALI everyone"), Some("Diwali"));
/// assert!(!set.is_match("see you tomorrow"));
/// # Ok::<(), classpack::ClasspackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternSet {
    name: String,
    entries: Vec<(Regex, String)>,
}

impl PatternSet {
    /// Compiles a `(pattern, label)` table.
    pub fn new<P, L>(name: impl Into<String>, table: &[(P, L)]) -> Result<Self>
    where
        P: AsRef<str>,
        L: AsRef<str>,
    {
        let entries = table
            .iter()
            .map(|(pattern, label)| {
                let regex = RegexBuilder::new(pattern.as_ref())
                    .case_insensitive(true)
                    .build()?;
                Ok((regex, label.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            entries,
        })
    }

    /// Table name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, label)| label.as_str())
    }

    /// Label of the first row whose pattern occurs in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(regex, _)| regex.is_match(text))
            .map(|(_, label)| label.as_str())
    }

    /// Labels of every row whose pattern occurs in `text`, in table order.
    pub fn matching_labels<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(regex, _)| regex.is_match(text))
            .map(|(_, label)| label.as_str())
    }

    /// Returns `true` if any row occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.entries.iter().any(|(regex, _)| regex.is_match(text))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_compile() {
        for (name, table) in [
            ("class", CLASS_INDICATORS),
            ("reschedule", RESCHEDULE_PATTERNS),
            ("event", EVENT_PATTERNS),
            ("online", ONLINE_CUES),
        ] {
            let set = PatternSet::new(name, table).unwrap();
            assert_eq!(set.len(), table.len());
            assert_eq!(set.name(), name);
        }
        assert!(Regex::new(TIME_MENTION).is_ok());
    }

    #[test]
    fn test_class_indicators() {
        let set = PatternSet::new("class", CLASS_INDICATORS).unwrap();
        assert_eq!(set.first_match("I will see the kiddos at 4"), Some("see the kiddos"));
        assert_eq!(set.first_match("Class today at 5"), Some("class at"));
        assert_eq!(set.first_match("Please come by 2:30"), Some("come by"));
        assert_eq!(
            set.first_match("Join https://meet.google.com/abc-defg-hij"),
            Some("google meet link")
        );
        assert_eq!(set.first_match("https://zoom.us/j/123"), Some("zoom link"));
        assert_eq!(set.first_match("class cancelled"), Some("class cancelled"));
        assert_eq!(set.first_match("Thanks everyone!"), None);
    }

    #[test]
    fn test_reschedule_patterns() {
        let set = PatternSet::new("reschedule", RESCHEDULE_PATTERNS).unwrap();
        assert_eq!(
            set.first_match("Class is moved to 15th of March"),
            Some("moved to date")
        );
        assert_eq!(set.first_match("moved for 3/16"), Some("moved to date"));
        assert_eq!(set.first_match("Rescheduled to Sunday"), Some("rescheduled"));
        assert_eq!(set.first_match("Class CANCELLED today"), Some("cancelled"));
        assert_eq!(set.first_match("No class this week"), Some("no class"));
        assert_eq!(set.first_match("we moved houses"), None);
    }

    #[test]
    fn test_event_patterns() {
        let set = PatternSet::new("event", EVENT_PATTERNS).unwrap();
        assert_eq!(set.first_match("Annual Day rehearsal"), Some("annual day"));
        assert_eq!(set.first_match("CMB Havan on Sunday"), Some("havan"));
        assert!(set.is_match("Great performance kids!"));

        let all: Vec<_> = set
            .matching_labels("Havan event, then the annual day performance")
            .collect();
        assert_eq!(all, ["performance", "event", "havan", "annual day"]);
    }

    #[test]
    fn test_labels_in_order() {
        let set = PatternSet::new("online", ONLINE_CUES).unwrap();
        let labels: Vec<_> = set.labels().collect();
        assert_eq!(labels, ["online", "facetime", "google meet"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternSet::new("broken", &[("(unclosed", "x")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_owned_table() {
        let table = vec![(String::from("diwali"), String::from("Diwali"))];
        let set = PatternSet::new("custom", &table).unwrap();
        assert!(!set.is_empty());
        assert_eq!(set.first_match("diwali mela"), Some("Diwali"));
    }
}
