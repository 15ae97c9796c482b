//! Message-start line grammars.
//!
//! WhatsApp writes the bracketed header of a message in one of two layouts
//! depending on the exporting device and locale:
//!
//! | Grammar | Layout | Example |
//! |---------|--------|---------|
//! | [`TimeFirst`](MessageGrammar::TimeFirst) | `[H:MM AM, M/D/YYYY]` | `[5:55 PM, 2/8/2026] Vaishnavi: Class today at 5` |
//! | [`DateFirst`](MessageGrammar::DateFirst) | `[M/D/YY, H:MM[:SS] AM]` | `[7/17/23, 5:54:21 PM] Priya: ok` |
//!
//! The bracket contents are structurally different (time-comma-date versus
//! date-comma-time), so well-formed input never matches both. A line that
//! matches neither is a continuation line, not an error.

use regex::Regex;

use crate::error::Result;

/// The two recognised message-start layouts, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageGrammar {
    /// `[H:MM AM/PM, M/D/YYYY] sender: body` with an exactly 4-digit year.
    TimeFirst,
    /// `[M/D/YY or YYYY, H:MM[:SS] AM/PM] sender: body`.
    DateFirst,
}

impl MessageGrammar {
    /// Returns the regex pattern for this grammar.
    ///
    /// Sender is non-greedy up to the first `:` after the closing bracket,
    /// body is the rest of the line and may be empty.
    pub fn pattern(self) -> &'static str {
        match self {
            // [5:55 PM, 2/8/2026] Sender: Message
            MessageGrammar::TimeFirst => {
                r"(?i)^\[(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M),\s*(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\]\s*(?P<sender>.+?):\s*(?P<body>.*)$"
            }
            // [7/17/23, 5:54:21 PM] Sender: Message
            MessageGrammar::DateFirst => {
                r"(?i)^\[(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),\s*(?P<time>[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*[AP]M)\]\s*(?P<sender>.+?):\s*(?P<body>.*)$"
            }
        }
    }

    /// Returns all grammars in the order they are attempted.
    pub fn all() -> &'static [MessageGrammar] {
        &[MessageGrammar::TimeFirst, MessageGrammar::DateFirst]
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MessageGrammar::TimeFirst => "time-first",
            MessageGrammar::DateFirst => "date-first",
        }
    }
}

impl std::fmt::Display for MessageGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A structurally matched message-start line, borrowing from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStart<'a> {
    /// Which grammar matched.
    pub grammar: MessageGrammar,
    /// Time as written, e.g. `5:55 PM`.
    pub time: &'a str,
    /// Date as written, e.g. `2/8/2026`.
    pub date: &'a str,
    /// Sender display name, trimmed and non-empty.
    pub sender: &'a str,
    /// First line of the body.
    pub body: &'a str,
}

/// Compiled message grammars, tried in fixed priority order.
///
/// # Example
///
/// ```rust
/// use classpack::parsing::{GrammarMatcher, MessageGrammar};
///
/// let matcher = GrammarMatcher::new()?;
/// let start = matcher
///     .match_line("[5:55 PM, 2/8/2026] Vaishnavi Kondapalli: Class today at 5")
///     .unwrap();
///
/// assert_eq!(start.grammar, MessageGrammar::TimeFirst);
/// assert_eq!(start.sender, "Vaishnavi Kondapalli");
/// assert_eq!(start.body, "Class today at 5");
/// assert!(matcher.match_line("just a continuation").is_none());
/// # Ok::<(), classpack::ClasspackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GrammarMatcher {
    grammars: Vec<(MessageGrammar, Regex)>,
}

impl GrammarMatcher {
    /// Compiles both grammars.
    pub fn new() -> Result<Self> {
        let grammars = MessageGrammar::all()
            .iter()
            .map(|&g| Ok((g, Regex::new(g.pattern())?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { grammars })
    }

    /// Returns the first grammar that structurally matches `line`.
    ///
    /// `line` should already be normalized. Lines without a leading `[`,
    /// lines matching neither grammar, and lines whose sender trims to
    /// nothing all return `None`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<MessageStart<'a>> {
        if !line.starts_with('[') {
            return None;
        }

        self.grammars.iter().find_map(|(grammar, regex)| {
            let caps = regex.captures(line)?;
            let sender = caps.name("sender")?.as_str().trim();
            if sender.is_empty() {
                return None;
            }
            Some(MessageStart {
                grammar: *grammar,
                time: caps.name("time")?.as_str().trim(),
                date: caps.name("date")?.as_str().trim(),
                sender,
                body: caps.name("body").map_or("", |m| m.as_str()),
            })
        })
    }

}
