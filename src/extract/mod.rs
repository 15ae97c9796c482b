//! Class/event date inference from teacher messages.
//!
//! The teacher announces classes, online sessions, performances and
//! cancellations in the group chat. [`ClassExtractor`] scans the teacher's
//! messages and turns each announcement into a [`ClassDate`]:
//!
//! 1. skip unless the body matches a class indicator or an event pattern
//! 2. classify: reschedule pattern ("cancel" in body -> `Cancelled`, else
//!    `Rescheduled`), then online cue -> `Online`, then event -> `Performance`,
//!    else `Class`
//! 3. take the first time-of-day mention, if any
//! 4. keep only the first class/online/performance entry per date;
//!    cancellations and reschedules are always kept
//! 5. record the first 100 body characters as evidence
//!
//! The date of a `ClassDate` is the date the message was sent; teachers
//! usually announce on the day or the day before.
//!
//! This is a heuristic. It will miss announcements phrased differently and
//! can collapse two genuine classes on the same day into one entry.

pub mod patterns;

use std::collections::HashSet;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::message::truncate_chars;

pub use patterns::PatternSet;

/// Kind of an inferred class date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    /// A regular in-person class.
    Class,
    /// A class held over a video call.
    Online,
    /// A performance, concert or community event.
    Performance,
    /// A class that was called off.
    Cancelled,
    /// A class moved to another date.
    Rescheduled,
}

impl ClassType {
    /// Lowercase name, as used in output files.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassType::Class => "class",
            ClassType::Online => "online",
            ClassType::Performance => "performance",
            ClassType::Cancelled => "cancelled",
            ClassType::Rescheduled => "rescheduled",
        }
    }

    /// Returns `true` for types that override an earlier entry for the
    /// same date.
    pub fn is_override(self) -> bool {
        matches!(self, ClassType::Cancelled | ClassType::Rescheduled)
    }
}

impl std::fmt::Display for ClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inferred class, event or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDate {
    /// Date of the originating message, as written in the export.
    pub date: String,
    /// Time of day mentioned in the message, e.g. `5`, `12:15`, `3 pm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub time: Option<String>,
    /// What kind of entry this is.
    pub class_type: ClassType,
    /// Start of the message body, with `...` if it was cut.
    pub evidence: String,
    /// When the originating message was sent.
    pub source_timestamp: NaiveDateTime,
}

/// Extracts [`ClassDate`]s from a chronologically sorted message list.
///
/// # Example
///
/// ```rust
/// use classpack::Message;
/// use classpack::config::ExtractorConfig;
/// use classpack::extract::{ClassExtractor, ClassType};
///
/// let messages = vec![
///     Message::new("5:55 PM", "2/8/2026", "Vaishnavi Kondapalli", "Class today at 5"),
///     Message::new("6:10 PM", "2/8/2026", "Priya", "See you there"),
/// ];
///
/// let extractor = ClassExtractor::new(ExtractorConfig::new().with_teacher("vaishnavi"))?;
/// let classes = extractor.extract(&messages)?;
///
/// assert_eq!(classes.len(), 1);
/// assert_eq!(classes[0].class_type, ClassType::Class);
/// assert_eq!(classes[0].time.as_deref(), Some("5"));
/// # Ok::<(), classpack::ClasspackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClassExtractor {
    config: ExtractorConfig,
    class_indicators: PatternSet,
    reschedule: PatternSet,
    events: PatternSet,
    online: PatternSet,
    time_mention: Regex,
}

impl ClassExtractor {
    /// Compiles the built-in pattern tables.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            config,
            class_indicators: PatternSet::new("class", patterns::CLASS_INDICATORS)?,
            reschedule: PatternSet::new("reschedule", patterns::RESCHEDULE_PATTERNS)?,
            events: PatternSet::new("event", patterns::EVENT_PATTERNS)?,
            online: PatternSet::new("online", patterns::ONLINE_CUES)?,
            time_mention: Regex::new(patterns::TIME_MENTION)?,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Returns `true` if `body` announces a class or an event.
    pub fn is_announcement(&self, body: &str) -> bool {
        self.class_indicators.is_match(body) || self.events.is_match(body)
    }

    /// Classifies an announcement body.
    pub fn classify(&self, body: &str) -> ClassType {
        if self.reschedule.is_match(body) {
            if body.to_lowercase().contains("cancel") {
                return ClassType::Cancelled;
            }
            return ClassType::Rescheduled;
        }

        if self.online.is_match(body) {
            return ClassType::Online;
        }

        if self.events.is_match(body) {
            return ClassType::Performance;
        }

        ClassType::Class
    }

    /// Returns the first time-of-day mention in `text`.
    pub fn time_mention<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.time_mention
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    }

    /// Scans the teacher's messages and returns class dates ordered by
    /// source timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`](crate::ClasspackError::InvalidDateTime)
    /// if an announcement's date/time cannot be parsed.
    pub fn extract(&self, messages: &[Message]) -> Result<Vec<ClassDate>> {
        let mut classes: Vec<ClassDate> = Vec::new();
        let mut seen_dates: HashSet<&str> = HashSet::new();

        for msg in messages {
            if !msg.is_from(&self.config.teacher) {
                continue;
            }

            let body = msg.body.as_str();
            if !self.is_announcement(body) {
                continue;
            }

            let class_type = self.classify(body);
            if seen_dates.contains(msg.date.as_str()) && !class_type.is_override() {
                tracing::debug!(date = %msg.date, %class_type, "date already recorded");
                continue;
            }
            seen_dates.insert(msg.date.as_str());

            classes.push(ClassDate {
                date: msg.date.clone(),
                time: self.time_mention(body).map(str::to_string),
                class_type,
                evidence: truncate_chars(body, self.config.evidence_len, "..."),
                source_timestamp: msg.datetime()?,
            });
        }

        classes.sort_by_key(|c| c.source_timestamp);
        Ok(classes)
    }
}

/// Extracts class dates with the default configuration for `teacher`.
pub fn extract_classes(messages: &[Message], teacher: &str) -> Result<Vec<ClassDate>> {
    ClassExtractor::new(ExtractorConfig::new().with_teacher(teacher))?.extract(messages)
}
