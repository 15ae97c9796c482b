//! Filter messages by date range, sender and source date.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Sender name contains substring |
//! | Dates | [`with_dates`](FilterConfig::with_dates) | Date string exactly as exported |
//!
//! # Examples
//!
//! ## Filter by Sender
//!
//! ```
//! use classpack::core::filter::{FilterConfig, apply_filters};
//! use classpack::Message;
//!
//! let messages = vec![
//!     Message::new("5:55 PM", "2/8/2026", "Vaishnavi Kondapalli", "Class today at 5"),
//!     Message::new("5:56 PM", "2/8/2026", "Priya", "ok"),
//! ];
//!
//! // Case-insensitive substring match
//! let config = FilterConfig::new().with_sender("vaishnavi");
//! let filtered = apply_filters(messages, &config)?;
//!
//! assert_eq!(filtered.len(), 1);
//! # Ok::<(), classpack::ClasspackError>(())
//! ```
//!
//! ## Filter by Date Range
//!
//! ```
//! use classpack::core::filter::{FilterConfig, apply_filters};
//! use classpack::Message;
//!
//! let messages = vec![
//!     Message::new("9:00 AM", "1/1/2024", "Priya", "Old"),
//!     Message::new("5:54:21 PM", "6/15/24", "Priya", "New"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config)?;
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Date filters compare [`Message::datetime`]; a message whose date/time
//!   cannot be parsed is an error while a date filter is active
//! - Sender matching is a case-insensitive substring match, the same rule
//!   used for the teacher identity
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::Message;
use crate::error::{ClasspackError, Result};

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Include only messages whose sender contains this (case-insensitive).
    pub from: Option<String>,

    /// Include only messages whose date string is one of these.
    pub dates: Vec<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_filter_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive, through the end of that day).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        let end_of_day = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ClasspackError::invalid_date(date_str))?;
        self.before = Some(end_of_day);
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// ```
    /// use classpack::core::filter::FilterConfig;
    ///
    /// // Matches "Vaishnavi Kondapalli", "VAISHNAVI"
    /// let config = FilterConfig::new().with_sender("vaishnavi");
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Restricts output to messages sent on the given export date strings,
    /// e.g. `5/20/24`.
    #[must_use]
    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates.extend(dates.into_iter().map(Into::into));
        self
    }

    /// Sets the start moment directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end moment directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter() || !self.dates.is_empty()
    }

    /// Returns `true` if date range filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.from.is_some()
    }

    /// Checks a single message against every active filter.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`] if a date range filter is
    /// active and the message's date/time cannot be parsed.
    pub fn matches(&self, msg: &Message) -> Result<bool> {
        if let Some(ref from) = self.from {
            if !msg.is_from(from) {
                return Ok(false);
            }
        }

        if !self.dates.is_empty() && !self.dates.iter().any(|d| *d == msg.date) {
            return Ok(false);
        }

        if self.has_date_filter() {
            let ts = msg.datetime()?;
            if self.after.is_some_and(|after| ts < after) {
                return Ok(false);
            }
            if self.before.is_some_and(|before| ts > before) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

/// Parses a `YYYY-MM-DD` filter date.
fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ClasspackError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns the messages matching all active filters, in their original
/// order. If no filters are active, returns the input unchanged.
///
/// # Errors
///
/// See [`FilterConfig::matches`].
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Result<Vec<Message>> {
    if !config.is_active() {
        return Ok(messages);
    }

    let mut kept = Vec::with_capacity(messages.len());
    for msg in messages {
        if config.matches(&msg)? {
            kept.push(msg);
        }
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(sender: &str, body: &str, date: &str) -> Message {
        Message::new("12:00 PM", date, sender, body)
    }

    #[test]
    fn test_filter_by_sender_substring() {
        let messages = vec![
            make_msg("Vaishnavi Kondapalli", "Hello", "2/8/2026"),
            make_msg("Priya", "Hi", "2/8/2026"),
            make_msg("VAISHNAVI", "Bye", "2/8/2026"),
        ];

        let config = FilterConfig::new().with_sender("vaishnavi");
        let filtered = apply_filters(messages, &config).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].body, "Bye");
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = vec![
            make_msg("Priya", "Old", "1/1/2024"),
            make_msg("Priya", "New", "6/15/24"),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "New");
    }

    #[test]
    fn test_filter_by_date_before_is_inclusive() {
        let messages = vec![
            Message::new("11:59 PM", "3/1/2024", "Priya", "Last minute"),
            make_msg("Priya", "Too late", "3/2/2024"),
        ];

        let config = FilterConfig::new().with_date_to("2024-03-01").unwrap();
        let filtered = apply_filters(messages, &config).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "Last minute");
    }

    #[test]
    fn test_filter_by_source_dates() {
        let messages = vec![
            make_msg("Priya", "a", "5/20/24"),
            make_msg("Priya", "b", "5/21/24"),
            make_msg("Priya", "c", "6/2/24"),
        ];

        let config = FilterConfig::new().with_dates(["5/20/24", "6/2/24"]);
        let filtered = apply_filters(messages, &config).unwrap();

        let bodies: Vec<_> = filtered.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["a", "c"]);
    }

    #[test]
    fn test_unparseable_datetime_with_date_filter_is_error() {
        let messages = vec![make_msg("Priya", "bad", "2/30/2024")];
        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();

        let err = apply_filters(messages, &config).unwrap_err();
        assert!(err.is_invalid_datetime());
    }

    #[test]
    fn test_unparseable_datetime_without_date_filter_passes() {
        let messages = vec![make_msg("Priya", "bad", "2/30/2024")];
        let config = FilterConfig::new().with_sender("priya");

        assert_eq!(apply_filters(messages, &config).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ClasspackError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let messages = vec![
            make_msg("Vaishnavi", "Old", "1/1/2024"),
            make_msg("Vaishnavi", "New", "6/15/2024"),
            make_msg("Priya", "New Priya", "6/15/2024"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("vaishnavi");

        let filtered = apply_filters(messages, &config).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "New");
    }

    #[test]
    fn test_with_datetime_directly() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = FilterConfig::new().with_after(dt);
        assert_eq!(config.after, Some(dt));
        assert!(config.has_date_filter());
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Priya").is_active());
        assert!(FilterConfig::new().with_dates(["5/20/24"]).is_active());
        assert!(
            FilterConfig::new()
                .with_date_from("2024-01-01")
                .unwrap()
                .is_active()
        );
    }
}
