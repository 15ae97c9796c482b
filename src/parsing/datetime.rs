//! Resolving a message's `(date, time)` strings to a calendar datetime.
//!
//! Dates are month-first (`2/8/2026` is February 8th). The year is either
//! four digits or two, and the time may carry seconds. Rather than one
//! catch-all pattern, the formats are an explicit ordered list so that a
//! failure says exactly which attempts were made.

use chrono::NaiveDateTime;

use crate::error::{ClasspackError, Result};

/// Supported date/time formats, in attempt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeGrammar {
    /// `M/D/YYYY H:MM AM`
    FourDigitYear,
    /// `M/D/YY H:MM AM`
    TwoDigitYear,
}

impl DateTimeGrammar {
    /// Returns all formats in the order they are attempted.
    pub fn all() -> &'static [DateTimeGrammar] {
        &[DateTimeGrammar::FourDigitYear, DateTimeGrammar::TwoDigitYear]
    }

    /// Returns the chrono format string.
    pub fn chrono_format(self) -> &'static str {
        match self {
            DateTimeGrammar::FourDigitYear => "%m/%d/%Y %I:%M %p",
            DateTimeGrammar::TwoDigitYear => "%m/%d/%y %I:%M %p",
        }
    }

    fn year_digits(self) -> usize {
        match self {
            DateTimeGrammar::FourDigitYear => 4,
            DateTimeGrammar::TwoDigitYear => 2,
        }
    }

    /// Attempts to parse with this format only.
    ///
    /// The year width is checked up front: chrono's `%Y` happily reads `23`
    /// as the year 23.
    pub fn parse(self, date: &str, time: &str) -> Option<NaiveDateTime> {
        let year = date.trim().rsplit('/').next()?;
        if year.len() != self.year_digits() || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let time = canonical_time(time)?;
        let input = format!("{} {}", date.trim(), time);
        NaiveDateTime::parse_from_str(&input, self.chrono_format()).ok()
    }
}

/// Parses a message's date and time, trying each [`DateTimeGrammar`] in order.
///
/// Seconds are dropped before parsing, so `5:54:21 PM` resolves to 17:54.
///
/// # Errors
///
/// Returns [`ClasspackError::InvalidDateTime`] if no format yields a valid
/// calendar datetime.
///
/// # Example
///
/// ```rust
/// use classpack::parsing::parse_message_datetime;
/// use chrono::{NaiveDate, Timelike};
///
/// let dt = parse_message_datetime("7/17/23", "5:54:21 PM")?;
/// assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 7, 17).unwrap());
/// assert_eq!((dt.hour(), dt.minute()), (17, 54));
///
/// assert!(parse_message_datetime("2/30/2026", "5:55 PM").is_err());
/// # Ok::<(), classpack::ClasspackError>(())
/// ```
pub fn parse_message_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    DateTimeGrammar::all()
        .iter()
        .find_map(|g| g.parse(date, time))
        .ok_or_else(|| ClasspackError::invalid_datetime(date, time))
}

/// Rewrites `H:MM[:SS] am` (any spacing/case) as `H:MM AM`.
fn canonical_time(time: &str) -> Option<String> {
    let time = time.trim();
    let split = time.len().checked_sub(2)?;
    let clock = time.get(..split)?.trim_end();
    let meridiem = time.get(split..)?;
    if !meridiem.eq_ignore_ascii_case("am") && !meridiem.eq_ignore_ascii_case("pm") {
        return None;
    }

    let mut parts = clock.split(':');
    let hour = parts.next()?;
    let minute = parts.next()?;
    let _seconds = parts.next();
    if parts.next().is_some() {
        return None;
    }

    Some(format!("{hour}:{minute} {}", meridiem.to_ascii_uppercase()))
}
