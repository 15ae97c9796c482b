//! Line normalization for raw export text.
//!
//! WhatsApp puts a narrow no-break space (U+202F) before AM/PM
//! (`5:55\u{202f}PM`), prefixes some lines with a left-to-right mark
//! (U+200E), and Windows-originated exports keep their carriage returns.
//! Older Mac exports break lines on a bare carriage return, and message
//! bodies pasted from other apps may carry U+2028/U+2029 separators.

use std::borrow::Cow;

const NARROW_NO_BREAK_SPACE: char = '\u{202f}';
const LEFT_TO_RIGHT_MARK: char = '\u{200e}';
const LINE_BREAKS: [char; 4] = ['\r', '\n', '\u{2028}', '\u{2029}'];

/// Splits text into lines on `\n`, `\r\n`, `\r`, U+2028 and U+2029.
///
/// Like [`str::lines`], a single trailing break does not produce an empty
/// final line.
///
/// # Example
///
/// ```rust
/// use classpack::parsing::split_lines;
///
/// let lines: Vec<_> = split_lines("a\rb\r\nc\u{2028}d\n").collect();
/// assert_eq!(lines, ["a", "b", "c", "d"]);
/// ```
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(LINE_BREAKS) {
            Some(i) => {
                let width = if s[i..].starts_with("\r\n") {
                    2
                } else {
                    s[i..].chars().next().map_or(1, char::len_utf8)
                };
                let tail = &s[i + width..];
                rest = (!tail.is_empty()).then_some(tail);
                Some(&s[..i])
            }
            None => {
                rest = None;
                (!s.is_empty()).then_some(s)
            }
        }
    })
}

/// Replaces platform-specific Unicode artifacts with plain characters.
///
/// - narrow no-break space becomes a regular space
/// - left-to-right marks are removed
/// - carriage returns are removed
///
/// Borrows the input when there is nothing to replace.
///
/// # Example
///
/// ```rust
/// use classpack::parsing::normalize_line;
///
/// assert_eq!(normalize_line("[5:55\u{202f}PM, 2/8/2026]\r"), "[5:55 PM, 2/8/2026]");
/// ```
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    if !line
        .chars()
        .any(|c| matches!(c, NARROW_NO_BREAK_SPACE | LEFT_TO_RIGHT_MARK | '\r'))
    {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            NARROW_NO_BREAK_SPACE => out.push(' '),
            LEFT_TO_RIGHT_MARK | '\r' => {}
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
