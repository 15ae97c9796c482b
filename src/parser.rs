//! Message assembly: transcript lines in, ordered [`Message`]s out.
//!
//! A WhatsApp transcript is a sequence of message-start lines, each followed
//! by zero or more continuation lines for multi-line messages. The assembler
//! walks the lines once:
//!
//! 1. normalize the line
//! 2. if it is a message-start line, push a new [`Message`] and make it current
//! 3. otherwise, if a message is current and the line is not blank, append
//!    `"\n" + line` to its body
//! 4. otherwise drop the line (export header lines before the first message)
//!
//! # Example
//!
//! ```rust
//! use classpack::parser::WhatsAppParser;
//!
//! let parser = WhatsAppParser::new()?;
//! let messages = parser.parse_str(
//!     "[5:55 PM, 2/8/2026] Vaishnavi: Class today at 5\nBring your notebooks\n[5:56 PM, 2/8/2026] Priya: ok",
//! );
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].body, "Class today at 5\nBring your notebooks");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```

use std::path::Path;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{GrammarMatcher, is_system_message, normalize_line, split_lines};
use crate::source::read_transcript;

/// Parser for WhatsApp transcripts in either bracketed layout.
#[derive(Debug, Clone)]
pub struct WhatsAppParser {
    config: ParserConfig,
    matcher: GrammarMatcher,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            matcher: GrammarMatcher::new()?,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads an export (zip archive or plain transcript) and parses it.
    ///
    /// # Errors
    ///
    /// Fails only if the source cannot be read; see
    /// [`read_transcript`](crate::source::read_transcript).
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let transcript = read_transcript(path)?;
        let messages = self.parse_str(&transcript.text);
        tracing::debug!(
            origin = %transcript.origin.display(),
            count = messages.len(),
            "parsed transcript"
        );
        Ok(messages)
    }

    /// Parses transcript bytes, replacing invalid UTF-8 sequences.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Vec<Message> {
        self.parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parses transcript text.
    ///
    /// Lines break on `\n`, `\r\n`, a bare `\r`, and the Unicode line and
    /// paragraph separators.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.assemble(split_lines(content))
    }

    /// Assembles messages from a line sequence, preserving source order.
    pub fn assemble<I, S>(&self, lines: I) -> Vec<Message>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut messages: Vec<Message> = Vec::new();
        // Index of the message continuation lines belong to; `None` before the
        // first message and after a skipped system notice.
        let mut current: Option<usize> = None;

        for raw in lines {
            let line = normalize_line(raw.as_ref());

            if let Some(start) = self.matcher.match_line(&line) {
                if self.config.skip_system_messages && is_system_message(start.sender, start.body)
                {
                    current = None;
                    continue;
                }

                messages.push(Message::new(start.time, start.date, start.sender, start.body));
                current = Some(messages.len() - 1);
            } else if let Some(idx) = current {
                if !line.trim().is_empty() {
                    let body = &mut messages[idx].body;
                    body.push('\n');
                    body.push_str(&line);
                }
            }
        }

        messages
    }
}

/// Assembles messages from lines with the default configuration.
///
/// Shorthand for `WhatsAppParser::new()?.assemble(lines)`.
pub fn assemble_messages<I, S>(lines: I) -> Result<Vec<Message>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(WhatsAppParser::new()?.assemble(lines))
}
